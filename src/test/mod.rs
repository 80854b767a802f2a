
mod descriptor;
