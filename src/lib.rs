pub mod error;
pub mod run;
pub mod session;
pub mod topo;
pub mod verify;

#[cfg(test)]
mod test;
