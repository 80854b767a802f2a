//! Immutable topology shape specifications.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TopoError;

/// Named topology-generation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Star,
    Chain,
    Tree,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Star => write!(f, "star"),
            Family::Chain => write!(f, "chain"),
            Family::Tree => write!(f, "tree"),
        }
    }
}

impl FromStr for Family {
    type Err = TopoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "star" => Ok(Family::Star),
            "chain" => Ok(Family::Chain),
            "tree" => Ok(Family::Tree),
            other => Err(TopoError::InvalidTopology(format!(
                "unknown family {other:?}, expected star | chain | tree"
            ))),
        }
    }
}

/// Validated shape parameters for one topology family.
///
/// Constructed once from raw user input, immutable afterwards; read by both
/// the builder and the verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum TopoDescriptor {
    Star { host_count: u32 },
    Chain { length: u32 },
    Tree { depth: u32, fanout: u32 },
}

impl TopoDescriptor {
    /// One switch with `host_count` hosts hanging off it.
    pub fn star(host_count: i64) -> Result<Self, TopoError> {
        Ok(TopoDescriptor::Star {
            host_count: positive(host_count, "host_count")?,
        })
    }

    /// A linear backbone of `length` switches, one host per switch.
    pub fn chain(length: i64) -> Result<Self, TopoError> {
        Ok(TopoDescriptor::Chain {
            length: positive(length, "length")?,
        })
    }

    /// A complete `fanout`-ary switch tree of height `depth`, one host per
    /// leaf switch. `depth` 0 is a single root/leaf switch.
    pub fn tree(depth: i64, fanout: i64) -> Result<Self, TopoError> {
        if depth < 0 {
            return Err(TopoError::InvalidTopology(format!(
                "depth must be non-negative, got {depth}"
            )));
        }
        Ok(TopoDescriptor::Tree {
            depth: in_range(depth, "depth")?,
            fanout: positive(fanout, "fanout")?,
        })
    }

    pub fn family(&self) -> Family {
        match self {
            TopoDescriptor::Star { .. } => Family::Star,
            TopoDescriptor::Chain { .. } => Family::Chain,
            TopoDescriptor::Tree { .. } => Family::Tree,
        }
    }
}

fn positive(value: i64, what: &str) -> Result<u32, TopoError> {
    if value <= 0 {
        return Err(TopoError::InvalidTopology(format!(
            "{what} must be positive, got {value}"
        )));
    }
    in_range(value, what)
}

fn in_range(value: i64, what: &str) -> Result<u32, TopoError> {
    u32::try_from(value)
        .map_err(|_| TopoError::InvalidTopology(format!("{what} is out of range: {value}")))
}
