use std::fmt;

use crate::JsonPrimitive;

#[derive(Debug, Clone, PartialEq)]
pub enum AggregateError {
    /// Raised once at resolution time when the argument count does not match.
    Arity { name: String, expected: usize, got: Vec<JsonPrimitive> },
    FunctionNotFound(String),
    /// Only reachable when a cap is configured with `OverflowPolicy::Fail`.
    CapacityExceeded { name: String, limit: usize },
    InvalidPartial(String),
    Source(String),
    Other(String),
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateError::Arity { name, expected, got } => write!(
                f,
                "{}: exactly {} argument{} expected, got {}",
                name,
                expected,
                if *expected == 1 { " is" } else { "s are" },
                got.len()
            ),
            AggregateError::FunctionNotFound(name) => write!(f, "aggregate function not found: {}", name),
            AggregateError::CapacityExceeded { name, limit } => {
                write!(f, "{}: buffer capacity of {} elements exceeded", name, limit)
            }
            AggregateError::InvalidPartial(msg) => write!(f, "invalid partial aggregation state: {}", msg),
            AggregateError::Source(msg) => write!(f, "source error: {}", msg),
            AggregateError::Other(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for AggregateError {}
