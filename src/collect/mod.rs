pub mod element_copier;
pub use element_copier::*;

pub mod collect_config;
pub use collect_config::*;

pub mod collect_buffer;
pub use collect_buffer::*;

/// Registered name of the collect aggregate.
pub const COLLECT: &str = "collect";
