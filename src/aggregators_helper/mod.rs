pub mod aggregate_error;
pub use aggregate_error::*;

pub mod accumulator;
pub use accumulator::*;

pub mod aggregate_impl;
pub use aggregate_impl::*;

pub mod aggregate_registry;
pub use aggregate_registry::*;

pub mod functions;
pub use functions::*;
