pub mod aggregate_call;
pub use aggregate_call::*;

pub mod helpers;

pub mod grouped_aggregator;
pub use grouped_aggregator::*;

pub mod render;

pub(crate) mod _tests;
