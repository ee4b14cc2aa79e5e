use crate::{aggregators_helper::{Accumulator, AggregateError}, JsonPrimitive};

/// Resolved type information of an aggregate call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateSignature {
    pub name: &'static str,
    /// Declared type of the aggregated argument.
    pub element: JsonPrimitive,
    /// Result type; `Array` means "ordered list of `element`".
    pub returns: JsonPrimitive,
    pub nullable: bool,
}

/// Per-aggregate metadata + factory.
/// One instance is registered per function name in an [`AggregateRegistry`](crate::aggregators_helper::AggregateRegistry).
/// It is stateless and thread-safe to share.
pub trait AggregateImpl: Send + Sync {
    /// Canonical lowercase function name.
    fn name(&self) -> &'static str;

    /// Check the declared argument types and derive the result type.
    /// Runs once per query, at resolution time.
    fn signature(&self, args: &[JsonPrimitive]) -> Result<AggregateSignature, AggregateError>;

    /// Create a fresh accumulator instance for one group.
    fn create_accumulator(&self) -> Box<dyn Accumulator>;
}
