use serde_json::Value;

use crate::aggregators_helper::AggregateError;

/// The per-group state, as seen by the engine.
///
/// The executor will, per group:
///   1) call `update(&mut self, &args)` once per row (args.len() == call arity),
///      and/or `merge(&mut self, &partial)` once per partial received
///   2) call `state()` to ship a partial, or `finalize()` for the result
///
/// `Value::Null` is the absent value. Partials are whatever `state()`
/// returned on another accumulator of the same aggregate.
pub trait Accumulator: Send {
    /// Update the running state with the evaluated arguments of this row.
    fn update(&mut self, args: &[Value]) -> Result<(), AggregateError>;

    /// Shippable partial result.
    fn state(&self) -> Value;

    /// Fold a partial produced by `state()` into this accumulator.
    fn merge(&mut self, partial: &Value) -> Result<(), AggregateError>;

    /// Produce the final result as a JSON value.
    fn finalize(&self) -> Value;

    /// Return to the freshly created state so the accumulator can serve
    /// another group.
    fn reset(&mut self);
}
