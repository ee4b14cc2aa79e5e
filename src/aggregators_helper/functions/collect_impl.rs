use serde_json::Value;

use crate::{
    aggregators_helper::{Accumulator, AggregateError, AggregateImpl, AggregateSignature},
    collect::{CollectBuffer, CollectConfig, COLLECT},
    JsonPrimitive,
};

/// `collect(x)`: every non-null `x` of the group, in arrival order.
///
/// CAUTION: unbounded unless configured with a cap; a very large group is
/// held entirely in memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectImpl {
    config: CollectConfig,
}

impl CollectImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CollectConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CollectConfig {
        &self.config
    }
}

impl AggregateImpl for CollectImpl {
    fn name(&self) -> &'static str { COLLECT }

    fn signature(&self, args: &[JsonPrimitive]) -> Result<AggregateSignature, AggregateError> {
        let [element] = args else {
            return Err(AggregateError::Arity { name: COLLECT.into(), expected: 1, got: args.to_vec() });
        };
        // An all-null (or empty) group yields [], never NULL.
        Ok(AggregateSignature { name: COLLECT, element: *element, returns: JsonPrimitive::Array, nullable: false })
    }

    fn create_accumulator(&self) -> Box<dyn Accumulator> {
        Box::new(CollectAcc { buffer: CollectBuffer::with_config(self.config) })
    }
}

struct CollectAcc {
    buffer: CollectBuffer<Value>,
}

impl Accumulator for CollectAcc {
    fn update(&mut self, args: &[Value]) -> Result<(), AggregateError> {
        let [v] = args else {
            return Err(AggregateError::Arity {
                name: COLLECT.into(),
                expected: 1,
                got: args.iter().map(JsonPrimitive::of_value).collect(),
            });
        };
        self.buffer.ingest((!v.is_null()).then_some(v))
    }

    fn state(&self) -> Value {
        Value::Array(self.buffer.extract())
    }

    fn merge(&mut self, partial: &Value) -> Result<(), AggregateError> {
        match partial {
            // a group that never reached a partial stage ships nothing
            Value::Null => Ok(()),
            Value::Array(items) => self.buffer.merge_nullable(items.iter().map(|v| (!v.is_null()).then_some(v))),
            other => Err(AggregateError::InvalidPartial(format!(
                "collect expects an array partial, got {}",
                JsonPrimitive::of_value(other)
            ))),
        }
    }

    fn finalize(&self) -> Value {
        Value::Array(self.buffer.extract())
    }

    fn reset(&mut self) {
        self.buffer.reset();
    }
}
