pub mod aggregators_helper;
pub use aggregators_helper::{Accumulator, AggregateError, AggregateImpl, AggregateRegistry, AggregateSignature, CollectImpl};

pub mod collect;
pub use collect::{CloneCopier, CollectBuffer, CollectConfig, ElementCopier, FnCopier, OverflowPolicy};

pub mod schema;
pub use schema::JsonPrimitive;

pub mod executor;
pub use executor::{AggregateCall, AggregateMode, GroupedAggregator};

pub mod source;
pub use source::DelimitedSource;
