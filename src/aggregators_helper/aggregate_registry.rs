use std::{collections::HashMap, sync::Arc};

use tracing::debug;

use crate::{aggregators_helper::{AggregateError, AggregateImpl, AggregateSignature, CollectImpl}, JsonPrimitive};

/// Case-insensitive registry of aggregates.
///
/// Owned by the embedding engine; nothing is registered behind its back.
#[derive(Default)]
pub struct AggregateRegistry {
    by_name: HashMap<String, Arc<dyn AggregateImpl>>,
}

impl AggregateRegistry {
    pub fn new() -> Self { Self { by_name: HashMap::new() } }

    /// Register `impl_` under its name, replacing any previous entry.
    pub fn register<I: AggregateImpl + 'static>(&mut self, impl_: I) {
        let name = impl_.name().to_ascii_lowercase();
        if self.by_name.insert(name.clone(), Arc::new(impl_)).is_some() {
            debug!(%name, "aggregate replaced");
        } else {
            debug!(%name, "aggregate registered");
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn AggregateImpl>> {
        self.by_name.get(&name.to_ascii_lowercase()).cloned()
    }

    pub fn list(&self) -> Vec<String> {
        let mut v: Vec<_> = self.by_name.keys().cloned().collect();
        v.sort();
        v
    }

    /// Look up `name` and check it against the declared argument types.
    pub fn resolve(&self, name: &str, args: &[JsonPrimitive]) -> Result<(Arc<dyn AggregateImpl>, AggregateSignature), AggregateError> {
        let imp = self.get(name).ok_or_else(|| AggregateError::FunctionNotFound(name.to_string()))?;
        let sig = imp.signature(args)?;
        debug!(name = sig.name, element = %sig.element, "aggregate resolved");
        Ok((imp, sig))
    }

    pub fn default_aggregate_registry() -> Self {
        let mut registry = Self::new();
        registry.register(CollectImpl::new());
        registry
    }
}
