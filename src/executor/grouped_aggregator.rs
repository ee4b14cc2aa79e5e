use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    aggregators_helper::{Accumulator, AggregateError, AggregateImpl, AggregateRegistry, AggregateSignature},
    executor::{aggregate_call::AggregateCall, helpers::Helpers},
    JsonPrimitive,
};

/// Which half of the two-phase protocol a run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateMode {
    /// Single stage: raw rows in, final values out.
    Complete,
    /// Map side: raw rows in, shippable partial states out.
    Partial,
    /// Merge side: partial rows in (group keys + states), final values out.
    Final,
}

struct ResolvedCall {
    call: AggregateCall,
    imp: Arc<dyn AggregateImpl>,
    signature: AggregateSignature,
    output: String,
}

type GroupEntry = (Vec<Value>, Vec<Box<dyn Accumulator>>);

/// Hash-grouped aggregation over JSON row objects.
///
/// Calls are resolved against the registry once, at construction; arity
/// errors surface there and never per row. Groups are emitted in the order
/// they were first seen.
pub struct GroupedAggregator {
    group_keys: Vec<String>,
    calls: Vec<ResolvedCall>,
}

impl GroupedAggregator {
    pub fn new(
        registry: &AggregateRegistry,
        schema: &IndexMap<String, JsonPrimitive>,
        group_keys: &[&str],
        calls: Vec<AggregateCall>,
    ) -> Result<Self, AggregateError> {
        let group_keys: Vec<String> = group_keys.iter().map(|k| k.to_string()).collect();

        // group keys first, then aggregates; reserve names in that order
        let mut taken = Map::new();
        for k in &group_keys {
            taken.insert(k.clone(), Value::Null);
        }

        let mut resolved = Vec::with_capacity(calls.len());
        for call in calls {
            let arg_types: Vec<JsonPrimitive> = call.args.iter()
                .map(|a| schema.get(a).copied().unwrap_or(JsonPrimitive::Null))
                .collect();
            let (imp, signature) = registry.resolve(&call.func, &arg_types)?;
            let output = Helpers::unique_name(&taken, &call.base_name());
            taken.insert(output.clone(), Value::Null);
            resolved.push(ResolvedCall { call, imp, signature, output });
        }

        Ok(Self { group_keys, calls: resolved })
    }

    /// Output column name of every call, in call order.
    pub fn output_names(&self) -> Vec<&str> {
        self.calls.iter().map(|c| c.output.as_str()).collect()
    }

    pub fn signatures(&self) -> Vec<AggregateSignature> {
        self.calls.iter().map(|c| c.signature).collect()
    }

    pub fn run(&self, mode: AggregateMode, rows: &[Value]) -> Result<Vec<Value>, AggregateError> {
        let mut groups: IndexMap<String, GroupEntry> = IndexMap::new();

        for row in rows {
            let gb_vals: Vec<Value> = self.group_keys.iter()
                .map(|k| Helpers::column(row, k).clone())
                .collect();
            let gk = Helpers::canonical_tuple(&gb_vals);

            let entry = groups.entry(gk).or_insert_with(|| (gb_vals, self.new_accumulators()));

            for (call, acc) in self.calls.iter().zip(entry.1.iter_mut()) {
                match mode {
                    AggregateMode::Complete | AggregateMode::Partial => {
                        let args: Vec<Value> = call.call.args.iter()
                            .map(|a| Helpers::column(row, a).clone())
                            .collect();
                        acc.update(&args)?;
                    }
                    AggregateMode::Final => acc.merge(Helpers::column(row, &call.output))?,
                }
            }
        }

        // a global aggregate over no rows still yields one row
        if groups.is_empty() && self.group_keys.is_empty() {
            groups.insert(Helpers::canonical_tuple(&[]), (Vec::new(), self.new_accumulators()));
        }

        debug!(?mode, rows = rows.len(), groups = groups.len(), "aggregation finished");

        let mut out = Vec::with_capacity(groups.len());
        for (_gk, (gb_vals, accs)) in groups {
            let mut m = Map::new();
            for (k, v) in self.group_keys.iter().zip(gb_vals) {
                m.insert(k.clone(), v);
            }
            for (call, acc) in self.calls.iter().zip(accs.iter()) {
                let value = match mode {
                    AggregateMode::Partial => acc.state(),
                    AggregateMode::Complete | AggregateMode::Final => acc.finalize(),
                };
                m.insert(call.output.clone(), value);
            }
            out.push(Value::Object(m));
        }
        Ok(out)
    }

    /// Run `Partial` on every partition, then `Final` over all partial rows
    /// in partition order.
    pub fn run_two_phase(&self, partitions: &[Vec<Value>]) -> Result<Vec<Value>, AggregateError> {
        let mut partials = Vec::new();
        for part in partitions {
            partials.extend(self.run(AggregateMode::Partial, part)?);
        }
        self.run(AggregateMode::Final, &partials)
    }

    fn new_accumulators(&self) -> Vec<Box<dyn Accumulator>> {
        self.calls.iter().map(|c| c.imp.create_accumulator()).collect()
    }
}
