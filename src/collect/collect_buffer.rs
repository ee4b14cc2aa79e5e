use tracing::{trace, warn};

use crate::{
    aggregators_helper::AggregateError,
    collect::{CloneCopier, CollectConfig, ElementCopier, FnCopier, OverflowPolicy, COLLECT},
};

/// Per-group aggregation buffer of the collect aggregate.
///
/// Holds the ingested elements in arrival order. Absent values are never
/// stored. Every element is copied through the buffer's [`ElementCopier`]
/// before it is kept.
///
/// The lifecycle the engine drives:
///   1) `new` / `reset` at the start of a group
///   2) `ingest` once per input row (map side) and/or `merge_from` once per
///      partial result received (merge side)
///   3) `extract` to ship a partial or to deliver the final list
///
/// There is no terminal state: `extract` may be followed by more `ingest` or
/// `merge_from` calls.
#[derive(Debug)]
pub struct CollectBuffer<V, C = CloneCopier> {
    items: Vec<V>,
    copier: C,
    config: CollectConfig,
    truncated: bool,
}

impl<V: Clone> CollectBuffer<V, CloneCopier> {
    /// Create an empty, unbounded buffer that copies through `Clone`.
    pub fn new() -> Self {
        Self::with_copier(CloneCopier)
    }

    pub fn with_config(config: CollectConfig) -> Self {
        Self::with_copier_and_config(CloneCopier, config)
    }
}

impl<V: Clone> Default for CollectBuffer<V, CloneCopier> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, F> CollectBuffer<V, FnCopier<F>>
where
    F: Fn(&V) -> V,
{
    pub fn with_copy_fn(copy: F) -> Self {
        Self::with_copier(FnCopier(copy))
    }
}

impl<V, C: ElementCopier<V>> CollectBuffer<V, C> {
    pub fn with_copier(copier: C) -> Self {
        Self::with_copier_and_config(copier, CollectConfig::default())
    }

    pub fn with_copier_and_config(copier: C, config: CollectConfig) -> Self {
        Self { items: Vec::new(), copier, config, truncated: false }
    }

    /// Clear the buffer for reuse by another group. The allocation is kept.
    pub fn reset(&mut self) {
        self.items.clear();
        self.truncated = false;
    }

    /// Append a copy of `value`. `None` is skipped.
    pub fn ingest(&mut self, value: Option<&V>) -> Result<(), AggregateError> {
        let Some(v) = value else { return Ok(()) };
        if self.admit(1)? == 1 {
            let copy = self.copier.copy_element(v);
            self.items.push(copy);
        }
        Ok(())
    }

    /// Append every element of a partial result, in its order.
    pub fn merge_from(&mut self, partial: &[V]) -> Result<(), AggregateError> {
        let accepted = self.admit(partial.len())?;
        self.items.reserve(accepted);
        for v in &partial[..accepted] {
            let copy = self.copier.copy_element(v);
            self.items.push(copy);
        }
        trace!(incoming = partial.len(), accepted, total = self.items.len(), "collect merge");
        Ok(())
    }

    /// Like [`merge_from`](Self::merge_from) for partials that may carry
    /// absent entries; those are skipped.
    pub fn merge_nullable<'a, I>(&mut self, partial: I) -> Result<(), AggregateError>
    where
        I: IntoIterator<Item = Option<&'a V>>,
        V: 'a,
    {
        let present: Vec<&V> = partial.into_iter().flatten().collect();
        let accepted = self.admit(present.len())?;
        self.items.reserve(accepted);
        for v in &present[..accepted] {
            let copy = self.copier.copy_element(v);
            self.items.push(copy);
        }
        trace!(incoming = present.len(), accepted, total = self.items.len(), "collect merge");
        Ok(())
    }

    /// Snapshot of the collected elements.
    ///
    /// Serves both as the shippable partial and as the final result; the
    /// returned vector shares nothing with the buffer.
    pub fn extract(&self) -> Vec<V> {
        self.items.iter().map(|v| self.copier.copy_element(v)).collect()
    }

    pub fn items(&self) -> &[V] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn config(&self) -> &CollectConfig {
        &self.config
    }

    /// Whether any element was dropped by `OverflowPolicy::Truncate` since
    /// the last reset.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    // How many of `incoming` elements fit. Under `Fail` the whole batch is
    // rejected before anything is appended.
    fn admit(&mut self, incoming: usize) -> Result<usize, AggregateError> {
        let Some(limit) = self.config.max_items else { return Ok(incoming) };
        let room = limit.saturating_sub(self.items.len());
        if incoming <= room {
            return Ok(incoming);
        }
        match self.config.overflow {
            OverflowPolicy::Fail => Err(AggregateError::CapacityExceeded { name: COLLECT.to_string(), limit }),
            OverflowPolicy::Truncate => {
                if !self.truncated {
                    warn!(limit, "collect buffer full, dropping further elements");
                    self.truncated = true;
                }
                Ok(room)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn s(v: &str) -> String { v.to_string() }

    fn filled(values: &[&str]) -> CollectBuffer<String> {
        let mut b = CollectBuffer::new();
        for v in values {
            b.ingest(Some(&s(v))).unwrap();
        }
        b
    }

    #[test]
    fn ingest_preserves_arrival_order() {
        let b = filled(&["c", "a", "b", "a"]);
        assert_eq!(b.extract(), vec!["c", "a", "b", "a"]);
    }

    #[test]
    fn ingest_none_leaves_buffer_unchanged() {
        let mut b = filled(&["x"]);
        b.ingest(None).unwrap();
        assert_eq!(b.len(), 1);
        assert_eq!(b.items(), &[s("x")]);
    }

    #[test]
    fn ingested_value_is_independent_of_caller() {
        let mut b: CollectBuffer<Vec<i32>> = CollectBuffer::new();
        let mut row = vec![1, 2];
        b.ingest(Some(&row)).unwrap();
        row.push(3);
        row[0] = 99;
        assert_eq!(b.extract(), vec![vec![1, 2]]);
    }

    #[test]
    fn merge_then_ingest_concatenates() {
        let b1 = filled(&["a", "b"]);
        let mut b2: CollectBuffer<String> = CollectBuffer::new();
        b2.merge_from(&b1.extract()).unwrap();
        b2.ingest(Some(&s("c"))).unwrap();
        assert_eq!(b2.extract(), vec!["a", "b", "c"]);
    }

    #[test]
    fn reset_empties_buffer() {
        let mut b = filled(&["a", "b", "c"]);
        b.reset();
        assert!(b.extract().is_empty());
        assert!(b.is_empty());
    }

    #[test]
    fn repeated_extract_is_equal_but_independent() {
        let b = filled(&["a", "b"]);
        let mut first = b.extract();
        let second = b.extract();
        assert_eq!(first, second);
        first.push(s("z"));
        first[0] = s("changed");
        assert_eq!(b.extract(), vec!["a", "b"]);
    }

    #[test]
    fn snapshot_does_not_follow_later_mutation() {
        let mut b = filled(&["a"]);
        let snap = b.extract();
        b.ingest(Some(&s("b"))).unwrap();
        b.merge_from(&[s("c")]).unwrap();
        assert_eq!(snap, vec!["a"]);
        assert_eq!(b.extract(), vec!["a", "b", "c"]);
    }

    #[test]
    fn duplicates_are_kept() {
        let b = filled(&["twelve", "twelve", "eleven", "eleven"]);
        assert_eq!(b.extract(), vec!["twelve", "twelve", "eleven", "eleven"]);
    }

    #[test]
    fn merge_order_follows_call_order() {
        let p1 = filled(&["x", "y"]);
        let p2 = filled(&["z"]);

        let mut fwd: CollectBuffer<String> = CollectBuffer::new();
        fwd.merge_from(&p1.extract()).unwrap();
        fwd.merge_from(&p2.extract()).unwrap();
        assert_eq!(fwd.extract(), vec!["x", "y", "z"]);

        let mut rev: CollectBuffer<String> = CollectBuffer::new();
        rev.merge_from(&p2.extract()).unwrap();
        rev.merge_from(&p1.extract()).unwrap();
        assert_eq!(rev.extract(), vec!["z", "x", "y"]);
    }

    #[test]
    fn merge_nullable_skips_absent_entries() {
        let mut b: CollectBuffer<String> = CollectBuffer::new();
        b.merge_nullable([Some(&s("a")), None, Some(&s("b"))]).unwrap();
        assert_eq!(b.extract(), vec!["a", "b"]);
    }

    #[test]
    fn ingest_after_extract_is_allowed() {
        let mut b = filled(&["a"]);
        let _ = b.extract();
        b.ingest(Some(&s("b"))).unwrap();
        assert_eq!(b.extract(), vec!["a", "b"]);
    }

    #[test]
    fn every_element_goes_through_the_copier() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut b = CollectBuffer::with_copy_fn(move |v: &i64| {
            counter.fetch_add(1, Ordering::SeqCst);
            *v
        });
        b.ingest(Some(&1)).unwrap();
        b.ingest(None).unwrap();
        b.merge_from(&[2, 3]).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        assert_eq!(b.extract(), vec![1, 2, 3]);
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn capped_fail_rejects_and_keeps_contents() {
        let mut b = CollectBuffer::with_config(CollectConfig::capped(2, OverflowPolicy::Fail));
        b.ingest(Some(&s("a"))).unwrap();
        b.ingest(Some(&s("b"))).unwrap();
        let err = b.ingest(Some(&s("c"))).unwrap_err();
        assert_eq!(err, AggregateError::CapacityExceeded { name: "collect".into(), limit: 2 });
        assert_eq!(b.extract(), vec!["a", "b"]);

        // a null never counts against the cap
        b.ingest(None).unwrap();
    }

    #[test]
    fn capped_fail_rejects_whole_merge() {
        let mut b = CollectBuffer::with_config(CollectConfig::capped(3, OverflowPolicy::Fail));
        b.ingest(Some(&s("a"))).unwrap();
        assert!(b.merge_from(&[s("b"), s("c"), s("d")]).is_err());
        assert_eq!(b.extract(), vec!["a"]);
    }

    #[test]
    fn capped_truncate_keeps_prefix() {
        let mut b = CollectBuffer::with_config(CollectConfig::capped(3, OverflowPolicy::Truncate));
        b.ingest(Some(&s("a"))).unwrap();
        b.merge_from(&[s("b"), s("c"), s("d")]).unwrap();
        b.ingest(Some(&s("e"))).unwrap();
        b.merge_nullable([None, Some(&s("f"))]).unwrap();
        assert_eq!(b.extract(), vec!["a", "b", "c"]);
        assert!(b.is_truncated());

        b.reset();
        assert!(!b.is_truncated());
        b.ingest(Some(&s("g"))).unwrap();
        assert_eq!(b.extract(), vec!["g"]);
    }

    #[test]
    fn unbounded_by_default() {
        let mut b: CollectBuffer<u32> = CollectBuffer::default();
        for i in 0..10_000 {
            b.ingest(Some(&i)).unwrap();
        }
        assert_eq!(b.len(), 10_000);
        assert!(!b.is_truncated());
        assert_eq!(b.config(), &CollectConfig::unbounded());
    }
}
