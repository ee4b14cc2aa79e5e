/// Produces an independent copy of an element handed over by the engine.
///
/// The buffer never stores the caller's value directly: every ingested or
/// merged element goes through `copy_element` first, so the engine is free to
/// reuse or overwrite its own row storage once the call returns.
pub trait ElementCopier<V> {
    fn copy_element(&self, value: &V) -> V;
}

/// Copies through `Clone`. For owned types such as `String`, `Vec<T>` or
/// `serde_json::Value` this is a deep copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloneCopier;

impl<V: Clone> ElementCopier<V> for CloneCopier {
    fn copy_element(&self, value: &V) -> V {
        value.clone()
    }
}

/// Adapts a plain function or closure into an [`ElementCopier`].
///
/// Useful when the element type is a borrowed or shared view (an `Rc`, an
/// interned handle, ...) whose `Clone` would only copy the handle.
#[derive(Clone, Copy)]
pub struct FnCopier<F>(pub F);

impl<V, F> ElementCopier<V> for FnCopier<F>
where
    F: Fn(&V) -> V,
{
    fn copy_element(&self, value: &V) -> V {
        (self.0)(value)
    }
}

impl<F> std::fmt::Debug for FnCopier<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnCopier")
    }
}
