pub mod collect_impl;
pub use collect_impl::*;
