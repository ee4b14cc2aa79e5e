pub mod json_primitive;
pub use json_primitive::*;
