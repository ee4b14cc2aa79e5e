pub mod delimited_source;
pub use delimited_source::*;
