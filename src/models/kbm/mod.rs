pub mod queries;
pub mod rollup;
pub mod types;

pub use queries::*;
pub use rollup::*;
pub use types::*;
