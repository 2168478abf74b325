pub mod aggregate;
pub mod queries;
pub mod types;

pub use aggregate::*;
pub use queries::*;
pub use types::*;
