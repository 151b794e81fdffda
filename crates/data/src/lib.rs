//! Product registry loading and validation.

pub mod load;
pub mod registry;
pub mod schema;

pub use load::*;
pub use registry::*;
pub use schema::*;
