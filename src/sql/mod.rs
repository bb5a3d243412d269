//! SQL for the champion tables: fixed statements plus a builder for partial updates.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
