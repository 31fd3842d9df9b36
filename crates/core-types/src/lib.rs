//! Shared record types for the course datasets.
//!
//! Field names follow Rust conventions; the serde attributes map them onto the
//! original CSV headers (e.g. `Annual Income (k$)`).

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::Gender;
pub use error::CoreError;
pub use structs::{MallCustomer, Restaurant};
