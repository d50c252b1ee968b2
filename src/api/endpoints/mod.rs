//! API endpoint handlers.

pub mod analyze;
