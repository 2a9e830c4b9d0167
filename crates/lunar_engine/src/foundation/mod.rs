//! Foundation utilities and types
//!
//! Math aliases and helpers, handle-keyed collections and logging setup shared
//! by every other module.

pub mod collections;
pub mod logging;
pub mod math;
