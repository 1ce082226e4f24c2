//! Adapters layer: Concrete implementations of ports and I/O helpers.
//!
//! - `json_input`: patient forms and scan findings as JSON
//! - `placeholder`: fixed-output stand-in for an imaging classifier
//! - `redact`: identifier filtering for logs

pub mod json_input;
pub mod placeholder;
pub mod redact;
