//! Ports layer: Trait definitions for external collaborators.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the rule engine and systems it does not own.

mod scan_classifier;

pub use scan_classifier::ScanClassifier;
