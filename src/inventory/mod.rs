//! The component-graph canonicalizer: domain model plus the pure
//! services that turn a scanned forest into a well-formed document.

pub mod domain;
pub mod services;
