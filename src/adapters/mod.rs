//! Adapters - concrete implementations of the ports.

pub mod outbound;
pub mod scanners;
