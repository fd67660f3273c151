//! Application layer - orchestrates the domain services through the
//! ports, without knowing about concrete adapters.

pub mod dto;
pub mod use_cases;
