pub mod error;
pub mod result;

pub use error::SbomError;
pub use result::Result;
