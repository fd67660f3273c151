pub mod console;
pub mod filesystem;
pub mod formatters;
pub mod system;
