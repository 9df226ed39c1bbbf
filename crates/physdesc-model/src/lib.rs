pub mod config;
pub mod manifest;

pub use config::*;
pub use manifest::*;
