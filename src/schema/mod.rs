//! Schema module - Configuration, seeding and scripting types for grids.

mod config;
mod script;
mod seed;

pub use config::*;
pub use script::*;
pub use seed::*;
