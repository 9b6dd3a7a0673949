pub mod config;
pub mod seed;
pub mod task;

pub use config::*;
pub use seed::*;
pub use task::*;
