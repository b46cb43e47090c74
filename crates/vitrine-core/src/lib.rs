pub mod config;
pub mod content;
pub mod error;
pub mod marquee;
pub mod scheduler;

pub use config::AppConfig;
pub use error::{Error, Result};
