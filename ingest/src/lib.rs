pub mod catalog;
pub mod results;
pub mod scheduler;
pub mod storage;
pub mod worker;

mod config;
pub use config::{Config, LogLevel};

mod error;
pub use error::IngestError;
