pub mod collector;
pub mod config;
pub mod error;
pub mod matching;
pub mod namespace;
pub mod report;
pub mod result;
pub mod runner;
pub mod service;
pub mod types;
pub mod workflow;

pub use collector::ResultCollector;
pub use error::{E2eError, Result};
pub use result::CommandResult;
pub use runner::CommandRunner;
