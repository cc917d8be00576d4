pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod generator;
pub mod logging;
pub mod output;
pub mod ui;
pub mod versions;

pub use error::{GeneratorError, Result};
