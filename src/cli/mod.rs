//! Command-line workflow, kept independent of argument parsing

pub mod orchestration;
