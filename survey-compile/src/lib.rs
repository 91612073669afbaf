//! Library side of the `survey-compile` binary.

pub mod cli;
pub mod commands;
pub mod logging;
