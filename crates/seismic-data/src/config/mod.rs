//! Evaluation configuration

pub mod evaluation;

pub use evaluation::*;
