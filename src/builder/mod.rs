//! Fluent construction and validation of transition graphs.

mod error;
mod graph;

pub use error::ConfigurationError;
pub use graph::GraphBuilder;
