pub mod config;
pub mod core;
pub mod directory;
pub mod error;
pub mod graph;
pub mod index;
pub mod query;
pub mod stats;

pub use directory::Directory;
pub use error::{ConfigError, DirectoryError, GraphError};
