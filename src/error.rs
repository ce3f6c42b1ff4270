//! 错误类型：未找到（not-found）以值的形式返回，不 panic。

use std::path::PathBuf;

use crate::core::RecordId;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("node index {index} out of range (graph has {count} nodes)")]
    NodeOutOfRange { index: usize, count: usize },

    /// 边权必须是有限非负数
    #[error("invalid edge weight {0}")]
    InvalidWeight(f64),

    #[error("duplicate location label: {0}")]
    DuplicateLabel(String),

    #[error("unknown location label: {0}")]
    UnknownLabel(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("record not found: {0}")]
    RecordNotFound(RecordId),

    #[error("location not found: {0}")]
    LocationNotFound(String),

    #[error("duplicate record id: {0}")]
    DuplicateRecord(RecordId),

    /// 父记录必须已在目录中
    #[error("record {id} references unknown parent {parent}")]
    UnknownParent { id: RecordId, parent: RecordId },

    #[error("record {id} lists unknown dependent {dependent}")]
    UnknownDependent { id: RecordId, dependent: RecordId },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid topology in config: {0}")]
    Topology(#[from] GraphError),
}
