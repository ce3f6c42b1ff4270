//! TOML 配置：默认位于 `<config_dir>/req-idx/config.toml`。
//!
//! ```toml
//! [log]
//! filter = "info"
//!
//! [jobs]
//! next = 5
//!
//! [graph]
//! unit = "km"
//!
//! # 可选：替换内置的五节点拓扑
//! [topology]
//! nodes = ["Durban North", "Glenwood"]
//! [[topology.edges]]
//! from = "Durban North"
//! to = "Glenwood"
//! distance = 5.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::seed::seed_topology;
use crate::error::ConfigError;
use crate::graph::{LocationGraph, Topology};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
    pub jobs: JobsConfig,
    pub graph: GraphConfig,
    pub topology: Option<Topology>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// tracing EnvFilter 指令；`RUST_LOG` 优先
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobsConfig {
    /// 未指定数量时 next-jobs 返回的条数
    pub next: usize,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self { next: 5 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// 报告中的距离单位
    pub unit: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            unit: "km".to_string(),
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("req-idx").join("config.toml"))
    }

    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 显式路径必须存在；默认路径不存在时回落到内置默认值
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&text, &path)
    }

    /// 配置的拓扑优先，否则使用内置拓扑
    pub fn location_graph(&self) -> Result<LocationGraph, ConfigError> {
        let Some(topology) = &self.topology else {
            return Ok(seed_topology().build()?);
        };
        topology.build().map_err(|e| {
            tracing::warn!("Rejected configured topology: {}", e);
            ConfigError::Topology(e)
        })
    }
}
