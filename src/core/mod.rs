//! 核心功能模块
//!
//! 本模块提供了查看器的基础功能，包括配置管理、日志系统和错误处理。
//! 这些模块独立于具体的几何算法，可以在任何前端中使用。
//!
//! # 模块组织
//!
//! - `config`：配置管理，支持从 TOML 配置文件加载显示设置
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `error`：错误处理，定义统一的错误类型

pub mod config;
pub mod error;
pub mod log;

// 重新导出常用类型，方便使用
pub use config::{Config, ProjectionKind};
pub use error::{MeshLoadError, Result, WireViewError};
