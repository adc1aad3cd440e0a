//! 错误处理模块
//!
//! 定义了查看器核心使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 为每种错误类型提供清晰的上下文信息
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理
//! - 解析错误是"粘性"的：首个错误立即终止本次加载，
//!   部分缓冲一律丢弃，不会暴露半成品网格

use std::fmt;
use std::path::PathBuf;

/// 查看器统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, WireViewError>;

/// WireView 核心的错误类型
///
/// 包含了核心运行过程中可能遇到的各种错误情况。
#[derive(Debug)]
pub enum WireViewError {
    /// 配置错误
    Config(ConfigError),

    /// 网格加载错误
    MeshLoading(MeshLoadError),

    /// IO 错误
    Io(std::io::Error),

    /// 日志系统错误
    Log(String),

    /// 运行时错误
    Runtime(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 网格加载相关的错误
///
/// 变体与文本格式的错误码一一对应：
/// 文件不存在、空文件、结构性残缺的行（数字/索引 token 过少）、
/// 非法顶点数据、非法面引用。任一错误都会使整次加载失败。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshLoadError {
    /// 文件不存在或无法打开
    FileNotFound(PathBuf),

    /// 文件为空（零字节）
    EmptyFile,

    /// 行结构残缺：顶点行数字不足 3 个，或面行索引不足 3 个
    Malformed(String),

    /// 顶点数据非法：顶点行含无法解析的 token、数字超过 4 个，
    /// 或面引用解析时顶点表为空
    InvalidVertex(String),

    /// 面引用非法：引用了 1 基方案中不存在的索引 0，
    /// 或负向引用越过了顶点表起点
    InvalidFace(String),

    /// 不支持的文件格式
    UnsupportedFormat(String),

    /// 数据验证失败
    ValidationError(String),
}

impl fmt::Display for WireViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireViewError::Config(e) => write!(f, "Configuration error: {}", e),
            WireViewError::MeshLoading(e) => write!(f, "Mesh loading error: {}", e),
            WireViewError::Io(e) => write!(f, "IO error: {}", e),
            WireViewError::Log(msg) => write!(f, "Log error: {}", msg),
            WireViewError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::FileNotFound(path) => {
                write!(f, "Mesh file not found: {}", path.display())
            }
            MeshLoadError::EmptyFile => write!(f, "Mesh file is empty"),
            MeshLoadError::Malformed(msg) => write!(f, "Malformed line: {}", msg),
            MeshLoadError::InvalidVertex(msg) => write!(f, "Invalid vertex data: {}", msg),
            MeshLoadError::InvalidFace(msg) => write!(f, "Invalid face reference: {}", msg),
            MeshLoadError::UnsupportedFormat(msg) => write!(f, "Unsupported mesh format: {}", msg),
            MeshLoadError::ValidationError(msg) => write!(f, "Mesh validation failed: {}", msg),
        }
    }
}

impl std::error::Error for WireViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WireViewError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for MeshLoadError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for WireViewError {
    fn from(err: std::io::Error) -> Self {
        WireViewError::Io(err)
    }
}

impl From<ConfigError> for WireViewError {
    fn from(err: ConfigError) -> Self {
        WireViewError::Config(err)
    }
}

impl From<MeshLoadError> for WireViewError {
    fn from(err: MeshLoadError) -> Self {
        WireViewError::MeshLoading(err)
    }
}
