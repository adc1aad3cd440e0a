//! 配置管理模块
//!
//! 提供查看器显示设置的加载、解析和保存功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//! 颜色/线型等显示设置也归于此处，以文本配置代替二进制持久化。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [viewer]
//! projection = "parallel"   # 或 "central"
//! line_type = "solid"       # 或 "dotted"
//! line_width = 1.0
//! vertex_display = "none"   # none, circle, square
//! vertex_size = 5.0
//!
//! [colors]
//! background = [0.0, 0.0, 0.0]
//! line = [1.0, 1.0, 1.0]
//! vertices = [1.0, 0.0, 0.0]
//!
//! [logging]
//! level = "info"            # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};

/// 查看器配置
///
/// 包含了查看器运行所需的所有设置项。
/// 可以从配置文件加载，也可以通过代码构建。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 显示设置
    #[serde(default)]
    pub viewer: ViewerConfig,

    /// 颜色设置
    #[serde(default)]
    pub colors: ColorConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 显示设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// 投影类型
    #[serde(default = "default_projection")]
    pub projection: ProjectionKind,

    /// 线型
    #[serde(default = "default_line_type")]
    pub line_type: LineType,

    /// 线宽
    #[serde(default = "default_line_width")]
    pub line_width: f32,

    /// 顶点显示方式
    #[serde(default = "default_vertex_display")]
    pub vertex_display: VertexDisplay,

    /// 顶点尺寸
    #[serde(default = "default_vertex_size")]
    pub vertex_size: f32,
}

/// 投影类型
///
/// `Central` 使用单位 View/Projection 矩阵；`Parallel` 使用
/// 固定视锥体加 z 轴平移的相机（与变换管线的相机编排一致）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    /// 中心投影
    Central,
    /// 平行投影
    Parallel,
}

/// 线型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    /// 实线
    Solid,
    /// 点线
    Dotted,
}

/// 顶点显示方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VertexDisplay {
    /// 不显示顶点
    None,
    /// 圆点
    Circle,
    /// 方点
    Square,
}

/// 颜色设置（RGB，范围 0.0-1.0）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    /// 背景色
    #[serde(default = "default_background")]
    pub background: [f32; 3],

    /// 线条颜色
    #[serde(default = "default_line_color")]
    pub line: [f32; 3],

    /// 顶点颜色
    #[serde(default = "default_vertices_color")]
    pub vertices: [f32; 3],
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_projection() -> ProjectionKind { ProjectionKind::Parallel }
fn default_line_type() -> LineType { LineType::Solid }
fn default_line_width() -> f32 { 1.0 }
fn default_vertex_display() -> VertexDisplay { VertexDisplay::None }
fn default_vertex_size() -> f32 { 5.0 }
fn default_background() -> [f32; 3] { [0.0, 0.0, 0.0] }
fn default_line_color() -> [f32; 3] { [1.0, 1.0, 1.0] }
fn default_vertices_color() -> [f32; 3] { [1.0, 0.0, 0.0] }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "wireview.log".to_string() }

impl Default for Config {
    fn default() -> Self {
        Self {
            viewer: ViewerConfig::default(),
            colors: ColorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            projection: default_projection(),
            line_type: default_line_type(),
            line_width: default_line_width(),
            vertex_display: default_vertex_display(),
            vertex_size: default_vertex_size(),
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            line: default_line_color(),
            vertices: default_vertices_color(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    ///
    /// 成功返回 `Config` 实例，失败返回错误
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// # 说明
    ///
    /// 支持的参数：
    /// - `--central`: 使用中心投影
    /// - `--parallel`: 使用平行投影
    /// - `--line-width <value>`: 设置线宽
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if args.iter().any(|a| a == "--central") {
            self.viewer.projection = ProjectionKind::Central;
        }

        if args.iter().any(|a| a == "--parallel") {
            self.viewer.projection = ProjectionKind::Parallel;
        }

        if let Some(idx) = args.iter().position(|a| a == "--line-width") {
            if let Some(width_str) = args.get(idx + 1) {
                if let Ok(width) = width_str.parse() {
                    self.viewer.line_width = width;
                }
            }
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.viewer.line_width <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "viewer.line_width".to_string(),
                reason: "Line width must be greater than 0".to_string(),
            }
            .into());
        }

        if self.viewer.vertex_size <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "viewer.vertex_size".to_string(),
                reason: "Vertex size must be greater than 0".to_string(),
            }
            .into());
        }

        for (name, color) in [
            ("colors.background", &self.colors.background),
            ("colors.line", &self.colors.line),
            ("colors.vertices", &self.colors.vertices),
        ] {
            if color.iter().any(|&c| !(0.0..=1.0).contains(&c)) {
                return Err(ConfigError::InvalidValue {
                    field: name.to_string(),
                    reason: "Color components must be in [0.0, 1.0]".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

impl ViewerConfig {
    /// 线条是否以点画模式绘制
    pub fn stipple_lines(&self) -> bool {
        matches!(self.line_type, LineType::Dotted)
    }

    /// 顶点是否以平滑（圆形）点绘制
    pub fn smooth_vertices(&self) -> bool {
        !matches!(self.vertex_display, VertexDisplay::Square)
    }

    /// 是否绘制顶点
    pub fn draw_vertices(&self) -> bool {
        !matches!(self.vertex_display, VertexDisplay::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.viewer.projection, ProjectionKind::Parallel);
        assert_eq!(config.viewer.line_type, LineType::Solid);
        assert_eq!(config.colors.background, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.viewer.line_width = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_colors() {
        let mut config = Config::default();
        config.colors.line = [1.5, 0.0, 0.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_args_projection() {
        let mut config = Config::default();
        config.apply_args(["--central"]);
        assert_eq!(config.viewer.projection, ProjectionKind::Central);

        config.apply_args(["--parallel"]);
        assert_eq!(config.viewer.projection, ProjectionKind::Parallel);
    }

    #[test]
    fn test_apply_args_line_width() {
        let mut config = Config::default();
        config.apply_args(["--line-width", "2.5"]);
        assert!((config.viewer.line_width - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [viewer]
            projection = "central"
            vertex_display = "circle"

            [logging]
            level = "debug"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.viewer.projection, ProjectionKind::Central);
        assert_eq!(config.viewer.vertex_display, VertexDisplay::Circle);
        assert_eq!(config.logging.level, LogLevel::Debug);
        // 未出现的字段取默认值
        assert!((config.viewer.line_width - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_display_predicates() {
        let mut viewer = ViewerConfig::default();
        assert!(!viewer.stipple_lines());
        assert!(!viewer.draw_vertices());
        assert!(viewer.smooth_vertices());

        viewer.line_type = LineType::Dotted;
        viewer.vertex_display = VertexDisplay::Square;
        assert!(viewer.stipple_lines());
        assert!(viewer.draw_vertices());
        assert!(!viewer.smooth_vertices());
    }
}
