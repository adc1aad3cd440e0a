//! WireView - 线框查看器核心
//!
//! WireView 把行式文本格式的多边形网格描述解析为索引三角网格，
//! 将几何归一化到规范立方体内，并提供把顶点经
//! 模型/视图/投影矩阵变换到裁剪空间齐次坐标的软件管线。
//! 窗口/GL/输入等协作方不在本 crate 内，它们只消费这里暴露的
//! 只读缓冲并推入变换参数。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（配置、日志、错误处理）
//! - `geometry`: 几何模块（网格数据、OBJ 加载器、归一化）
//! - `math`: 数学模块（向量、行主序 4×4 矩阵、矩阵构造、变换管线）
//! - `viewer`: 查看器状态（变换参数、相机矩阵、变换结果缓冲）
//!
//! # 使用示例
//!
//! ```no_run
//! use wireview::core::config::ProjectionKind;
//! use wireview::viewer::Viewer;
//!
//! let mut viewer = Viewer::new(ProjectionKind::Parallel);
//! viewer.load_model("model.obj")?;
//! viewer.set_scale(1.5);
//! viewer.update();
//! println!("变换了 {} 个顶点", viewer.transformed().len());
//! # Ok::<(), wireview::core::error::WireViewError>(())
//! ```

pub mod core;
pub mod geometry;
pub mod math;
pub mod viewer;

pub use crate::core::{Config, MeshLoadError, ProjectionKind, Result, WireViewError};
pub use crate::geometry::MeshData;
pub use crate::math::{Matrix4x4, Vector3, Vector4};
pub use crate::viewer::Viewer;
