//! 几何体加载和处理模块
//!
//! 提供行式文本格式的网格加载、索引三角化与几何归一化。
//!
//! # 模块结构
//!
//! - `mesh`: 网格数据结构与归一化
//! - `loaders`: 各种格式的模型加载器
//!
//! # 架构设计
//!
//! ```text
//! 文件 (OBJ 文本)
//!     ↓
//! Loader (ObjLoader: 扫描 + 扇形三角化 + 索引解析)
//!     ↓
//! MeshData (CPU 侧数据，归一化后派生齐次顶点)
//!     ↓
//! Viewer (软件变换管线 → 渲染协作方)
//! ```

pub mod loaders;
pub mod mesh;

// 重新导出常用类型
pub use mesh::MeshData;
