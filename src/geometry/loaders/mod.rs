//! 模型加载器模块
//!
//! 提供统一的模型加载接口和具体格式实现。
//!
//! # 支持的格式
//!
//! - **OBJ**: 行式文本格式（手写扫描器，仅顶点与面）
//!
//! # 使用示例
//!
//! ```rust,no_run
//! use wireview::geometry::loaders::{MeshLoader, ObjLoader};
//! use std::path::Path;
//!
//! let mesh = ObjLoader::load_from_file(Path::new("model.obj"))?;
//! # Ok::<(), wireview::core::error::WireViewError>(())
//! ```

use crate::core::error::{MeshLoadError, Result, WireViewError};
use crate::geometry::mesh::MeshData;
use std::path::Path;

pub mod obj_loader;

// 重新导出加载器
pub use obj_loader::ObjLoader;

/// 网格加载器 trait
///
/// 定义统一的加载接口，所有格式的加载器都实现此 trait。
/// 这种设计允许轻松添加新的文件格式支持。
///
/// # 实现要求
///
/// - 加载器应该是无状态的（使用静态方法）
/// - 返回 CPU 侧的 `MeshData`，不涉及 GPU 资源
/// - 任何解析错误都使整次加载失败，不提交部分数据
pub trait MeshLoader {
    /// 从文件路径加载网格
    ///
    /// # 错误
    ///
    /// - 文件不存在或无法读取
    /// - 文件为空
    /// - 文件格式错误或损坏
    fn load_from_file(path: &Path) -> Result<MeshData>;

    /// 从内存数据加载网格
    fn load_from_memory(data: &[u8]) -> Result<MeshData>;

    /// 获取支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

/// 根据文件扩展名选择合适的加载器
///
/// # 返回
///
/// - `Ok(MeshData)`: 成功加载
/// - `Err(WireViewError)`: 不支持的格式或加载失败
pub fn load_mesh(path: &Path) -> Result<MeshData> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| {
            WireViewError::MeshLoading(MeshLoadError::UnsupportedFormat(
                "unable to determine file extension".to_string(),
            ))
        })?;

    match extension.as_str() {
        "obj" => ObjLoader::load_from_file(path),
        _ => Err(WireViewError::MeshLoading(MeshLoadError::UnsupportedFormat(
            format!("unsupported mesh format: .{}", extension),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        let obj_exts = ObjLoader::supported_extensions();
        assert!(obj_exts.contains(&"obj"));
    }

    #[test]
    fn test_load_mesh_unknown_extension() {
        let result = load_mesh(Path::new("model.stl"));
        assert!(matches!(
            result,
            Err(WireViewError::MeshLoading(MeshLoadError::UnsupportedFormat(_)))
        ));
    }
}
