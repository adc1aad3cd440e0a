//! 网格数据结构模块
//!
//! 定义 CPU 侧的网格数据容器，用于存储从文件解析出的索引三角网格，
//! 以及把几何归一化到规范立方体内的处理。

use crate::math::pipeline::promote;
use crate::math::{Vector3, Vector4, MINIMIZE_FACTOR};

/// CPU 侧网格数据
///
/// 存储从文件解析出的网格：三维顶点、派生的齐次四维顶点和三角形索引。
/// 这是一个简单的数据持有者，不包含 GPU 资源；加载成功后整体提交，
/// 重新加载时整体替换。
///
/// # 不变式
///
/// - `indices.len()` 是 3 的倍数（每 3 个索引为一个三角形）
/// - 索引解析完成后，所有 `indices[i] < vertex_count`
/// - `vertices4d` 与 `vertices3d` 一一对应（w = 1），
///   归一化之后需调用 [`MeshData::rebuild_homogeneous`] 重建
///
/// # 示例
///
/// ```rust
/// use wireview::geometry::mesh::MeshData;
/// use wireview::math::Vector3;
///
/// let mut mesh = MeshData::new();
/// mesh.vertices3d = vec![
///     Vector3::new(0.0, 0.0, 0.0),
///     Vector3::new(1.0, 0.0, 0.0),
///     Vector3::new(0.0, 1.0, 0.0),
/// ];
/// mesh.indices = vec![0, 1, 2];
/// mesh.rebuild_homogeneous();
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// 三维顶点数组（文件顺序）
    pub vertices3d: Vec<Vector3>,

    /// 齐次四维顶点数组
    ///
    /// 由 `vertices3d` 逐一派生（w = 1），供变换管线消费。
    pub vertices4d: Vec<Vector4>,

    /// 索引数组
    ///
    /// 三角形顶点索引，每 3 个索引定义一个三角形。
    /// 使用 32 位索引以支持超过 65535 个顶点的模型。
    pub indices: Vec<u32>,

    /// 网格名称（可选）
    ///
    /// 从文件名推导，用于调试和识别。
    pub name: Option<String>,
}

impl MeshData {
    /// 创建一个空的网格数据
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建一个指定名称的空网格数据
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices3d.len()
    }

    /// 获取索引数量
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// 获取三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 验证网格数据的有效性
    ///
    /// 检查：
    /// - 索引数量是 3 的倍数（每个三角形 3 个顶点）
    /// - 所有索引都在有效范围内
    /// - 齐次顶点数组与三维顶点数组等长（或尚未生成）
    pub fn validate(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err(format!(
                "index count must be a multiple of 3, got {}",
                self.indices.len()
            ));
        }

        let vertex_count = self.vertices3d.len() as u32;
        for (i, &index) in self.indices.iter().enumerate() {
            if index >= vertex_count {
                return Err(format!(
                    "index {} at position {} exceeds vertex count {}",
                    index, i, vertex_count
                ));
            }
        }

        if !self.vertices4d.is_empty() && self.vertices4d.len() != self.vertices3d.len() {
            return Err(format!(
                "homogeneous vertex count {} does not match vertex count {}",
                self.vertices4d.len(),
                self.vertices3d.len()
            ));
        }

        Ok(())
    }

    /// 几何归一化：把点云整体居中并缩入规范立方体
    ///
    /// 1. 计算各轴的最小/最大值
    /// 2. 取全部坐标绝对值的总体最大值
    /// 3. 若总体最大值超过 1，则每个坐标先减去该轴中点、
    ///    再除以总体最大值并乘以 [`MINIMIZE_FACTOR`]
    ///
    /// 已在立方体内（总体最大值 ≤ 1）的几何保持原样，
    /// 因此本操作是幂等的；零顶点时为空操作。
    /// 归一化后每个坐标都落在 `[-0.95, 0.95]` 内。
    pub fn normalize(&mut self) {
        let first = match self.vertices3d.first() {
            Some(v) => *v,
            None => return,
        };

        let (mut min_x, mut max_x) = (first.x, first.x);
        let (mut min_y, mut max_y) = (first.y, first.y);
        let (mut min_z, mut max_z) = (first.z, first.z);

        for v in &self.vertices3d[1..] {
            max_x = max_x.max(v.x);
            min_x = min_x.min(v.x);
            max_y = max_y.max(v.y);
            min_y = min_y.min(v.y);
            max_z = max_z.max(v.z);
            min_z = min_z.min(v.z);
        }

        let all_max = max_x.max(max_y).max(max_z);
        let all_min = min_x.min(min_y).min(min_z);
        let all_max_abs = all_max.abs().max(all_min.abs());

        if all_max_abs <= 1.0 {
            return;
        }

        // 先居中，再缩到 (-1..1)，最后略微收缩
        let center = Vector3::new(
            (max_x + min_x) / 2.0,
            (max_y + min_y) / 2.0,
            (max_z + min_z) / 2.0,
        );
        for v in &mut self.vertices3d {
            v.x = (v.x - center.x) / all_max_abs * MINIMIZE_FACTOR;
            v.y = (v.y - center.y) / all_max_abs * MINIMIZE_FACTOR;
            v.z = (v.z - center.z) / all_max_abs * MINIMIZE_FACTOR;
        }
    }

    /// 从三维顶点重建齐次四维顶点数组（w = 1）
    pub fn rebuild_homogeneous(&mut self) {
        self.vertices4d = self.vertices3d.iter().map(|&v| promote(v)).collect();
    }

    /// 清空所有数据
    pub fn clear(&mut self) {
        self.vertices3d.clear();
        self.vertices4d.clear();
        self.indices.clear();
        self.name = None;
    }
}
