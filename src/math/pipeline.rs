//! 顶点变换管线模块
//!
//! 将三维点升为齐次四维点，对每个顶点应用组合好的变换矩阵，
//! 并执行透视除法，得到可供渲染协作方直接使用的裁剪空间坐标。
//!
//! # 前置条件
//!
//! 透视除法不对 w=0 做保护：调用方必须保证传入的投影矩阵
//! 构造良好（本 crate 的相机编排满足该条件）。

use super::generator::mult;
use super::{Matrix4x4, Vector3, Vector4};

/// 将三维点升为齐次四维点（w = 1）
#[inline]
pub fn promote(v: Vector3) -> Vector4 {
    Vector4::new(v.x, v.y, v.z, 1.0)
}

/// 对单个齐次顶点应用变换矩阵
///
/// 通过通用 4×1 乘法计算 `M · v`，随后以结果的 w 做透视除法，
/// 并把 w 归一为 1。
pub fn transform_one(vertex: Vector4, matrix: &Matrix4x4) -> Vector4 {
    let mut result = Vector4::default();
    mult(4, 1, 4, matrix.as_slice(), vertex.as_array(), result.as_array_mut());
    result.x /= result.w;
    result.y /= result.w;
    result.z /= result.w;
    result.w = 1.0;
    result
}

/// 对顶点数组逐个应用变换矩阵
///
/// 元素之间没有数据依赖，顺序保持与输入一致。
pub fn transform_all(vertices: &[Vector4], matrix: &Matrix4x4) -> Vec<Vector4> {
    vertices
        .iter()
        .map(|&v| transform_one(v, matrix))
        .collect()
}
