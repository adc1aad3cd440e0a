//! 数学类型模块
//!
//! 定义软件变换管线使用的基础值类型：三维/齐次四维向量与行主序 4×4 矩阵。
//! 内存布局与 GPU 兼容，使用 `#[repr(C)]` 保证顺序和对齐，
//! 渲染协作方可以通过 `bytemuck` 按原始字节读取顶点与矩阵缓冲。
//!
//! # 模块组织
//!
//! - 基础类型：`Vector3`、`Vector4`、`Matrix4x4`
//! - `generator`：矩阵构造函数（缩放/旋转/平移/单位/视锥体）与通用乘法
//! - `pipeline`：顶点升维、单点变换与批量变换
//!
//! # 约定
//!
//! - 矩阵为行主序存储，默认构造为全零（单位矩阵需显式请求）
//! - 向量分量可按下标访问：0=x, 1=y, 2=z（Vector4 额外有 3=w）

use bytemuck::{Pod, Zeroable};
use std::ops::{Index, IndexMut};

pub mod generator;
pub mod pipeline;

/// 几何缩放因子：归一化后坐标被压入 ±MINIMIZE_FACTOR 的立方体内
pub const MINIMIZE_FACTOR: f32 = 0.95;

/// 三维点/向量
///
/// # 内存布局
///
/// 12 bytes（3 × f32），`#[repr(C)]`，可安全按字节转换。
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    /// 创建一个新的三维向量
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Index<usize> for Vector3 {
    type Output = f32;

    fn index(&self, col: usize) -> &f32 {
        match col {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3 index out of range: {}", col),
        }
    }
}

impl IndexMut<usize> for Vector3 {
    fn index_mut(&mut self, col: usize) -> &mut f32 {
        match col {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vector3 index out of range: {}", col),
        }
    }
}

/// 齐次四维点
///
/// w 分量驱动透视除法；除 w 外与 `Vector3` 同构。
///
/// # 内存布局
///
/// 16 bytes（4 × f32），`#[repr(C)]`。
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    /// 创建一个新的齐次四维向量
    #[inline]
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// 以 `[f32; 4]` 视图访问分量
    #[inline]
    pub fn as_array(&self) -> &[f32; 4] {
        bytemuck::cast_ref(self)
    }

    /// 以可变 `[f32; 4]` 视图访问分量
    #[inline]
    pub fn as_array_mut(&mut self) -> &mut [f32; 4] {
        bytemuck::cast_mut(self)
    }
}

impl Index<usize> for Vector4 {
    type Output = f32;

    fn index(&self, col: usize) -> &f32 {
        match col {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Vector4 index out of range: {}", col),
        }
    }
}

impl IndexMut<usize> for Vector4 {
    fn index_mut(&mut self, col: usize) -> &mut f32 {
        match col {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Vector4 index out of range: {}", col),
        }
    }
}

/// 行主序 4×4 矩阵
///
/// 默认构造为全零矩阵（不是单位矩阵！），
/// 单位矩阵需要显式调用 [`generator::identity`]。
///
/// # 内存布局
///
/// 64 bytes（16 × f32），`#[repr(C)]`，行主序。
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Matrix4x4 {
    rows: [[f32; 4]; 4],
}

impl Matrix4x4 {
    /// 创建全零矩阵
    #[inline]
    pub fn zeros() -> Self {
        Self::default()
    }

    /// 以扁平 `[f32; 16]` 视图访问元素（行主序）
    #[inline]
    pub fn as_slice(&self) -> &[f32; 16] {
        bytemuck::cast_ref(&self.rows)
    }

    /// 以可变扁平 `[f32; 16]` 视图访问元素（行主序）
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32; 16] {
        bytemuck::cast_mut(&mut self.rows)
    }
}

impl Index<(usize, usize)> for Matrix4x4 {
    type Output = f32;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.rows[row][col]
    }
}

impl IndexMut<(usize, usize)> for Matrix4x4 {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.rows[row][col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_layout_sizes() {
        // 渲染协作方按原始字节读取，布局固定
        assert_eq!(size_of::<Vector3>(), 12);
        assert_eq!(size_of::<Vector4>(), 16);
        assert_eq!(size_of::<Matrix4x4>(), 64);
    }

    #[test]
    fn test_vector_indexing() {
        let mut v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[2], 3.0);
        v[1] = 5.0;
        assert_eq!(v.y, 5.0);

        let h = Vector4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(h[3], 4.0);
        assert_eq!(h.as_array(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_matrix_default_is_zero() {
        // 默认矩阵是全零，不是单位矩阵
        let m = Matrix4x4::default();
        assert!(m.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_matrix_indexing_row_major() {
        let mut m = Matrix4x4::zeros();
        m[(1, 2)] = 7.0;
        assert_eq!(m.as_slice()[1 * 4 + 2], 7.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_vector3_index_out_of_range() {
        let v = Vector3::default();
        let _ = v[3];
    }
}
