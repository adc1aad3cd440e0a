//! 矩阵构造模块
//!
//! 提供变换管线需要的全部 4×4 矩阵构造函数（缩放、绕轴旋转、平移、
//! 单位矩阵、视锥体透视矩阵）以及行主序矩阵乘法。
//! 全部为无共享状态的纯函数。
//!
//! # 约定
//!
//! - 右手坐标系的标准绕轴旋转
//! - `rotation_xyz` 固定按 X·Y·Z 的顺序组合（X 在乘积链最左端）
//! - `mult` 是通用的 M×N×K 例程，同样用于 4×1 的顶点乘法

use super::{Matrix4x4, Vector3};

/// 生成单位矩阵
pub fn identity() -> Matrix4x4 {
    let mut result = Matrix4x4::zeros();
    result[(0, 0)] = 1.0;
    result[(1, 1)] = 1.0;
    result[(2, 2)] = 1.0;
    result[(3, 3)] = 1.0;
    result
}

/// 生成缩放矩阵
pub fn scale(x_scale: f32, y_scale: f32, z_scale: f32) -> Matrix4x4 {
    let mut result = Matrix4x4::zeros();
    result[(0, 0)] = x_scale;
    result[(1, 1)] = y_scale;
    result[(2, 2)] = z_scale;
    result[(3, 3)] = 1.0;
    result
}

/// 生成绕 X 轴旋转矩阵
pub fn rotation_x(angle: f32) -> Matrix4x4 {
    let mut result = Matrix4x4::zeros();
    result[(0, 0)] = 1.0;
    result[(1, 1)] = angle.cos();
    result[(1, 2)] = -angle.sin();
    result[(2, 1)] = angle.sin();
    result[(2, 2)] = angle.cos();
    result[(3, 3)] = 1.0;
    result
}

/// 生成绕 Y 轴旋转矩阵
pub fn rotation_y(angle: f32) -> Matrix4x4 {
    let mut result = Matrix4x4::zeros();
    result[(0, 0)] = angle.cos();
    result[(0, 2)] = angle.sin();
    result[(1, 1)] = 1.0;
    result[(2, 0)] = -angle.sin();
    result[(2, 2)] = angle.cos();
    result[(3, 3)] = 1.0;
    result
}

/// 生成绕 Z 轴旋转矩阵
pub fn rotation_z(angle: f32) -> Matrix4x4 {
    let mut result = Matrix4x4::zeros();
    result[(0, 0)] = angle.cos();
    result[(0, 1)] = -angle.sin();
    result[(1, 0)] = angle.sin();
    result[(1, 1)] = angle.cos();
    result[(2, 2)] = 1.0;
    result[(3, 3)] = 1.0;
    result
}

/// 生成绕三轴的组合旋转矩阵
///
/// 固定组合顺序：`rotation_x(ax) · rotation_y(ay) · rotation_z(az)`。
pub fn rotation_xyz(angle_x: f32, angle_y: f32, angle_z: f32) -> Matrix4x4 {
    let mut matrix = rotation_x(angle_x);
    matrix = multiply(&matrix, &rotation_y(angle_y));
    matrix = multiply(&matrix, &rotation_z(angle_z));
    matrix
}

/// 生成平移矩阵
///
/// 平移分量位于第 3 列的前三行。
pub fn translation(vec: Vector3) -> Matrix4x4 {
    let mut result = Matrix4x4::zeros();
    result[(0, 0)] = 1.0;
    result[(0, 3)] = vec.x;
    result[(1, 1)] = 1.0;
    result[(1, 3)] = vec.y;
    result[(2, 2)] = 1.0;
    result[(2, 3)] = vec.z;
    result[(3, 3)] = 1.0;
    result
}

/// 生成非对称视锥体透视矩阵
///
/// 布局沿用 OpenGL glFrustum 的系数排列（行主序），
/// 但 `[3][3]` 固定为 1（而非经典的 0）。
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Matrix4x4 {
    let a = (right + left) / (right - left);
    let b = (top + bottom) / (top - bottom);
    let c = -(far + near) / (far - near);
    let d = -2.0 * far * near / (far - near);
    let e = 2.0 * near / (right - left);
    let f = 2.0 * near / (top - bottom);

    let mut result = Matrix4x4::zeros();
    result[(0, 0)] = e;
    result[(0, 2)] = a;
    result[(1, 1)] = f;
    result[(1, 2)] = b;
    result[(2, 2)] = c;
    result[(2, 3)] = d;
    result[(3, 2)] = -1.0;
    result[(3, 3)] = 1.0;
    result
}

/// 行主序 4×4 矩阵乘法
pub fn multiply(first: &Matrix4x4, second: &Matrix4x4) -> Matrix4x4 {
    let mut result = Matrix4x4::zeros();
    mult(4, 4, 4, first.as_slice(), second.as_slice(), result.as_mut_slice());
    result
}

/// 通用的行主序矩阵乘法例程
///
/// `C[i][j] = Σ_k A[i][k] · B[k][j]`，其中 A 为 M×K，B 为 K×N，
/// C 为 M×N，全部按行主序扁平存储。顶点变换复用本例程（N=1）。
pub fn mult(m: usize, n: usize, k: usize, a: &[f32], b: &[f32], c: &mut [f32]) {
    debug_assert!(a.len() >= m * k);
    debug_assert!(b.len() >= k * n);
    debug_assert!(c.len() >= m * n);

    for i in 0..m {
        let row = &mut c[i * n..(i + 1) * n];
        for value in row.iter_mut() {
            *value = 0.0;
        }
        for kk in 0..k {
            let coeff = a[i * k + kk];
            let b_row = &b[kk * n..(kk + 1) * n];
            for (value, &b_val) in row.iter_mut().zip(b_row) {
                *value += coeff * b_val;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_identity_layout() {
        let m = identity();
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(m[(i, j)], expected);
            }
        }
    }

    #[test]
    fn test_scale_diagonal() {
        let m = scale(2.0, 3.0, 4.0);
        assert_eq!(m[(0, 0)], 2.0);
        assert_eq!(m[(1, 1)], 3.0);
        assert_eq!(m[(2, 2)], 4.0);
        assert_eq!(m[(3, 3)], 1.0);
        assert_eq!(m[(0, 1)], 0.0);
    }

    #[test]
    fn test_translation_column() {
        let m = translation(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(m[(0, 3)], 1.0);
        assert_eq!(m[(1, 3)], 2.0);
        assert_eq!(m[(2, 3)], 3.0);
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(3, 3)], 1.0);
    }

    #[test]
    fn test_rotation_x_half_turn() {
        let m = rotation_x(PI);
        assert!((m[(1, 1)] + 1.0).abs() < EPS);
        assert!((m[(2, 2)] + 1.0).abs() < EPS);
        assert!(m[(1, 2)].abs() < EPS);
        assert_eq!(m[(0, 0)], 1.0);
    }

    #[test]
    fn test_rotation_xyz_composition_order() {
        // 组合矩阵必须等于 X·Y·Z 的逐次乘积
        let (ax, ay, az) = (0.3, -0.7, 1.1);
        let composed = rotation_xyz(ax, ay, az);
        let expected = multiply(&multiply(&rotation_x(ax), &rotation_y(ay)), &rotation_z(az));
        for i in 0..4 {
            for j in 0..4 {
                assert!((composed[(i, j)] - expected[(i, j)]).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_frustum_layout() {
        let m = frustum(-0.065, 0.065, -0.065, 0.065, 0.1, 2.0);
        let e = 2.0 * 0.1 / 0.13;
        assert!((m[(0, 0)] - e).abs() < EPS);
        assert!((m[(1, 1)] - e).abs() < EPS);
        // 对称视锥体：A 与 B 为 0
        assert!(m[(0, 2)].abs() < EPS);
        assert!(m[(1, 2)].abs() < EPS);
        assert!((m[(2, 2)] - (-(2.0 + 0.1) / 1.9)).abs() < EPS);
        assert!((m[(2, 3)] - (-2.0 * 2.0 * 0.1 / 1.9)).abs() < EPS);
        assert_eq!(m[(3, 2)], -1.0);
        assert_eq!(m[(3, 3)], 1.0);
    }

    #[test]
    fn test_multiply_identity() {
        let t = translation(Vector3::new(1.0, -2.0, 3.0));
        let product = multiply(&identity(), &t);
        assert_eq!(product, t);
        let product = multiply(&t, &identity());
        assert_eq!(product, t);
    }

    #[test]
    fn test_mult_rectangular() {
        // 2×3 · 3×2 = 2×2
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
        let mut c = [0.0f32; 4];
        mult(2, 2, 3, &a, &b, &mut c);
        assert_eq!(c, [58.0, 64.0, 139.0, 154.0]);
    }
}
