//! 查看器状态模块
//!
//! 持有已加载的网格、四个变换参数（旋转角、缩放、平移、投影类型）
//! 与相机矩阵，负责把模型矩阵编译出来并驱动顶点变换管线，
//! 向渲染协作方暴露只读的顶点/索引/变换结果缓冲。
//!
//! # 生命周期
//!
//! 重新加载时先整体释放旧网格，再发布新网格；任何解析错误都
//! 保持"无已提交网格"的状态，并把错误粘性地记录下来供查询。

use std::path::Path;

use crate::core::config::ProjectionKind;
use crate::core::error::{MeshLoadError, Result, WireViewError};
use crate::geometry::loaders::load_mesh;
use crate::geometry::mesh::MeshData;
use crate::math::generator::{self, multiply};
use crate::math::pipeline::transform_all;
use crate::math::{Matrix4x4, Vector3, Vector4};

/// 平行投影使用的视锥体参数
const FRUSTUM_EXTENT: f32 = 0.065;
const FRUSTUM_NEAR: f32 = 0.1;
const FRUSTUM_FAR: f32 = 2.0;

/// 查看器状态
///
/// 渲染协作方的唯一入口：加载/替换模型、推入变换参数、
/// 读取变换后的顶点缓冲。
pub struct Viewer {
    mesh: Option<MeshData>,
    transformed: Vec<Vector4>,

    rotation_angles: Vector3,
    scale: f32,
    translation: Vector3,
    projection: ProjectionKind,

    view_matrix: Matrix4x4,
    projection_matrix: Matrix4x4,

    last_error: Option<MeshLoadError>,
}

impl Viewer {
    /// 创建一个新的查看器
    pub fn new(projection: ProjectionKind) -> Self {
        let mut viewer = Self {
            mesh: None,
            transformed: Vec::new(),
            rotation_angles: Vector3::default(),
            scale: 1.0,
            translation: Vector3::default(),
            projection,
            view_matrix: generator::identity(),
            projection_matrix: generator::identity(),
            last_error: None,
        };
        viewer.set_camera();
        viewer
    }

    /// 加载（或替换）模型
    ///
    /// 旧网格先整体释放，再解析新文件；解析成功后做几何归一化、
    /// 重建齐次顶点并分配输出缓冲。任何错误都保持"未加载"状态，
    /// 且记录为粘性错误。
    pub fn load_model<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        // 先释放旧数据，协作方不得跨加载持有引用
        self.mesh = None;
        self.transformed.clear();
        self.last_error = None;

        let mut mesh = match load_mesh(path.as_ref()) {
            Ok(mesh) => mesh,
            Err(err) => {
                if let WireViewError::MeshLoading(ref mesh_err) = err {
                    self.last_error = Some(mesh_err.clone());
                }
                return Err(err);
            }
        };

        mesh.normalize();
        mesh.rebuild_homogeneous();

        tracing::info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "模型已加载并归一化"
        );

        self.transformed = Vec::with_capacity(mesh.vertex_count());
        self.mesh = Some(mesh);
        Ok(())
    }

    /// 模型是否已成功加载
    pub fn is_loaded(&self) -> bool {
        self.mesh.is_some()
    }

    /// 最近一次加载的粘性错误
    pub fn last_error(&self) -> Option<&MeshLoadError> {
        self.last_error.as_ref()
    }

    /// 面向用户的错误文案（按错误种类取定）
    pub fn error_message(error: &MeshLoadError) -> String {
        let mut s = String::from("Error");
        match error {
            MeshLoadError::FileNotFound(_) => s.push_str(" while opening file."),
            MeshLoadError::EmptyFile => s.push_str(". Empty file."),
            MeshLoadError::InvalidVertex(_) => s.push_str(". Wrong number of vertices."),
            MeshLoadError::InvalidFace(_) => s.push_str(". Wrong number of indexes."),
            MeshLoadError::Malformed(_)
            | MeshLoadError::UnsupportedFormat(_)
            | MeshLoadError::ValidationError(_) => s.push_str(" while loading model."),
        }
        s
    }

    /// 重置变换参数（缩放 1，旋转/平移归零）
    pub fn reset_state(&mut self) {
        self.scale = 1.0;
        self.rotation_angles = Vector3::default();
        self.translation = Vector3::default();
    }

    /// 设置旋转角（弧度）
    pub fn set_rotation(&mut self, angles: Vector3) {
        self.rotation_angles = angles;
    }

    /// 设置旋转角（分量形式，弧度）
    pub fn set_rotation_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.rotation_angles = Vector3::new(x, y, z);
    }

    /// 获取旋转角
    pub fn rotation(&self) -> Vector3 {
        self.rotation_angles
    }

    /// 设置等比缩放
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// 获取缩放
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// 设置平移向量
    pub fn set_translation(&mut self, translation: Vector3) {
        self.translation = translation;
    }

    /// 设置平移向量（分量形式）
    pub fn set_translation_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.translation = Vector3::new(x, y, z);
    }

    /// 获取平移向量
    pub fn translation(&self) -> Vector3 {
        self.translation
    }

    /// 设置投影类型并重建相机矩阵
    pub fn set_projection(&mut self, projection: ProjectionKind) {
        self.projection = projection;
        self.set_camera();
    }

    /// 获取投影类型
    pub fn projection(&self) -> ProjectionKind {
        self.projection
    }

    /// 按投影类型装配 View/Projection 矩阵
    ///
    /// 中心投影使用单位矩阵；平行投影使用沿 -z 平移一个单位的
    /// 视图矩阵加固定的对称视锥体。
    fn set_camera(&mut self) {
        match self.projection {
            ProjectionKind::Central => {
                self.projection_matrix = generator::identity();
                self.view_matrix = generator::identity();
            }
            ProjectionKind::Parallel => {
                self.projection_matrix = generator::frustum(
                    -FRUSTUM_EXTENT,
                    FRUSTUM_EXTENT,
                    -FRUSTUM_EXTENT,
                    FRUSTUM_EXTENT,
                    FRUSTUM_NEAR,
                    FRUSTUM_FAR,
                );
                self.view_matrix = generator::translation(Vector3::new(0.0, 0.0, -1.0));
            }
        }
    }

    /// 编译模型矩阵
    ///
    /// 固定顺序：`RotateXYZ(rx,ry,rz) · Scale(s,s,s) · Translate(t)`。
    fn compile_model_matrix(&self) -> Matrix4x4 {
        let mut matrix = generator::rotation_xyz(
            self.rotation_angles.x,
            self.rotation_angles.y,
            self.rotation_angles.z,
        );
        matrix = multiply(
            &matrix,
            &generator::scale(self.scale, self.scale, self.scale),
        );
        matrix = multiply(&matrix, &generator::translation(self.translation));
        matrix
    }

    /// 以当前参数重新变换全部顶点
    ///
    /// 最终矩阵为 `Projection · (View · Model)`；未加载模型时为空操作。
    pub fn update(&mut self) {
        let mesh = match &self.mesh {
            Some(mesh) => mesh,
            None => return,
        };

        let mut result_matrix = multiply(&self.view_matrix, &self.compile_model_matrix());
        result_matrix = multiply(&self.projection_matrix, &result_matrix);

        self.transformed = transform_all(&mesh.vertices4d, &result_matrix);
        tracing::debug!(vertices = self.transformed.len(), "顶点变换完成");
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.mesh.as_ref().map_or(0, |m| m.vertex_count())
    }

    /// 获取索引数量
    pub fn index_count(&self) -> usize {
        self.mesh.as_ref().map_or(0, |m| m.index_count())
    }

    /// 获取三角形数量
    pub fn triangle_count(&self) -> usize {
        self.mesh.as_ref().map_or(0, |m| m.triangle_count())
    }

    /// 三维顶点缓冲
    pub fn vertices3d(&self) -> &[Vector3] {
        match &self.mesh {
            Some(m) => m.vertices3d.as_slice(),
            None => &[],
        }
    }

    /// 齐次四维顶点缓冲
    pub fn vertices4d(&self) -> &[Vector4] {
        match &self.mesh {
            Some(m) => m.vertices4d.as_slice(),
            None => &[],
        }
    }

    /// 三角形索引缓冲
    pub fn indices(&self) -> &[u32] {
        match &self.mesh {
            Some(m) => m.indices.as_slice(),
            None => &[],
        }
    }

    /// 变换后的顶点缓冲（最近一次 `update` 的结果）
    pub fn transformed(&self) -> &[Vector4] {
        &self.transformed
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(ProjectionKind::Parallel)
    }
}
