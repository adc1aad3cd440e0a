//! OBJ 文件加载器
//!
//! 手写的行式文本扫描器：逐行读取 `v`/`f` 行，提取顶点坐标与面引用，
//! 做扇形三角化，并把 1 基/负向/越界的面引用解析为 0 基三角形索引。
//! 数字解析固定为点号小数、ASCII 数字约定，与宿主 locale 无关
//! （`str::parse` 本身即满足该约定）。
//!
//! # 错误模型
//!
//! 首个错误立即终止整次加载（错误是"粘性"的），
//! 不会提交任何部分解析出的顶点或索引。

use super::MeshLoader;
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::mesh::MeshData;
use crate::math::Vector3;
use std::path::Path;

/// 顶点行标记
const VERTEX_MARKER: u8 = b'v';
/// 面行标记
const FACE_MARKER: u8 = b'f';
/// 顶点行的 token 分隔符（单个空格）
const SEP: char = ' ';

/// OBJ 格式加载器
///
/// 实现 `MeshLoader` trait，提供 OBJ 行式文本的加载功能。
///
/// # 特性
///
/// - 顶点行：3 或 4 个空格分隔的小数（第 4 个被接受但丢弃）
/// - 面行：≥3 个顶点引用，按扇形三角化展开
/// - 引用解析：1 基转 0 基、越界取模回绕、负值按整个顶点表
///   从末尾回数（刻意不做按行作用域的相对索引）
/// - 其余行（注释、`vt`、`vn` 等）一律忽略
pub struct ObjLoader;

impl MeshLoader for ObjLoader {
    fn load_from_file(path: &Path) -> Result<MeshData> {
        // 读取任何行之前先检查文件存在且非空
        if !path.exists() {
            return Err(MeshLoadError::FileNotFound(path.to_path_buf()).into());
        }

        let data = std::fs::read(path)
            .map_err(|_| MeshLoadError::FileNotFound(path.to_path_buf()))?;
        if data.is_empty() {
            return Err(MeshLoadError::EmptyFile.into());
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string());

        let mesh = parse_bytes(&data, name)?;

        tracing::info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "成功加载 OBJ 文件: {}",
            path.display()
        );

        Ok(mesh)
    }

    fn load_from_memory(data: &[u8]) -> Result<MeshData> {
        if data.is_empty() {
            return Err(MeshLoadError::EmptyFile.into());
        }
        Ok(parse_bytes(data, None)?)
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}

/// 解析整块文本并提交网格
fn parse_bytes(data: &[u8], name: Option<String>) -> std::result::Result<MeshData, MeshLoadError> {
    let text = String::from_utf8_lossy(data);
    let mut scanner = RawBuffers::default();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let bytes = line.as_bytes();
        if bytes.is_empty() {
            continue;
        }
        if bytes[0] == VERTEX_MARKER && bytes.get(1) == Some(&b' ') {
            scanner.scan_vertex_line(line, line_no)?;
        } else if bytes[0] == FACE_MARKER {
            scanner.scan_face_line(line, line_no)?;
        }
        // 其余行一律忽略
    }

    let indices = scanner.resolve_indices()?;

    let mut mesh = MeshData {
        vertices3d: scanner.vertices,
        vertices4d: Vec::new(),
        indices,
        name,
    };
    mesh.validate().map_err(MeshLoadError::ValidationError)?;
    mesh.rebuild_homogeneous();
    Ok(mesh)
}

/// 解析期间的原始缓冲
///
/// 顶点按文件顺序累积；面引用以原始（未解析）的带符号整数累积，
/// 扇形三角化已在扫描阶段完成，每 3 个引用为一个三角形。
#[derive(Default)]
struct RawBuffers {
    vertices: Vec<Vector3>,
    face_refs: Vec<i64>,
}

impl RawBuffers {
    /// 扫描一条顶点行
    ///
    /// 按单个空格切分，跳过行首标记；其余每个非空 token 必须能
    /// 整体解析为小数（允许的尾部仅有换行符）。解析出的数字
    /// 少于 3 个为结构残缺，多于 4 个为非法顶点；恰好 4 个时
    /// 第 4 个数被接受但丢弃，只有 x、y、z 进入顶点。
    fn scan_vertex_line(
        &mut self,
        line: &str,
        line_no: usize,
    ) -> std::result::Result<(), MeshLoadError> {
        let mut numbers = [0.0f32; 3];
        let mut count = 0usize;

        let mut parts = line.split(SEP);
        parts.next(); // 跳过标记 token

        for part in parts {
            let token = part.trim_end_matches(['\r', '\n']);
            if token.is_empty() {
                continue;
            }
            let value: f32 = token.parse().map_err(|_| {
                MeshLoadError::InvalidVertex(format!(
                    "line {}: token '{}' is not a number",
                    line_no, token
                ))
            })?;
            if count < 3 {
                numbers[count] = value;
            }
            count += 1;
        }

        if count < 3 {
            return Err(MeshLoadError::Malformed(format!(
                "line {}: vertex needs at least 3 coordinates, got {}",
                line_no, count
            )));
        }
        if count > 4 {
            return Err(MeshLoadError::InvalidVertex(format!(
                "line {}: vertex has {} numbers, at most 4 allowed",
                line_no, count
            )));
        }

        self.vertices
            .push(Vector3::new(numbers[0], numbers[1], numbers[2]));
        Ok(())
    }

    /// 扫描一条面行并做扇形三角化
    ///
    /// 行内每个空白分隔 token 只取前导带符号整数（遇到 `/` 等
    /// 非数字字符即停止，纹理/法线子域整体忽略；没有前导整数的
    /// token 跳过）。n 个引用展开为 n-2 个共享首引用的三角形。
    /// 此处不做越界检查，引用解析在整个文件读完后统一进行。
    fn scan_face_line(
        &mut self,
        line: &str,
        line_no: usize,
    ) -> std::result::Result<(), MeshLoadError> {
        let mut refs: Vec<i64> = Vec::new();
        for token in line[1..].split_whitespace() {
            if let Some(value) = leading_int(token) {
                refs.push(value);
            }
        }

        if refs.len() < 3 {
            return Err(MeshLoadError::Malformed(format!(
                "line {}: face needs at least 3 vertex references, got {}",
                line_no,
                refs.len()
            )));
        }

        // 扇形三角化：(i1,i2,i3), (i1,i3,i4), ...
        let anchor = refs[0];
        for pair in refs[1..].windows(2) {
            self.face_refs.push(anchor);
            self.face_refs.push(pair[0]);
            self.face_refs.push(pair[1]);
        }
        Ok(())
    }

    /// 把原始面引用解析为 0 基三角形索引
    ///
    /// 按序逐值应用规则，先匹配者生效：
    /// 1. 顶点表为空：整次加载判为非法顶点
    /// 2. 引用超过顶点数：取模回绕后再转 0 基
    /// 3. 正引用：1 基转 0 基
    /// 4. 引用 0：1 基方案中不存在，非法面
    /// 5. 负引用：按整个顶点表从末尾回数（不是按行作用域）
    fn resolve_indices(&self) -> std::result::Result<Vec<u32>, MeshLoadError> {
        let vertex_count = self.vertices.len() as i64;
        if vertex_count < 1 {
            return Err(MeshLoadError::InvalidVertex(
                "index resolution requires at least one vertex".to_string(),
            ));
        }

        let mut resolved = Vec::with_capacity(self.face_refs.len());
        for &raw in &self.face_refs {
            let mut index = raw;
            if index > vertex_count {
                index = (index % vertex_count) - 1;
            } else if index > 0 {
                index -= 1;
            } else if index == 0 {
                return Err(MeshLoadError::InvalidFace(
                    "face references index 0 (references are 1-based)".to_string(),
                ));
            }
            if index < 0 {
                index += vertex_count;
            }
            if index < 0 {
                return Err(MeshLoadError::InvalidFace(format!(
                    "relative reference {} reaches before the first vertex",
                    raw
                )));
            }
            resolved.push(index as u32);
        }
        Ok(resolved)
    }
}

/// 提取 token 的前导带符号整数
///
/// 在第一个非数字字符处停止；没有任何数字时返回 `None`。
fn leading_int(token: &str) -> Option<i64> {
    let bytes = token.as_bytes();
    let mut end = 0usize;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    token[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::WireViewError;

    fn load(text: &str) -> Result<MeshData> {
        ObjLoader::load_from_memory(text.as_bytes())
    }

    fn load_err(text: &str) -> MeshLoadError {
        match load(text) {
            Err(WireViewError::MeshLoading(e)) => e,
            other => panic!("expected mesh load error, got {:?}", other.map(|m| m.vertex_count())),
        }
    }

    const TETRAHEDRON: &str = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
v 0.0 0.0 1.0
f 1 2 3
f 1 3 4
f 1 4 2
f 2 4 3
";

    #[test]
    fn test_tetrahedron_end_to_end() {
        let mesh = load(TETRAHEDRON).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.index_count(), 12);
        assert!(mesh.indices.iter().all(|&i| i < 4));
        assert_eq!(mesh.vertices4d.len(), 4);
        assert_eq!(mesh.vertices4d[3].w, 1.0);
    }

    #[test]
    fn test_fan_triangulation() {
        let mesh = load("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();
        // 四边形展开为两个共享锚点的三角形
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_negative_reference_counts_from_end() {
        let mesh = load("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf -1 1 2\n").unwrap();
        // vc=4 时 -1 解析为 3
        assert_eq!(mesh.indices, vec![3, 0, 1]);
    }

    #[test]
    fn test_wraparound_reference() {
        let mesh = load("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 5 2 3\n").unwrap();
        // vc=4 时 5 回绕为 (5 mod 4) - 1 = 0
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_slash_subfields_ignored() {
        let mesh = load("v 0 0 0\nv 1 0 0\nv 1 1 0\nf 1/2/3 2/2 3//1\n").unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_fourth_coordinate_dropped() {
        let mesh = load("v 1 2 3 9\nv 4 5 6\nv 7 8 9\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.vertices3d[0], Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.vertices3d[1], Vector3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_other_lines_ignored() {
        let mesh = load(
            "# comment\nvt 0.5 0.5\nvn 0 0 1\no cube\nv 0 0 0\nv 1 0 0\nv 1 1 0\nf 1 2 3\n",
        )
        .unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_vertex_with_two_numbers_is_malformed() {
        assert!(matches!(
            load_err("v 1.0 2.0\n"),
            MeshLoadError::Malformed(_)
        ));
    }

    #[test]
    fn test_vertex_with_bad_token() {
        assert!(matches!(
            load_err("v 1 x 3\n"),
            MeshLoadError::InvalidVertex(_)
        ));
    }

    #[test]
    fn test_vertex_with_five_numbers() {
        assert!(matches!(
            load_err("v 1 2 3 4 5\n"),
            MeshLoadError::InvalidVertex(_)
        ));
    }

    #[test]
    fn test_face_referencing_zero() {
        assert!(matches!(
            load_err("v 0 0 0\nv 1 0 0\nv 1 1 0\nf 1 0 2\n"),
            MeshLoadError::InvalidFace(_)
        ));
    }

    #[test]
    fn test_face_with_two_references() {
        assert!(matches!(
            load_err("v 0 0 0\nv 1 0 0\nv 1 1 0\nf 1 2\n"),
            MeshLoadError::Malformed(_)
        ));
    }

    #[test]
    fn test_faces_without_vertices() {
        assert!(matches!(
            load_err("f 1 2 3\n"),
            MeshLoadError::InvalidVertex(_)
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(load_err(""), MeshLoadError::EmptyFile));
    }

    #[test]
    fn test_nonexistent_path() {
        let result = ObjLoader::load_from_file(Path::new("no_such_model.obj"));
        assert!(matches!(
            result,
            Err(WireViewError::MeshLoading(MeshLoadError::FileNotFound(_)))
        ));
    }

    #[test]
    fn test_first_error_aborts() {
        // 第二行已经出错，之后的合法行不再被读取、不提交任何数据
        let result = load("v 0 0 0\nv 1 x 0\nv 1 1 0\nf 1 2 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_deep_negative_reference() {
        assert!(matches!(
            load_err("v 0 0 0\nv 1 0 0\nv 1 1 0\nf -7 1 2\n"),
            MeshLoadError::InvalidFace(_)
        ));
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int("12/3/4"), Some(12));
        assert_eq!(leading_int("-3//7"), Some(-3));
        assert_eq!(leading_int("5"), Some(5));
        assert_eq!(leading_int("abc"), None);
        assert_eq!(leading_int("-"), None);
    }
}
