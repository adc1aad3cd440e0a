//! WireView - 线框查看器命令行入口
//!
//! 加载配置、初始化日志、读入模型文件并运行一次完整的
//! 归一化 + 变换管线，最后输出模型统计信息。
//! 图形前端是独立的协作方，这个二进制用于快速检查
//! 一个模型文件能否被核心正确加载与变换。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件（config.toml，可缺省）
//! cargo run -- model.obj
//!
//! # 中心投影（命令行覆盖）
//! cargo run -- model.obj --central
//!
//! # 指定旋转/缩放/平移
//! cargo run -- model.obj --rotate 0.5 0 0 --scale 1.5
//! ```

use anyhow::{bail, Context};
use tracing::info;
use wireview::core::{config::Config, log};
use wireview::math::Vector3;
use wireview::viewer::Viewer;

fn main() -> anyhow::Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");

    // 2. 应用命令行参数
    let args: Vec<String> = std::env::args().skip(1).collect();
    config.apply_args(&args);

    // 3. 验证配置
    config.validate().context("invalid configuration")?;

    // 4. 初始化日志系统（使用配置中的设置）
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    info!("WireView starting...");
    info!(version = env!("CARGO_PKG_VERSION"), "Core initialized");

    // 5. 取模型路径（第一个参数）
    let model_path = match args.first() {
        Some(path) if !path.starts_with("--") => path.clone(),
        _ => bail!("usage: wireview <model.obj> [--central|--parallel] [--rotate X Y Z] [--scale S] [--translate X Y Z]"),
    };

    info!(
        projection = ?config.viewer.projection,
        line_width = config.viewer.line_width,
        "Viewer configuration"
    );

    // 6. 加载模型并运行变换管线
    let mut viewer = Viewer::new(config.viewer.projection);
    if let Err(e) = viewer.load_model(&model_path) {
        if let Some(mesh_err) = viewer.last_error() {
            eprintln!("{}", Viewer::error_message(mesh_err));
        }
        return Err(e).with_context(|| format!("failed to load '{}'", model_path));
    }

    if let Some(angles) = parse_vector_arg(&args, "--rotate") {
        viewer.set_rotation(angles);
    }
    if let Some(translation) = parse_vector_arg(&args, "--translate") {
        viewer.set_translation(translation);
    }
    if let Some(scale) = parse_scalar_arg(&args, "--scale") {
        viewer.set_scale(scale);
    }

    viewer.update();

    // 7. 输出统计信息
    info!(
        vertices = viewer.vertex_count(),
        triangles = viewer.triangle_count(),
        indices = viewer.index_count(),
        "Model processed"
    );
    println!(
        "{}: {} vertices, {} triangles ({} indices), {} transformed",
        model_path,
        viewer.vertex_count(),
        viewer.triangle_count(),
        viewer.index_count(),
        viewer.transformed().len()
    );

    Ok(())
}

/// 读取形如 `--flag X Y Z` 的向量参数
fn parse_vector_arg(args: &[String], flag: &str) -> Option<Vector3> {
    let idx = args.iter().position(|a| a == flag)?;
    let x = args.get(idx + 1)?.parse().ok()?;
    let y = args.get(idx + 2)?.parse().ok()?;
    let z = args.get(idx + 3)?.parse().ok()?;
    Some(Vector3::new(x, y, z))
}

/// 读取形如 `--flag S` 的标量参数
fn parse_scalar_arg(args: &[String], flag: &str) -> Option<f32> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1)?.parse().ok()
}
