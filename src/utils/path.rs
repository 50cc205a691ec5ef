//! # 路径工具函数
//!
//! - 获取 Web Workspace 自身配置目录路径（`~/.web-workspace/`）
//! - 提取项目内文件路径的扩展名（决定编辑器模式和是否驱动预览）

use std::path::{Path, PathBuf};

/// 配置目录名
const APP_DIR_NAME: &str = ".web-workspace";

/// 获取 Web Workspace 配置目录的绝对路径
///
/// 配置（`config.json`）和偏好设置（`preferences.json`）都存放在此目录下。
/// 使用 `dirs` crate 获取跨平台的主目录路径。
///
/// # 错误
/// 如果无法确定用户主目录（如无 HOME 环境变量），返回错误信息。
pub fn get_app_config_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or_else(|| "无法获取用户主目录".to_string())?;
    Ok(home.join(APP_DIR_NAME))
}

/// 配置文件路径：`~/.web-workspace/config.json`
pub fn get_config_file_path() -> Result<PathBuf, String> {
    Ok(get_app_config_path()?.join("config.json"))
}

/// 偏好设置文件路径：`~/.web-workspace/preferences.json`
pub fn get_preferences_file_path() -> Result<PathBuf, String> {
    Ok(get_app_config_path()?.join("preferences.json"))
}

/// 提取项目文件路径的扩展名（小写）
///
/// 项目文件路径是后端给出的不透明扁平字符串，这里只看最后一个 `.` 之后的部分。
/// 没有扩展名或以 `.` 开头的隐藏文件（如 `.env`）返回 None。
///
/// # 示例
/// - `"index.html"` → `Some("html")`
/// - `"src/App.JS"` → `Some("js")`
/// - `"Makefile"` → `None`
pub fn file_extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}
