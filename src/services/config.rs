//! # 应用配置加载
//!
//! 读取 `~/.web-workspace/config.json`，再应用环境变量覆盖：
//! 1. 配置文件不存在 → 使用默认配置
//! 2. 文件存在但无法读取或解析 → 返回错误，不回退到默认值
//! 3. 设置了 `WEB_WORKSPACE_API_URL` 且非空 → 覆盖 `api_base_url`

use std::path::Path;

use crate::models::settings::{API_URL_ENV, AppConfig};
use crate::utils::path;

/// 加载应用配置（文件 + 环境变量覆盖）
pub async fn load() -> Result<AppConfig, String> {
    let config_path = path::get_config_file_path()?;
    let config = load_from(&config_path).await?;
    Ok(apply_env_override(config, std::env::var(API_URL_ENV).ok()))
}

/// 从指定文件加载配置，文件不存在时返回默认值
pub async fn load_from(config_path: &Path) -> Result<AppConfig, String> {
    if !config_path.exists() {
        log::info!("配置文件不存在，使用默认配置: {}", config_path.display());
        return Ok(AppConfig::default());
    }

    let content = tokio::fs::read_to_string(config_path)
        .await
        .map_err(|e| format!("读取配置文件失败: {}", e))?;

    serde_json::from_str(&content).map_err(|e| format!("解析配置文件失败: {}", e))
}

/// 用环境变量值覆盖后端地址；空白值视为未设置
pub fn apply_env_override(mut config: AppConfig, env_value: Option<String>) -> AppConfig {
    if let Some(url) = env_value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        log::info!("使用环境变量 {} 指定的后端地址: {}", API_URL_ENV, url);
        config.api_base_url = url;
    }
    config
}
