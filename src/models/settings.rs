//! # 应用配置数据模型
//!
//! 定义了 Web Workspace 自身的配置结构 [`AppConfig`]。
//! 配置文件位于 `~/.web-workspace/config.json`，缺失时使用默认值。

use serde::{Deserialize, Serialize};

/// 默认的工作区后端地址（本地开发服务器）
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

/// 覆盖后端地址的环境变量名
pub const API_URL_ENV: &str = "WEB_WORKSPACE_API_URL";

/// 应用配置
///
/// 对应配置文件内容：
/// ```json
/// { "apiBaseUrl": "http://127.0.0.1:5000" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// 工作区后端的根地址，所有 `/api/...` 路径都基于它拼接
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
        }
    }
}
