//! # 项目和文件数据模型
//!
//! 定义了项目初始化配置以及工作区后端 API 的请求/响应结构体。
//! 字段名与后端 JSON 线格式一一对应，不做重命名。
//!
//! 后端 API 一览：
//! - `POST /api/init` - [`ProjectConfig`] → [`InitResponse`]
//! - `GET /api/projects` - [`ProjectListResponse`]
//! - `GET /api/project/{name}/files` - [`FileListResponse`]
//! - `GET /api/file?project=&path=` - [`FileContentResponse`]
//! - `POST /api/file` - [`SaveFileRequest`] → [`StatusResponse`]
//! - `POST /api/run/{project}` - [`RunResponse`]
//! - `POST /save` - [`BundleSaveRequest`] → 响应内容不解析

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{WorkspaceError, WorkspaceResult};

/// 后端表示初始化成功的状态值
pub const STATUS_SUCCESS: &str = "success";

/// 后端表示文件保存成功的状态值
pub const STATUS_SAVED: &str = "saved";

/// 项目初始化配置
///
/// 由初始化表单收集，原样作为 `POST /api/init` 的请求体发送。
///
/// 对应请求体：
/// ```json
/// { "name": "demo", "frontend": "react", "backend": "flask", "utilities": ["docker"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// 项目名称，同时也是后端存储目录名
    pub name: String,

    /// 前端技术选型（如 "react"、"vue"、"vanilla"）
    pub frontend: String,

    /// 后端技术选型（如 "flask"、"fastapi"、"express"）
    pub backend: String,

    /// 勾选的工具集（如 ["docker", "tailwind"]），保持表单中的顺序
    pub utilities: Vec<String>,
}

impl ProjectConfig {
    /// 校验配置并返回去除首尾空白后的副本
    ///
    /// # 错误
    /// 项目名不合法时返回 `Validation`，见 [`validate_name`]
    pub fn validated(&self) -> WorkspaceResult<ProjectConfig> {
        let name = validate_name(&self.name)?;
        Ok(ProjectConfig {
            name,
            frontend: self.frontend.trim().to_string(),
            backend: self.backend.trim().to_string(),
            utilities: self.utilities.clone(),
        })
    }
}

/// 校验项目名称
///
/// 名称会被后端用作目录名，因此拒绝空名称、路径分隔符和 `..`。
///
/// # 返回值
/// 去除首尾空白后的名称
pub fn validate_name(raw: &str) -> WorkspaceResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(WorkspaceError::Validation("项目名称不能为空".into()));
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(WorkspaceError::Validation(format!(
            "项目名称不能包含路径字符: {}",
            name
        )));
    }
    Ok(name.to_string())
}

/// 已初始化的项目
///
/// 前端只持有项目名称作为引用，项目本身的生命周期由后端管理。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub config: ProjectConfig,
}

/// `POST /api/init` 的响应
#[derive(Debug, Clone, Deserialize)]
pub struct InitResponse {
    /// 状态值，仅 `"success"` 表示成功
    #[serde(default)]
    pub status: String,

    /// 后端确认的项目名称（成功时存在）
    #[serde(default)]
    pub project: Option<String>,
}

/// `GET /api/projects` 的响应
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectListResponse {
    pub projects: Vec<String>,
}

/// `GET /api/project/{name}/files` 的响应
#[derive(Debug, Clone, Deserialize)]
pub struct FileListResponse {
    pub files: Vec<String>,
}

/// `GET /api/file` 的响应
///
/// `content` 字段缺失即视为读取失败（MissingData）；
/// 字段存在但为 `null` 时按空文件处理，与空字符串相同。
#[derive(Debug, Clone, Deserialize)]
pub struct FileContentResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: Option<String>,
}

/// 只在字段存在时调用：`null` 映射为空字符串
fn null_as_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|value| Some(value.unwrap_or_default()))
}

/// `POST /api/file` 的请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveFileRequest {
    pub project: String,
    pub path: String,
    pub content: String,
}

/// 只关心 `status` 字段的通用响应
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: String,
}

/// `POST /api/run/{project}` 的响应
///
/// 两个字段都可能缺失；同时存在时先展示 `output` 再展示 `error`。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunResponse {
    #[serde(default)]
    pub output: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

/// 三栏模式 `POST /save` 的请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleSaveRequest {
    pub name: String,
    pub html: String,
    pub css: String,
    pub js: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_request_wire_shape() {
        let config = ProjectConfig {
            name: "demo".into(),
            frontend: "react".into(),
            backend: "flask".into(),
            utilities: vec!["docker".into()],
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "demo",
                "frontend": "react",
                "backend": "flask",
                "utilities": ["docker"]
            })
        );
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  demo ").unwrap(), "demo");
        assert!(matches!(validate_name("   "), Err(WorkspaceError::Validation(_))));
        assert!(matches!(validate_name("a/b"), Err(WorkspaceError::Validation(_))));
        assert!(matches!(validate_name(".."), Err(WorkspaceError::Validation(_))));
    }

    #[test]
    fn test_missing_content_is_none() {
        let resp: FileContentResponse = serde_json::from_str(r#"{"error": "nope"}"#).unwrap();
        assert!(resp.content.is_none());

        let resp: FileContentResponse = serde_json::from_str(r#"{"content": ""}"#).unwrap();
        assert_eq!(resp.content.as_deref(), Some(""));
    }

    #[test]
    fn test_null_content_is_empty_file() {
        let resp: FileContentResponse = serde_json::from_str(r#"{"content": null}"#).unwrap();
        assert_eq!(resp.content.as_deref(), Some(""));
    }
}
