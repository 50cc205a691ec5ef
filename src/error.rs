//! # 错误类型
//!
//! 会话核心中所有可失败操作统一返回 [`WorkspaceError`]。
//!
//! ## 分类
//! - `Network` - 请求未能完成（连接失败、传输中断、响应体无法解析）
//! - `Application` - 响应可以解析，但状态字段表示失败
//! - `MissingData` - 响应缺少预期字段（如文件读取响应中没有 `content`）
//! - `Validation` - 用户输入不合法，请求不会被发出
//! - `Preferences` - 本地偏好/配置文件读写失败
//!
//! 所有错误都在调用点被捕获，转换为短暂通知或日志，不会中断会话。
//! 在 Tauri command 边界处通过 `to_string()` 转换为 `String`。

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    /// 网络层失败：请求未发出、连接被拒绝或响应体解析失败
    #[error("网络请求失败: {0}")]
    Network(String),

    /// 后端返回了非成功状态（如 `status != "success"`）
    #[error("后端返回失败状态: {0}")]
    Application(String),

    /// 响应中缺少必需字段
    #[error("响应缺少字段: {0}")]
    MissingData(&'static str),

    /// 输入校验失败
    #[error("输入无效: {0}")]
    Validation(String),

    /// 偏好设置或配置文件读写失败
    #[error("偏好设置读写失败: {0}")]
    Preferences(String),
}

impl From<reqwest::Error> for WorkspaceError {
    fn from(e: reqwest::Error) -> Self {
        WorkspaceError::Network(e.to_string())
    }
}

/// 会话核心的统一返回类型
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
