//! # 项目会话 Tauri Commands
//!
//! 前端只负责渲染 `workspace://ui` 事件和转发用户操作：
//! - `bootstrap` - 应用启动流程（恢复主题、加载项目列表）
//! - `dispatch_action` - 所有按钮/选择/编辑器输入的统一入口
//! - `list_action_names` - 分发表中登记的动作名称
//! - `list_projects` - 重新获取项目列表
//! - `session_snapshot` - 当前会话状态（调试用）

use tauri::State;

use crate::services::dispatch::{self, Action};
use crate::services::session::SessionSnapshot;
use crate::shell::DesktopSession;

/// 应用启动流程
///
/// 前端在页面加载完成、事件监听注册之后调用，
/// 此后的所有界面更新都通过 `workspace://ui` 事件到达。
#[tauri::command]
pub async fn bootstrap(session: State<'_, DesktopSession>) -> Result<(), String> {
    session.inner().bootstrap().await;
    Ok(())
}

/// 分发一个界面动作
///
/// # 参数
/// - `action` - 带 `action` 标签的动作 JSON，如 `{ "action": "open-file", "payload": { "path": "index.html" } }`
///
/// # 错误
/// 仅初始化失败时返回错误信息（同时已经以通知形式展示）
#[tauri::command]
pub async fn dispatch_action(
    session: State<'_, DesktopSession>,
    action: Action,
) -> Result<(), String> {
    dispatch::dispatch(session.inner(), action)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn list_action_names() -> Vec<&'static str> {
    Action::all_names().to_vec()
}

/// 获取项目列表（失败时为空列表）
#[tauri::command]
pub async fn list_projects(session: State<'_, DesktopSession>) -> Result<Vec<String>, String> {
    Ok(session.inner().list_projects().await)
}

#[tauri::command]
pub fn session_snapshot(session: State<'_, DesktopSession>) -> SessionSnapshot {
    session.snapshot()
}
