//! # 三栏工作区 Tauri Commands

use tauri::State;

use crate::services::three_pane::Pane;
use crate::shell::DesktopThreePane;

/// 编辑栏输入，预览通过 `workspace://ui` 事件更新
#[tauri::command]
pub fn three_pane_input(workspace: State<'_, DesktopThreePane>, pane: Pane, text: String) {
    workspace.input(pane, text);
}

#[tauri::command]
pub fn three_pane_rename(workspace: State<'_, DesktopThreePane>, name: String) {
    workspace.rename(name);
}

/// 保存三栏内容到后端
///
/// # 错误
/// 名称不合法或请求失败时返回错误信息（同时已经以通知形式展示）
#[tauri::command]
pub async fn three_pane_save(workspace: State<'_, DesktopThreePane>) -> Result<(), String> {
    workspace.inner().save().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub fn three_pane_export(workspace: State<'_, DesktopThreePane>) {
    workspace.export();
}
