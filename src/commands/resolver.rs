//! # 技术栈识别 Tauri Commands
//!
//! 纯计算，不访问后端，也不产生界面事件。

use crate::services::resolver::{self, ConfigSuggestion, StackManifest};

/// 从描述文本生成依赖清单
///
/// # 错误
/// 描述为空或过长时返回错误信息
#[tauri::command]
pub fn resolve_stack(prompt: String) -> Result<StackManifest, String> {
    resolver::detect_stack(&prompt).map_err(|e| e.to_string())
}

/// 从描述文本生成初始化表单的预填建议
#[tauri::command]
pub fn suggest_config(prompt: String) -> Result<ConfigSuggestion, String> {
    resolver::suggest_config(&prompt).map_err(|e| e.to_string())
}
