//! # 界面动作分发表
//!
//! 展示层的每个按钮、下拉框和编辑器输入都对应一个 [`Action`]，
//! 通过一个 IPC 入口统一送达 [`dispatch`]，再路由到会话控制器的处理函数。
//!
//! ## 线格式
//!
//! 带 `action` 标签、`payload` 内容的 JSON，动作名为 kebab-case：
//! ```json
//! { "action": "load-project", "payload": { "name": "demo" } }
//! { "action": "save-file" }
//! ```
//!
//! ## 如何添加新动作
//!
//! 1. 在 [`Action`] 中添加变体
//! 2. 在 [`Action::name`] 和 [`ACTION_NAMES`] 中登记名称
//! 3. 在 [`dispatch`] 中路由到对应的处理函数

use serde::{Deserialize, Serialize};

use crate::error::WorkspaceResult;
use crate::models::project::ProjectConfig;
use crate::models::ui::UiSink;
use crate::services::api::WorkspaceApi;
use crate::services::preferences::PreferenceStore;
use crate::services::session::SessionController;

/// 分发表中登记的全部动作名称，顺序与界面上的出现顺序一致
pub const ACTION_NAMES: &[&str] = &[
    "init-project",
    "new-project",
    "load-project",
    "back-to-init",
    "open-file",
    "save-file",
    "run",
    "export-project",
    "refresh-preview",
    "toggle-theme",
    "editor-input",
];

/// 界面动作
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "kebab-case")]
pub enum Action {
    /// 提交初始化表单
    InitProject(ProjectConfig),
    /// "新建项目"按钮
    NewProject,
    /// 项目下拉框选择
    LoadProject { name: String },
    /// "返回"按钮
    BackToInit,
    /// 文件列表点击
    OpenFile { path: String },
    SaveFile,
    Run,
    ExportProject,
    RefreshPreview,
    ToggleTheme,
    /// 编辑器组件的内容变更回传
    EditorInput { instance: u64, content: String },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::InitProject(_) => "init-project",
            Action::NewProject => "new-project",
            Action::LoadProject { .. } => "load-project",
            Action::BackToInit => "back-to-init",
            Action::OpenFile { .. } => "open-file",
            Action::SaveFile => "save-file",
            Action::Run => "run",
            Action::ExportProject => "export-project",
            Action::RefreshPreview => "refresh-preview",
            Action::ToggleTheme => "toggle-theme",
            Action::EditorInput { .. } => "editor-input",
        }
    }

    pub fn all_names() -> &'static [&'static str] {
        ACTION_NAMES
    }
}

/// 把动作路由到会话控制器
///
/// 只有初始化会把错误返回给调用方（同时已经以通知形式展示）；
/// 其余动作的失败在各自的处理函数中转换为通知或日志。
pub async fn dispatch<A, U, P>(
    controller: &SessionController<A, U, P>,
    action: Action,
) -> WorkspaceResult<()>
where
    A: WorkspaceApi,
    U: UiSink,
    P: PreferenceStore,
{
    log::debug!("分发动作: {}", action.name());

    match action {
        Action::InitProject(config) => {
            controller.initialize(&config).await?;
        }
        Action::NewProject | Action::BackToInit => controller.show_initializer().await,
        Action::LoadProject { name } => controller.open_project(&name).await,
        Action::OpenFile { path } => controller.open_file(&path).await,
        Action::SaveFile => controller.save_active_file().await,
        Action::Run => controller.run().await,
        Action::ExportProject => controller.export(),
        Action::RefreshPreview => controller.refresh_preview(),
        Action::ToggleTheme => {
            controller.toggle_theme().await;
        }
        Action::EditorInput { instance, content } => controller.editor_input(instance, content),
    }
    Ok(())
}
