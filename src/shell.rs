//! # 桌面外壳的界面事件通道
//!
//! 把会话核心产生的 [`UiEvent`] 通过 Tauri 事件推送到 webview。
//! 导航事件（导出下载）额外交给系统默认浏览器打开，由浏览器完成下载。

use tauri::{AppHandle, Emitter};
use tauri_plugin_opener::OpenerExt;

use crate::models::ui::{UiEvent, UiSink};
use crate::services::api::HttpWorkspaceApi;
use crate::services::preferences::FilePreferenceStore;
use crate::services::session::SessionController;
use crate::services::three_pane::ThreePaneWorkspace;

/// 前端监听的事件名
pub const UI_EVENT_CHANNEL: &str = "workspace://ui";

/// 桌面端的会话控制器
pub type DesktopSession = SessionController<HttpWorkspaceApi, TauriUiSink, FilePreferenceStore>;

/// 桌面端的三栏工作区
pub type DesktopThreePane = ThreePaneWorkspace<HttpWorkspaceApi, TauriUiSink>;

pub struct TauriUiSink {
    app: AppHandle,
}

impl TauriUiSink {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl UiSink for TauriUiSink {
    fn emit(&self, event: UiEvent) {
        if let UiEvent::Navigate { url } = &event {
            if let Err(e) = self.app.opener().open_url(url.as_str(), None::<&str>) {
                log::error!("打开导出地址失败 {}: {}", url, e);
            }
        }
        if let Err(e) = self.app.emit(UI_EVENT_CHANNEL, &event) {
            log::warn!("推送界面事件失败: {}", e);
        }
    }
}
