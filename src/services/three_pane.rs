//! # 三栏工作区
//!
//! 没有项目概念的简化模式：固定的 HTML / CSS / JS 三个编辑栏，
//! 任意一栏输入都会立即整体重建预览文档；保存时把三栏内容一次性提交到 `POST /save`，
//! 导出时整页导航到 `GET /export/{name}` 下载压缩包。

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::WorkspaceResult;
use crate::models::project::{BundleSaveRequest, validate_name};
use crate::models::ui::{NotificationLevel, UiEvent, UiSink};
use crate::services::api::WorkspaceApi;
use crate::services::preview::compose_document;

/// 编辑栏
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pane {
    Html,
    Css,
    Js,
}

#[derive(Debug, Default)]
struct Buffers {
    name: String,
    html: String,
    css: String,
    js: String,
}

pub struct ThreePaneWorkspace<A, U> {
    api: A,
    ui: U,
    buffers: Mutex<Buffers>,
}

impl<A: WorkspaceApi, U: UiSink> ThreePaneWorkspace<A, U> {
    pub fn new(api: A, ui: U) -> Self {
        Self {
            api,
            ui,
            buffers: Mutex::new(Buffers::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    fn lock(&self) -> MutexGuard<'_, Buffers> {
        self.buffers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 更新一栏内容并立即重建预览
    pub fn input(&self, pane: Pane, text: String) {
        let mut b = self.lock();
        match pane {
            Pane::Html => b.html = text,
            Pane::Css => b.css = text,
            Pane::Js => b.js = text,
        }
        self.ui.emit(UiEvent::PreviewDocument {
            html: compose_document(&b.html, &b.css, &b.js),
        });
    }

    pub fn rename(&self, name: String) {
        self.lock().name = name;
    }

    /// 当前的预览文档
    pub fn document(&self) -> String {
        let b = self.lock();
        compose_document(&b.html, &b.css, &b.js)
    }

    /// 当前的保存请求体
    pub fn bundle(&self) -> BundleSaveRequest {
        let b = self.lock();
        BundleSaveRequest {
            name: b.name.clone(),
            html: b.html.clone(),
            css: b.css.clone(),
            js: b.js.clone(),
        }
    }

    /// 保存三栏内容
    ///
    /// 名称不合法时不发出请求；后端响应不解析，只要请求本身成功即视为保存成功。
    pub async fn save(&self) -> WorkspaceResult<()> {
        let result = self.try_save().await;
        match &result {
            Ok(()) => self.ui.emit(UiEvent::notify(
                NotificationLevel::Success,
                "Project saved successfully!",
            )),
            Err(e) => {
                log::warn!("保存三栏项目失败: {}", e);
                self.ui.emit(UiEvent::notify(
                    NotificationLevel::Error,
                    format!("Failed to save project: {}", e),
                ));
            }
        }
        result
    }

    async fn try_save(&self) -> WorkspaceResult<()> {
        let mut request = self.bundle();
        request.name = validate_name(&request.name)?;
        self.api.save_bundle(&request).await
    }

    /// 导出：导航到后端的压缩包下载地址；名称为空时什么都不做
    pub fn export(&self) {
        let name = self.lock().name.trim().to_string();
        if name.is_empty() {
            return;
        }
        match self.api.bundle_export_url(&name) {
            Ok(url) => self.ui.emit(UiEvent::Navigate { url }),
            Err(e) => log::error!("生成导出地址失败: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WorkspaceError;
    use crate::services::testing::{ApiCall, FakeApi, RecordingSink};

    fn workspace(api: FakeApi) -> ThreePaneWorkspace<FakeApi, RecordingSink> {
        ThreePaneWorkspace::new(api, RecordingSink::default())
    }

    #[test]
    fn test_every_input_rebuilds_preview() {
        let ws = workspace(FakeApi::default());
        ws.input(Pane::Html, "<h1>Hi</h1>".into());
        ws.input(Pane::Css, "h1{color:red}".into());
        ws.input(Pane::Js, "console.log(1)".into());

        let events = ws.ui().take();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[2],
            UiEvent::PreviewDocument {
                html: "<h1>Hi</h1><style>h1{color:red}</style><script>console.log(1)</script>"
                    .into()
            }
        );
        assert_eq!(
            ws.document(),
            "<h1>Hi</h1><style>h1{color:red}</style><script>console.log(1)</script>"
        );
    }

    #[test]
    fn test_empty_buffers_still_compose() {
        let ws = workspace(FakeApi::default());
        ws.input(Pane::Css, String::new());
        assert_eq!(ws.document(), "<style></style><script></script>");
    }

    #[tokio::test]
    async fn test_save_posts_all_buffers() {
        let ws = workspace(FakeApi::default());
        ws.rename(" site ".into());
        ws.input(Pane::Html, "<p>".into());
        ws.input(Pane::Js, "go()".into());
        ws.ui().take();

        ws.save().await.unwrap();
        assert_eq!(
            ws.api().calls(),
            vec![ApiCall::SaveBundle(BundleSaveRequest {
                name: "site".into(),
                html: "<p>".into(),
                css: String::new(),
                js: "go()".into(),
            })]
        );
        assert!(matches!(
            ws.ui().take().as_slice(),
            [UiEvent::Notify {
                level: NotificationLevel::Success,
                ..
            }]
        ));
    }

    #[tokio::test]
    async fn test_save_without_name_makes_no_request() {
        let ws = workspace(FakeApi::default());
        ws.input(Pane::Html, "<p>".into());
        ws.ui().take();

        let result = ws.save().await;
        assert!(matches!(result, Err(WorkspaceError::Validation(_))));
        assert!(ws.api().calls().is_empty());
        assert!(matches!(
            ws.ui().take().as_slice(),
            [UiEvent::Notify {
                level: NotificationLevel::Error,
                ..
            }]
        ));
    }

    #[tokio::test]
    async fn test_save_network_failure_notifies() {
        let ws = workspace(
            FakeApi::default().with_bundle_error(WorkspaceError::Network("refused".into())),
        );
        ws.rename("site".into());
        assert!(ws.save().await.is_err());
        assert_eq!(ws.api().calls().len(), 1);
    }

    #[test]
    fn test_export() {
        let ws = workspace(FakeApi::default());
        ws.export();
        assert!(ws.ui().take().is_empty());

        ws.rename("site".into());
        ws.export();
        assert_eq!(
            ws.ui().take(),
            vec![UiEvent::Navigate {
                url: "http://backend/export/site".into()
            }]
        );
    }
}
