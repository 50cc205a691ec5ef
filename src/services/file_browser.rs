//! # 文件浏览器
//!
//! 维护当前项目的扁平文件列表和激活项。路径是后端给出的不透明字符串，
//! 不建模目录树；列表顺序即后端返回的顺序。
//!
//! 每次列表或激活项变化都会重新推送完整的 [`UiEvent::FileList`]，
//! 保证界面上最多只有一项被标记为激活，且与会话的当前文件一致。

use crate::models::ui::{FileEntryView, UiEvent, UiSink};

#[derive(Debug, Default)]
pub struct FileBrowser {
    entries: Vec<String>,
    active: Option<String>,
}

impl FileBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// 替换文件列表并清除激活项
    pub fn set_entries(&mut self, entries: Vec<String>, ui: &impl UiSink) {
        self.entries = entries;
        self.active = None;
        self.render(ui);
    }

    /// 标记激活文件；路径不在列表中时不会有任何条目被标记
    pub fn mark_active(&mut self, path: &str, ui: &impl UiSink) {
        self.active = Some(path.to_string());
        self.render(ui);
    }

    /// 清空列表和激活项（切换项目时调用）
    pub fn clear(&mut self, ui: &impl UiSink) {
        self.entries.clear();
        self.active = None;
        self.render(ui);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn first(&self) -> Option<&str> {
        self.entries.first().map(String::as_str)
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// 当前列表的展示形态
    pub fn view(&self) -> Vec<FileEntryView> {
        self.entries
            .iter()
            .map(|path| FileEntryView {
                path: path.clone(),
                active: self.active.as_deref() == Some(path.as_str()),
            })
            .collect()
    }

    fn render(&self, ui: &impl UiSink) {
        ui.emit(UiEvent::FileList {
            entries: self.view(),
        });
    }
}
