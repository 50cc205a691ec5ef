//! # 编辑器适配器
//!
//! 包装单个编辑器组件实例（组件本身运行在 webview 中），负责：
//! - 根据文件扩展名选择编辑模式
//! - 每次绑定新内容时**先销毁旧实例再创建新实例**，不依赖垃圾回收
//! - 维护实时缓冲区：组件的每次输入都会回传到这里，这是未保存内容的唯一权威来源
//! - 过滤来自已销毁实例的迟到输入
//!
//! 实例 id 单调递增，从 1 开始，永不复用。

use crate::models::ui::{EditorMode, UiEvent, UiSink};
use crate::utils::path::file_extension;

/// 根据文件名选择编辑模式
///
/// 固定映射：`.html → 标记`、`.css → 样式表`、`.js → 脚本`、`.py → Python`，
/// 其他扩展名或没有扩展名一律为纯文本，这不是错误。
pub fn mode_for_path(path: &str) -> EditorMode {
    match file_extension(path).as_deref() {
        Some("html") => EditorMode::Markup,
        Some("css") => EditorMode::Stylesheet,
        Some("js") => EditorMode::Script,
        Some("py") => EditorMode::Python,
        _ => EditorMode::PlainText,
    }
}

/// 该文件的编辑是否应触发预览刷新
///
/// 只有 HTML/CSS/JS 会影响渲染结果，其他类型的文件编辑不驱动预览。
pub fn drives_preview(path: &str) -> bool {
    matches!(
        file_extension(path).as_deref(),
        Some("html") | Some("css") | Some("js")
    )
}

/// 当前存活的编辑器实例
#[derive(Debug, Clone)]
struct EditorInstance {
    id: u64,
    mode: EditorMode,
    buffer: String,
}

#[derive(Debug, Default)]
pub struct EditorAdapter {
    current: Option<EditorInstance>,
    last_id: u64,
}

impl EditorAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 绑定文件内容，编辑模式由文件名决定
    ///
    /// # 返回值
    /// 新实例的 id
    pub fn bind(&mut self, content: &str, filename: &str, ui: &impl UiSink) -> u64 {
        self.rebind(content, mode_for_path(filename), ui)
    }

    /// 销毁旧实例（如有），以给定内容和模式创建新实例
    pub fn rebind(&mut self, content: &str, mode: EditorMode, ui: &impl UiSink) -> u64 {
        self.teardown(ui);

        self.last_id += 1;
        let id = self.last_id;
        self.current = Some(EditorInstance {
            id,
            mode,
            buffer: content.to_string(),
        });
        ui.emit(UiEvent::EditorMount {
            instance: id,
            content: content.to_string(),
            mode,
        });
        id
    }

    /// 销毁当前实例；没有实例时什么都不做
    pub fn teardown(&mut self, ui: &impl UiSink) {
        if let Some(old) = self.current.take() {
            ui.emit(UiEvent::EditorTeardown { instance: old.id });
        }
    }

    /// 接收组件回传的输入
    ///
    /// # 返回值
    /// 输入属于当前实例并已写入缓冲区时返回 true；来自已销毁实例的输入被丢弃并返回 false
    pub fn apply_input(&mut self, instance: u64, content: String) -> bool {
        match self.current.as_mut() {
            Some(current) if current.id == instance => {
                current.buffer = content;
                true
            }
            _ => {
                log::debug!("丢弃来自已销毁编辑器实例 {} 的输入", instance);
                false
            }
        }
    }

    /// 请求组件重新测量布局
    ///
    /// 编辑器在隐藏状态下创建或视图切换后会测量错误，重新可见后必须调用。
    pub fn refresh(&self, ui: &impl UiSink) {
        if let Some(current) = &self.current {
            ui.emit(UiEvent::EditorRefresh {
                instance: current.id,
            });
        }
    }

    /// 实时缓冲区内容；没有实例时返回 None
    pub fn value(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.buffer.as_str())
    }

    pub fn mode(&self) -> Option<EditorMode> {
        self.current.as_ref().map(|c| c.mode)
    }

    pub fn instance_id(&self) -> Option<u64> {
        self.current.as_ref().map(|c| c.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::RecordingSink;

    #[test]
    fn test_mode_mapping() {
        assert_eq!(mode_for_path("index.html"), EditorMode::Markup);
        assert_eq!(mode_for_path("style.css"), EditorMode::Stylesheet);
        assert_eq!(mode_for_path("app.js"), EditorMode::Script);
        assert_eq!(mode_for_path("x.py"), EditorMode::Python);
        assert_eq!(mode_for_path("x.unknown"), EditorMode::PlainText);
        assert_eq!(mode_for_path("Dockerfile"), EditorMode::PlainText);
        assert_eq!(mode_for_path("INDEX.HTML"), EditorMode::Markup);
    }

    #[test]
    fn test_drives_preview() {
        assert!(drives_preview("index.html"));
        assert!(drives_preview("a/b/style.css"));
        assert!(drives_preview("app.js"));
        assert!(!drives_preview("main.py"));
        assert!(!drives_preview("README.md"));
        assert!(!drives_preview("app.jsx"));
    }

    #[test]
    fn test_rebind_tears_down_previous_instance() {
        let ui = RecordingSink::default();
        let mut editor = EditorAdapter::new();

        let first = editor.bind("<p>a</p>", "index.html", &ui);
        let second = editor.bind("print(1)", "x.py", &ui);
        assert_ne!(first, second);

        let events = ui.take();
        assert_eq!(
            events,
            vec![
                UiEvent::EditorMount {
                    instance: first,
                    content: "<p>a</p>".into(),
                    mode: EditorMode::Markup,
                },
                UiEvent::EditorTeardown { instance: first },
                UiEvent::EditorMount {
                    instance: second,
                    content: "print(1)".into(),
                    mode: EditorMode::Python,
                },
            ]
        );
        assert_eq!(editor.mode(), Some(EditorMode::Python));
        assert_eq!(editor.value(), Some("print(1)"));
    }

    #[test]
    fn test_stale_input_is_dropped() {
        let ui = RecordingSink::default();
        let mut editor = EditorAdapter::new();

        let old = editor.bind("one", "a.txt", &ui);
        let new = editor.bind("two", "b.txt", &ui);

        assert!(!editor.apply_input(old, "late keystroke".into()));
        assert_eq!(editor.value(), Some("two"));

        assert!(editor.apply_input(new, "two!".into()));
        assert_eq!(editor.value(), Some("two!"));
    }

    #[test]
    fn test_unknown_extension_binds_plain_text() {
        let ui = RecordingSink::default();
        let mut editor = EditorAdapter::new();
        editor.bind("data", "x.unknown", &ui);
        assert_eq!(editor.mode(), Some(EditorMode::PlainText));
    }

    #[test]
    fn test_refresh_and_teardown_without_instance_are_noops() {
        let ui = RecordingSink::default();
        let mut editor = EditorAdapter::new();
        editor.refresh(&ui);
        editor.teardown(&ui);
        assert!(ui.take().is_empty());
        assert_eq!(editor.value(), None);
    }
}
