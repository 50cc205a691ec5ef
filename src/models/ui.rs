//! # 界面更新事件模型
//!
//! 会话核心不直接操作任何界面元素，而是产生一系列 [`UiEvent`]，
//! 由展示层（webview 或测试中的记录器）按顺序应用。
//!
//! 桌面外壳中这些事件通过 `workspace://ui` 通道推送到前端，
//! 序列化格式为带 `kind` 标签的 camelCase JSON：
//! ```json
//! { "kind": "notify", "level": "success", "message": "File saved successfully!", "ttlMs": 3000 }
//! ```

use serde::{Deserialize, Serialize};

/// 短暂通知的显示时长（毫秒），到期后自动消失
pub const NOTIFICATION_TTL_MS: u64 = 3000;

/// 顶层视图
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    /// 项目初始化/选择视图（初始状态）
    #[default]
    Initializer,
    /// 文件浏览 + 编辑器 + 预览视图
    Ide,
}

/// 主题
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// 持久化时使用的字符串值
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// 解析持久化值，未知值返回 None
    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// 主题切换按钮上显示的图标：显示的是"切换后"的主题
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }
}

/// 编辑器语言模式
///
/// 序列化值即编辑器组件的 mode 名称。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorMode {
    #[serde(rename = "htmlmixed")]
    Markup,
    #[serde(rename = "css")]
    Stylesheet,
    #[serde(rename = "javascript")]
    Script,
    #[serde(rename = "python")]
    Python,
    #[serde(rename = "text")]
    PlainText,
}

/// 控制台输出行的标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTag {
    Info,
    Success,
    Error,
}

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// 文件列表中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntryView {
    pub path: String,
    pub active: bool,
}

/// 界面更新事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum UiEvent {
    /// 切换顶层视图
    ShowView { view: View },

    /// 项目下拉框的候选项
    ProjectOptions { projects: Vec<String> },

    /// 重新渲染文件列表（同时携带激活标记）
    FileList { entries: Vec<FileEntryView> },

    /// 标记激活文件和激活标签页；`None` 表示清空
    ActiveFile { path: Option<String> },

    /// 创建一个新的编辑器实例
    EditorMount {
        instance: u64,
        content: String,
        mode: EditorMode,
    },

    /// 销毁编辑器实例
    EditorTeardown { instance: u64 },

    /// 编辑器重新测量布局（视图从隐藏变为可见后必须调用）
    EditorRefresh { instance: u64 },

    /// 以完整文档替换预览内容（srcdoc）
    PreviewDocument { html: String },

    /// 让预览框导航到后端预览地址
    PreviewNavigate { url: String },

    /// 清空控制台并显示一行状态
    ConsoleClear { banner: String },

    /// 追加一行控制台输出
    ConsoleLine { tag: ConsoleTag, text: String },

    /// 短暂通知
    Notify {
        level: NotificationLevel,
        message: String,
        ttl_ms: u64,
    },

    /// 应用主题并更新切换按钮图标
    Theme { theme: Theme, label: String },

    /// 整页导航（用于导出下载）
    Navigate { url: String },
}

impl UiEvent {
    pub fn notify(level: NotificationLevel, message: impl Into<String>) -> Self {
        UiEvent::Notify {
            level,
            message: message.into(),
            ttl_ms: NOTIFICATION_TTL_MS,
        }
    }

    pub fn theme(theme: Theme) -> Self {
        UiEvent::Theme {
            theme,
            label: theme.toggle_label().to_string(),
        }
    }

    /// 是否为预览更新事件（文档替换或导航）
    pub fn is_preview(&self) -> bool {
        matches!(
            self,
            UiEvent::PreviewDocument { .. } | UiEvent::PreviewNavigate { .. }
        )
    }
}

/// 界面事件的接收端
///
/// 实现者必须按调用顺序应用事件。桌面外壳将事件推送到 webview，
/// 测试中使用记录器收集事件。
pub trait UiSink: Send + Sync {
    fn emit(&self, event: UiEvent);
}
