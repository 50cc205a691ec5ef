//! # 预览渲染
//!
//! 两种工作方式：
//! - **项目模式**：激活文件是 HTML 时，直接用编辑器缓冲区作为完整文档渲染，
//!   不经过后端；其他类型的文件则让预览框导航到后端的整项目预览地址，
//!   由后端组装多文件结果。没有激活项目时不做任何渲染。
//! - **三栏模式**：按固定顺序拼接 HTML、`<style>` 包裹的 CSS、`<script>` 包裹的 JS，
//!   每次输入都整体重建并替换，不做防抖。

use crate::models::ui::{UiEvent, UiSink};
use crate::utils::path::file_extension;

/// 预览目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewTarget {
    /// 直接替换为这份文档
    Document(String),
    /// 导航到后端预览地址
    Endpoint(String),
}

impl PreviewTarget {
    pub fn render(self, ui: &impl UiSink) {
        match self {
            PreviewTarget::Document(html) => ui.emit(UiEvent::PreviewDocument { html }),
            PreviewTarget::Endpoint(url) => ui.emit(UiEvent::PreviewNavigate { url }),
        }
    }
}

/// 决定项目模式下的预览目标
///
/// # 参数
/// - `has_project` - 是否有激活项目
/// - `active_file` - 当前激活文件路径
/// - `buffer` - 编辑器实时缓冲区
/// - `endpoint` - 惰性生成后端预览地址（只在需要时调用）
///
/// # 返回值
/// 没有激活项目，或预览地址无法生成时返回 None
pub fn project_target(
    has_project: bool,
    active_file: Option<&str>,
    buffer: Option<&str>,
    endpoint: impl FnOnce() -> Option<String>,
) -> Option<PreviewTarget> {
    if !has_project {
        return None;
    }

    let is_html = active_file
        .and_then(file_extension)
        .is_some_and(|ext| ext == "html");

    match (is_html, buffer) {
        (true, Some(html)) => Some(PreviewTarget::Document(html.to_string())),
        _ => endpoint().map(PreviewTarget::Endpoint),
    }
}

/// 三栏模式的文档拼接
///
/// 结果恒等于 `html + "<style>" + css + "</style>" + "<script>" + js + "</script>"`，
/// 包括任意一栏为空字符串的情况。
pub fn compose_document(html: &str, css: &str, js: &str) -> String {
    let mut doc = String::with_capacity(html.len() + css.len() + js.len() + 34);
    doc.push_str(html);
    doc.push_str("<style>");
    doc.push_str(css);
    doc.push_str("</style>");
    doc.push_str("<script>");
    doc.push_str(js);
    doc.push_str("</script>");
    doc
}
