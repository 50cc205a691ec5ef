//! # 数据模型模块
//!
//! 定义了会话核心与后端、与展示层之间交换的 Rust 数据结构。
//! 所有结构体均派生 `Serialize` 和/或 `Deserialize`，用于 HTTP 线格式和 Tauri IPC 传输。
//! - `project` - 项目配置和后端 API 的请求/响应结构
//! - `settings` - 应用配置
//! - `ui` - 界面更新事件、主题、视图、编辑器模式

pub mod project;
pub mod settings;
pub mod ui;
