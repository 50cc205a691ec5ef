//! # Tauri Command 处理模块
//!
//! 本模块包含所有注册到 Tauri 的 command 处理函数。
//! 每个子模块对应一个功能域：
//! - `session` - 项目会话（启动、动作分发、项目列表、状态快照）
//! - `three_pane` - 三栏工作区的输入、保存和导出
//! - `resolver` - 技术栈识别和初始化表单预填

pub mod resolver;
pub mod session;
pub mod three_pane;
