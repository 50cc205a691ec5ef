//! # 业务逻辑服务模块
//!
//! 包含会话核心的实现，与 Tauri command 层解耦：
//! - `api` - 工作区后端 HTTP 客户端（`WorkspaceApi` trait + reqwest 实现）
//! - `config` - 应用配置读取（后端地址）
//! - `preferences` - 主题偏好持久化
//! - `editor` - 编辑器适配器：模式映射、实例生命周期、实时缓冲区
//! - `file_browser` - 当前项目的扁平文件列表和激活项
//! - `preview` - 预览目标决策和三栏文档拼接
//! - `session` - 项目会话控制器：视图状态机、请求编排、过期响应过滤
//! - `dispatch` - 界面动作分发表
//! - `three_pane` - 无项目概念的三栏工作区
//! - `resolver` - 技术栈关键词识别

pub mod api;
pub mod config;
pub mod dispatch;
pub mod editor;
pub mod file_browser;
pub mod preferences;
pub mod preview;
pub mod resolver;
pub mod session;
pub mod three_pane;

#[cfg(test)]
pub mod testing;
