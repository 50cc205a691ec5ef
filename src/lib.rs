//! # Web Workspace - 应用核心初始化模块
//!
//! 迷你 IDE 的会话核心和桌面外壳：选择或初始化项目、浏览文件、编辑、
//! 实时预览 HTML/CSS/JS，并通过工作区后端完成保存、运行和导出。
//!
//! ## 架构说明
//! 会话核心（`services/`）不直接接触界面，而是产生 `UiEvent` 交给 `UiSink`；
//! webview 只负责渲染事件和转发用户操作。桌面外壳（Tauri 窗口、IPC commands、
//! 事件推送）位于 `desktop` feature 之后，核心可以脱离 webview 编译和测试。
//!
//! ## 模块结构
//! - `commands/` - Tauri command 处理函数（IPC 接口层，`desktop` feature）
//! - `models/` - 数据模型（后端线格式、界面事件、应用配置）
//! - `services/` - 核心业务逻辑（会话控制、后端客户端、编辑器、预览、技术栈识别）
//! - `utils/` - 通用工具函数

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(feature = "desktop")]
mod commands;
#[cfg(feature = "desktop")]
mod shell;

#[cfg(feature = "desktop")]
use tauri::Manager;

#[cfg(feature = "desktop")]
use services::{
    api::HttpWorkspaceApi, config, preferences::FilePreferenceStore,
    session::SessionController, three_pane::ThreePaneWorkspace,
};
#[cfg(feature = "desktop")]
use shell::TauriUiSink;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
/// Tauri 应用启动函数
///
/// 1. 注册 Opener 插件（导出下载交给系统浏览器）
/// 2. 注册所有自定义 Tauri commands
/// 3. 在 `setup` 钩子中注册调试专用的日志插件，读取后端地址配置，
///    创建会话控制器和三栏工作区并注册为 managed state
/// 4. 生成应用上下文并启动事件循环
///
/// # Panics
/// Tauri 应用启动失败（例如配置文件缺失或窗口创建失败）时通过 `.expect()` 触发 panic。
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .invoke_handler(tauri::generate_handler![
            // 项目会话 commands
            commands::session::bootstrap,
            commands::session::dispatch_action,
            commands::session::list_action_names,
            commands::session::list_projects,
            commands::session::session_snapshot,
            // 三栏工作区 commands
            commands::three_pane::three_pane_input,
            commands::three_pane::three_pane_rename,
            commands::three_pane::three_pane_save,
            commands::three_pane::three_pane_export,
            // 技术栈识别 commands
            commands::resolver::resolve_stack,
            commands::resolver::suggest_config,
        ])
        .setup(|app| {
            // 仅在开发调试模式下启用日志插件
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            let config = tauri::async_runtime::block_on(config::load())?;
            log::info!("工作区后端地址: {}", config.api_base_url);
            let api = HttpWorkspaceApi::from_config(&config)?;
            let prefs = FilePreferenceStore::new(utils::path::get_preferences_file_path()?);

            let handle = app.handle().clone();
            app.manage(SessionController::new(
                api.clone(),
                TauriUiSink::new(handle.clone()),
                prefs,
            ));
            app.manage(ThreePaneWorkspace::new(api, TauriUiSink::new(handle)));
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
