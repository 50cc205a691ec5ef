//! # Web Workspace - Cargo 构建脚本
//!
//! 仅在启用 `desktop` feature 时调用 `tauri_build::build()`，
//! 根据 `tauri.conf.json` 生成 Tauri 运行时所需的资源绑定代码。
//! 未启用时（纯会话核心 + 测试）构建脚本不做任何事。

fn main() {
    #[cfg(feature = "desktop")]
    tauri_build::build()
}
