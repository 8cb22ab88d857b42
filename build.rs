//! # Shinhwa Report Drafter - Cargo 构建脚本
//!
//! 启用 `desktop` feature 时调用 `tauri_build::build()`，
//! 根据 `tauri.conf.json` 生成 Tauri 运行时所需的资源绑定和权限清单。
//! 仅构建核心库（默认 feature）时不做任何事情，避免引入 WebView 系统依赖。

fn main() {
    #[cfg(feature = "desktop")]
    tauri_build::build()
}
