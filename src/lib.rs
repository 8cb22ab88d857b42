//! # Shinhwa Report Drafter - 应用核心库
//!
//! 文化遗产报告初稿作成工具的原生后端：管理报告项目，挑选参考资料，
//! 通过 n8n Webhook 请求 AI 生成的章节初稿。
//!
//! ## 模块结构
//! - `models/` - 数据模型（对应前端 TypeScript 类型）
//! - `services/` - 核心业务逻辑（存储、附件、Webhook 请求、请求追踪）
//! - `utils/` - 通用工具函数
//! - `commands/` - Tauri command 处理函数（IPC 接口层，仅 `desktop` feature）
//!
//! ## 架构说明
//! 通过将初始化逻辑放在 `lib.rs` 而非 `main.rs` 中，
//! Tauri 可以在桌面端（`main.rs`）和移动端入口之间共享此初始化代码。
//! 不启用 `desktop` feature 时只构建核心库，不依赖系统 WebView。

#[cfg(feature = "desktop")]
mod commands;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(feature = "desktop")]
use services::state::AppState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
/// Tauri 应用启动函数
///
/// 1. 注册对话框插件（前端用它挑选参考资料文件）
/// 2. 打开数据目录下的文件存储，注册为全局状态
/// 3. 注册所有自定义 Tauri commands
/// 4. 在 `setup` 钩子中按需注册调试专用插件（日志）
///
/// # Panics
/// 无法确定数据目录或 Tauri 应用启动失败时 panic。
#[cfg(feature = "desktop")]
pub fn run() {
    let state = AppState::open_default().expect("failed to resolve application data directory");

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(state)
        .invoke_handler(tauri::generate_handler![
            // 项目 commands
            commands::projects::list_projects,
            commands::projects::get_project,
            commands::projects::create_project,
            // 设置 commands
            commands::settings::read_settings,
            commands::settings::save_settings,
            // 初稿 commands
            commands::drafts::list_report_sections,
            commands::drafts::list_project_types,
            commands::drafts::attachment_filter,
            commands::drafts::describe_attachments,
            commands::drafts::generate_draft,
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
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
