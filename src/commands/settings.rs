//! # 设置 Tauri Commands
//!
//! - `read_settings` / `save_settings` - 读写 Webhook 设置

use tauri::State;

use crate::models::settings::AppSettings;
use crate::services::state::AppState;

/// 读取应用设置
///
/// 未保存过或数据损坏时返回默认的占位 Webhook URL。
#[tauri::command]
pub async fn read_settings(state: State<'_, AppState>) -> Result<AppSettings, String> {
    Ok(state.storage.get_settings())
}

/// 保存应用设置
///
/// # 错误
/// URL 不是 http/https 绝对地址，或写入存储失败时返回错误信息
#[tauri::command]
pub async fn save_settings(
    settings: AppSettings,
    state: State<'_, AppState>,
) -> Result<(), String> {
    state
        .storage
        .save_settings(&settings)
        .map_err(|e| e.to_string())
}
