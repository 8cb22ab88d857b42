//! # 项目 Tauri Commands
//!
//! 提供项目相关的 Tauri command 处理函数：
//! - `list_projects` - 读取项目列表（最新在前）
//! - `get_project` - 按 ID 查询项目
//! - `create_project` - 校验表单并新建项目

use tauri::State;

use crate::models::project::{NewProject, Project};
use crate::services::state::AppState;

/// 读取全部项目
///
/// 存储数据缺失或损坏时返回空数组，永不失败。
#[tauri::command]
pub async fn list_projects(state: State<'_, AppState>) -> Result<Vec<Project>, String> {
    Ok(state.storage.list_projects())
}

/// 按 ID 查询项目
///
/// # 返回值
/// 找到时返回项目，否则返回 `null`，由前端决定是否跳回首页
#[tauri::command]
pub async fn get_project(
    id: String,
    state: State<'_, AppState>,
) -> Result<Option<Project>, String> {
    Ok(state.storage.get_project_by_id(&id))
}

/// 新建项目
///
/// # 参数
/// - `form` - 新建项目表单（名称 + 类型）
///
/// # 返回值
/// 返回分配了 ID 和创建时间的新项目，前端据此跳转到项目详情页
///
/// # 错误
/// 名称为空或写入存储失败时返回错误信息
#[tauri::command]
pub async fn create_project(
    form: NewProject,
    state: State<'_, AppState>,
) -> Result<Project, String> {
    state.storage.create_project(form).map_err(|e| e.to_string())
}
