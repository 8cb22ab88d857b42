//! # 初稿生成 Tauri Commands
//!
//! - `list_report_sections` - 报告章节目录（静态数据）
//! - `list_project_types` - 项目类型下拉框选项
//! - `describe_attachments` - 已选参考资料的文件名和大小
//! - `attachment_filter` - 文件选择对话框的扩展名过滤串
//! - `generate_draft` - 为项目的指定章节生成初稿

use std::path::PathBuf;

use tauri::State;

use crate::models::draft::DraftResult;
use crate::models::project::ProjectType;
use crate::models::section::{REPORT_SECTIONS, ReportSection};
use crate::services::attachments::{self, AttachmentInfo};
use crate::services::drafting::{self, DraftParams};
use crate::services::state::AppState;

#[tauri::command]
pub fn list_report_sections() -> Vec<ReportSection> {
    REPORT_SECTIONS.to_vec()
}

#[tauri::command]
pub fn list_project_types() -> Vec<&'static str> {
    ProjectType::ALL.iter().map(|t| t.as_str()).collect()
}

#[tauri::command]
pub fn attachment_filter() -> String {
    attachments::accept_filter()
}

/// 读取参考资料的元信息
///
/// # 错误
/// 任一文件无法读取时返回错误信息
#[tauri::command]
pub async fn describe_attachments(file_paths: Vec<PathBuf>) -> Result<Vec<AttachmentInfo>, String> {
    let mut infos = Vec::with_capacity(file_paths.len());
    for path in &file_paths {
        infos.push(attachments::describe(path).await.map_err(|e| e.to_string())?);
    }
    Ok(infos)
}

/// 生成初稿
///
/// 同一时间只保留最新一次请求的结果：新的调用会取代仍在进行中的旧请求，
/// 旧请求以"已被取代"错误结束，前端可以直接忽略该错误。
///
/// # 错误
/// 项目不存在、未选择参考资料、Webhook 未配置、请求失败或响应格式错误时返回错误信息
#[tauri::command]
pub async fn generate_draft(
    params: DraftParams,
    state: State<'_, AppState>,
) -> Result<DraftResult, String> {
    drafting::generate_for_project(&state, params)
        .await
        .map_err(|e| e.to_string())
}
