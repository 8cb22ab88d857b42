//! # 初稿生成流程
//!
//! 对应项目详情页上的"生成初稿"操作，把各服务串成一条线性流程：
//! 1. 按 ID 查找项目
//! 2. 要求至少选择一个参考资料
//! 3. 读取设置中的 Webhook URL（读取失败时回退到默认值）
//! 4. 按顺序从磁盘加载附件
//! 5. 在新签发的追踪票据下调用 Webhook 客户端
//!
//! 与 Tauri command 层解耦，便于在测试中直接调用。

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::models::draft::{DraftRequest, DraftResult};
use crate::models::section::SectionType;
use crate::services::attachments::{self, AttachmentError};
use crate::services::state::AppState;
use crate::services::webhook::DraftError;

/// 生成初稿的参数（来自前端）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftParams {
    pub project_id: String,
    #[serde(default)]
    pub section_type: SectionType,
    #[serde(default)]
    pub additional_instructions: String,
    /// 参考资料的绝对路径，按用户添加顺序排列
    pub file_paths: Vec<PathBuf>,
}

/// 生成流程错误
#[derive(Debug, Error)]
pub enum DraftingError {
    #[error("프로젝트를 찾을 수 없습니다: {0}")]
    ProjectNotFound(String),

    #[error("초안 생성을 위해 최소 1개 이상의 참고 자료를 업로드해주세요.")]
    NoAttachments,

    #[error(transparent)]
    Attachment(#[from] AttachmentError),

    #[error(transparent)]
    Draft(#[from] DraftError),
}

/// 为项目的指定章节生成初稿
pub async fn generate_for_project(
    state: &AppState,
    params: DraftParams,
) -> Result<DraftResult, DraftingError> {
    let project = state
        .storage
        .get_project_by_id(&params.project_id)
        .ok_or_else(|| DraftingError::ProjectNotFound(params.project_id.clone()))?;

    if params.file_paths.is_empty() {
        return Err(DraftingError::NoAttachments);
    }

    let settings = state.storage.get_settings();
    let files = attachments::load_attachments(&params.file_paths).await?;

    let request = DraftRequest {
        webhook_url: settings.webhook_url,
        project_name: project.name,
        project_type: project.project_type,
        section_type: params.section_type,
        additional_instructions: params.additional_instructions,
        files,
    };

    let ticket = state.tracker.begin();
    let result = ticket.run(state.drafts.generate_draft(request)).await?;
    Ok(result)
}
