//! # 初稿生成 Webhook 客户端
//!
//! 把初稿请求转换为一次发往用户配置的 n8n Webhook 的 multipart POST 请求，
//! 并把响应校验、规范化为类型化的 `DraftResult`。
//!
//! ## 请求语义
//! - Webhook URL 为空或无法解析时立即返回配置错误，不发起任何网络请求
//! - 只发送一次请求：不重试、不去重，组件本身不设置超时
//! - 除 multipart 编码所需的 Content-Type（含自动生成的 boundary）外不加自定义头
//!
//! ## 响应校验
//! - 非 2xx 状态码 → 传输错误（携带状态码和状态文本）
//! - 响应体不是 JSON，或 `content` 缺失/不是字符串 → 响应格式错误
//! - `citations` 缺失或不是数组 → 规范化为空列表；数组中无法识别的元素被丢弃

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use thiserror::Error;

use crate::models::draft::{Attachment, Citation, DraftRequest, DraftResult};
use crate::services::attachments;

/// 初稿错误的分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftErrorKind {
    /// 配置错误：需要用户到设置页面修正
    Configuration,
    /// 传输错误：非成功状态码或网络故障
    Transport,
    /// 响应格式错误：服务器返回了成功状态，但内容不符合约定
    ResponseShape,
    /// 请求被更新的请求取代
    Superseded,
}

/// 初稿生成错误
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Webhook URL이 설정되지 않았습니다. 설정 페이지에서 URL을 입력해주세요.")]
    MissingWebhookUrl,

    #[error("Webhook URL 형식이 올바르지 않습니다: {0}")]
    InvalidWebhookUrl(String),

    #[error("첨부 파일 형식 오류 ({file_name}): {reason}")]
    InvalidAttachment { file_name: String, reason: String },

    #[error("서버 요청 실패: {status} {status_text}")]
    Status { status: u16, status_text: String },

    #[error("네트워크 요청 실패: {0}")]
    Network(#[source] reqwest::Error),

    #[error("서버 응답 형식이 올바르지 않습니다 ({0})")]
    MalformedResponse(String),

    #[error("더 최근의 초안 요청으로 대체되었습니다.")]
    Superseded,
}

impl DraftError {
    pub fn kind(&self) -> DraftErrorKind {
        match self {
            DraftError::MissingWebhookUrl
            | DraftError::InvalidWebhookUrl(_)
            | DraftError::InvalidAttachment { .. } => DraftErrorKind::Configuration,
            DraftError::Status { .. } | DraftError::Network(_) => DraftErrorKind::Transport,
            DraftError::MalformedResponse(_) => DraftErrorKind::ResponseShape,
            DraftError::Superseded => DraftErrorKind::Superseded,
        }
    }

    /// 非成功状态码时返回该状态码
    pub fn status(&self) -> Option<u16> {
        match self {
            DraftError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// 初稿生成客户端
///
/// 内部持有一个可复用连接池的 `reqwest::Client`，`Clone` 开销很小。
#[derive(Debug, Clone, Default)]
pub struct DraftClient {
    http: reqwest::Client,
}

impl DraftClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用外部构建的 HTTP 客户端（代理、TLS 等由调用方配置）
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// 请求生成一个章节的初稿
    ///
    /// 失败时记录错误日志后返回错误，不返回部分结果。
    pub async fn generate_draft(&self, request: DraftRequest) -> Result<DraftResult, DraftError> {
        let result = self.send(request).await;
        if let Err(e) = &result {
            log::error!("Draft generation failed: {}", e);
        }
        result
    }

    async fn send(&self, request: DraftRequest) -> Result<DraftResult, DraftError> {
        let url = parse_webhook_url(&request.webhook_url)?;
        let form = build_form(&request)?;

        log::info!(
            "초안 요청 전송: section={} files={}",
            request.section_type,
            request.files.len()
        );

        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(DraftError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DraftError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await.map_err(DraftError::Network)?;
        let value: Value = serde_json::from_slice(&body)
            .map_err(|e| DraftError::MalformedResponse(format!("JSON 파싱 실패: {e}")))?;

        parse_draft_response(value)
    }
}

/// 校验 Webhook URL；空白视为未配置
fn parse_webhook_url(raw: &str) -> Result<reqwest::Url, DraftError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DraftError::MissingWebhookUrl);
    }
    reqwest::Url::parse(trimmed).map_err(|e| DraftError::InvalidWebhookUrl(format!("{trimmed}: {e}")))
}

/// 构建 multipart 表单：四个文本字段 + 每个附件一个 `files` 字段
fn build_form(request: &DraftRequest) -> Result<Form, DraftError> {
    let mut form = Form::new()
        .text("projectName", request.project_name.clone())
        .text("projectType", request.project_type.as_str())
        .text("sectionType", request.section_type.as_str())
        .text(
            "additionalInstructions",
            request.additional_instructions.clone(),
        );

    for file in &request.files {
        form = form.part("files", file_part(file)?);
    }

    Ok(form)
}

fn file_part(file: &Attachment) -> Result<Part, DraftError> {
    Part::bytes(file.content.clone())
        .file_name(file.file_name.clone())
        .mime_str(attachments::mime_for(&file.file_name))
        .map_err(|e| DraftError::InvalidAttachment {
            file_name: file.file_name.clone(),
            reason: e.to_string(),
        })
}

/// 校验并规范化 Webhook 响应
///
/// `content` 必须是字符串；`citations` 不是数组时视为空列表，
/// 数组中无法解析为 `Citation` 的元素会被丢弃并记录警告。
pub fn parse_draft_response(value: Value) -> Result<DraftResult, DraftError> {
    let Value::Object(mut map) = value else {
        return Err(DraftError::MalformedResponse(
            "응답이 JSON 객체가 아닙니다".to_string(),
        ));
    };

    let content = match map.remove("content") {
        Some(Value::String(content)) => content,
        _ => {
            return Err(DraftError::MalformedResponse("content 누락".to_string()));
        }
    };

    let citations = match map.remove("citations") {
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .filter_map(|(i, item)| match serde_json::from_value::<Citation>(item) {
                Ok(citation) => Some(citation),
                Err(e) => {
                    log::warn!("citations[{}] 항목을 건너뜁니다: {}", i, e);
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(DraftResult { content, citations })
}
