//! # 初稿请求与结果数据模型
//!
//! 定义了初稿生成请求（DraftRequest）、参考资料附件（Attachment）、
//! 引用（Citation）和初稿结果（DraftResult）。
//!
//! 初稿结果只在当前会话中使用，不做持久化。

use serde::{Deserialize, Serialize};

use crate::models::project::ProjectType;
use crate::models::section::SectionType;

/// 引用页码：Webhook 端可能返回数字或字符串（如 "12-14"）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CitationPage {
    Number(serde_json::Number),
    Text(String),
}

impl CitationPage {
    /// 页码为整数时返回该整数
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CitationPage::Number(n) => n.as_i64(),
            CitationPage::Text(_) => None,
        }
    }
}

/// 引用：支撑初稿某一部分的参考资料片段
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface Citation {
///   text: string;
///   source: string;
///   page?: string | number;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// 被引用的原文片段
    pub text: String,

    /// 来源文件名
    pub source: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<CitationPage>,
}

/// 初稿结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftResult {
    pub content: String,
    pub citations: Vec<Citation>,
}

/// 参考资料附件：原始文件名 + 二进制内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// 初稿生成请求
///
/// 每个标量字段对应 multipart 请求中的一个同名文本字段，
/// 每个附件对应一个重复的 `files` 文件字段。
#[derive(Debug, Clone)]
pub struct DraftRequest {
    pub webhook_url: String,
    pub project_name: String,
    pub project_type: ProjectType,
    pub section_type: SectionType,
    /// 补充说明，可以为空字符串
    pub additional_instructions: String,
    /// 附件列表，按用户添加顺序排列
    pub files: Vec<Attachment>,
}
