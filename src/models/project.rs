//! # 项目数据模型
//!
//! 定义了报告项目（Project）、项目类型（ProjectType）和新建项目表单（NewProject），
//! 对应前端 TypeScript 中的 `Project` 接口和新建项目页面的表单状态。
//!
//! 项目一经创建即不可变，仅由持久化存储持有，前端只拿到副本。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 项目类型：固定的枚举集合
///
/// 序列化为韩文原文字符串，与 Webhook 端工作流中使用的取值保持一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectType {
    /// 문화재 보수정비（文化遗产修缮整备）
    #[serde(rename = "문화재 보수정비")]
    HeritageRepair,
    /// 도시생태현황（城市生态现状）
    #[serde(rename = "도시생태현황")]
    UrbanEcology,
    /// 환경영향평가（环境影响评价）
    #[serde(rename = "환경영향평가")]
    EnvironmentalImpact,
    /// 기타（其他）
    #[serde(rename = "기타")]
    Other,
}

impl ProjectType {
    /// 所有项目类型，按表单下拉框中的显示顺序排列（第一个为默认值）
    pub const ALL: [ProjectType; 4] = [
        ProjectType::HeritageRepair,
        ProjectType::UrbanEcology,
        ProjectType::EnvironmentalImpact,
        ProjectType::Other,
    ];

    /// 返回该类型在表单和 multipart 请求中使用的原文标签
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::HeritageRepair => "문화재 보수정비",
            ProjectType::UrbanEcology => "도시생태현황",
            ProjectType::EnvironmentalImpact => "환경영향평가",
            ProjectType::Other => "기타",
        }
    }
}

impl Default for ProjectType {
    fn default() -> Self {
        ProjectType::ALL[0]
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectType {
    type Err = ProjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ProjectError::UnknownType(s.to_string()))
    }
}

/// 项目数据结构
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface Project {
///   id: string;
///   name: string;
///   type: string;
///   createdAt: number;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// 唯一标识符：UUID v4 字符串，在存储中唯一
    pub id: String,

    /// 项目名称：非空
    pub name: String,

    /// 项目类型
    #[serde(rename = "type")]
    pub project_type: ProjectType,

    /// 创建时间：Unix 毫秒时间戳
    pub created_at: i64,
}

/// 新建项目表单
///
/// 由前端提交，经 `into_project()` 校验后生成带 ID 和时间戳的 `Project`。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,

    #[serde(rename = "type", default)]
    pub project_type: ProjectType,
}

/// 项目相关错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectError {
    #[error("프로젝트명을 입력해주세요.")]
    EmptyName,

    #[error("알 수 없는 프로젝트 유형입니다: {0}")]
    UnknownType(String),
}

impl NewProject {
    /// 校验表单并生成新项目
    ///
    /// 名称在去除首尾空白后不能为空；保存的名称保持用户输入的原样。
    /// ID 为新生成的 UUID v4，创建时间取当前 UTC 毫秒时间戳。
    pub fn into_project(self) -> Result<Project, ProjectError> {
        if self.name.trim().is_empty() {
            return Err(ProjectError::EmptyName);
        }

        Ok(Project {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name,
            project_type: self.project_type,
            created_at: chrono::Utc::now().timestamp_millis(),
        })
    }
}
