//! # 报告章节数据模型
//!
//! 定义了报告章节标识（SectionType）和章节的静态描述数据（ReportSection）。
//! 章节集合是固定的封闭集合，属于静态配置，不随项目持久化。

use serde::{Deserialize, Serialize};

/// 报告章节标识
///
/// 序列化为韩文原文，作为 multipart 请求中 `sectionType` 字段的取值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionType {
    /// 일반현황：对象地的基本信息概要
    #[serde(rename = "일반현황")]
    GeneralStatus,
    /// 실태조사：现场调查结果分析
    #[serde(rename = "실태조사")]
    FieldSurvey,
    /// 유사사례：通过相关案例得出启示
    #[serde(rename = "유사사례")]
    ComparableCases,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::GeneralStatus => "일반현황",
            SectionType::FieldSurvey => "실태조사",
            SectionType::ComparableCases => "유사사례",
        }
    }

    /// 返回该章节对应的静态描述
    pub fn section(&self) -> &'static ReportSection {
        match self {
            SectionType::GeneralStatus => &REPORT_SECTIONS[0],
            SectionType::FieldSurvey => &REPORT_SECTIONS[1],
            SectionType::ComparableCases => &REPORT_SECTIONS[2],
        }
    }
}

/// 页面初次打开时默认选中的章节
impl Default for SectionType {
    fn default() -> Self {
        SectionType::GeneralStatus
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 报告章节的静态描述
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface ReportSection {
///   id: SectionType;
///   title: string;
///   description: string;
///   items: string[];
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub id: SectionType,
    pub title: &'static str,
    pub description: &'static str,
    /// 章节下的子项目，按报告中的书写顺序排列
    pub items: &'static [&'static str],
}

/// 全部报告章节，按报告目录顺序排列
pub static REPORT_SECTIONS: [ReportSection; 3] = [
    ReportSection {
        id: SectionType::GeneralStatus,
        title: "일반현황",
        description: "대상지의 기본 정보를 요약합니다.",
        items: &["위치/면적", "연혁", "지정현황", "자연/인문환경"],
    },
    ReportSection {
        id: SectionType::FieldSurvey,
        title: "실태조사",
        description: "현장 조사 결과를 분석합니다.",
        items: &["보존상태", "훼손현황", "수리이력", "구조안전성"],
    },
    ReportSection {
        id: SectionType::ComparableCases,
        title: "유사사례",
        description: "관련 사례를 통한 시사점을 도출합니다.",
        items: &["사례개요", "정비내용", "적용기법", "시사점"],
    },
];
