//! # 应用设置数据模型
//!
//! 定义了应用设置（AppSettings），对应前端 TypeScript 中的 `AppSettings` 接口。
//! 设置为单例记录，与项目列表分开存储。

use serde::{Deserialize, Serialize};

/// 未配置时使用的占位 Webhook URL
pub const DEFAULT_WEBHOOK_URL: &str =
    "https://your-n8n-instance.com/webhook/heritage-report-draft";

/// 应用设置数据结构
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface AppSettings {
///   webhookUrl: string;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// 处理初稿生成的 n8n 工作流 Webhook URL
    pub webhook_url: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
        }
    }
}
