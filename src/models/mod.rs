//! # 数据模型模块
//!
//! 定义了与前端 TypeScript 类型一一对应的 Rust 数据结构。
//! 需要跨 IPC 或写入存储的结构体均派生 `Serialize` / `Deserialize`。
//! - `project` - 项目、项目类型和新建项目表单
//! - `settings` - 应用设置（Webhook URL）
//! - `section` - 报告章节标识和静态章节描述
//! - `draft` - 初稿请求、附件、引用和初稿结果

pub mod draft;
pub mod project;
pub mod section;
pub mod settings;
