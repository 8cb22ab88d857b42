//! # Tauri Command 处理模块
//!
//! 本模块包含所有注册到 Tauri 的 command 处理函数。
//! 每个子模块对应一个功能域：
//! - `projects` - 项目列表、查询和新建
//! - `settings` - Webhook 设置读写
//! - `drafts` - 章节和项目类型目录、附件元信息、初稿生成
//!
//! 所有 command 都是服务层的薄包装，错误在边界处转换为字符串交给前端展示。

pub mod drafts;
pub mod projects;
pub mod settings;
