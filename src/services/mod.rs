//! # 业务逻辑服务模块
//!
//! 包含核心业务逻辑的实现，与 Tauri command 层解耦：
//! - `kv` - 键值存储后端（文件 / 内存）
//! - `file_guard` - 文件写入守卫：路径验证 + 单代备份 + 原子写入
//! - `storage` - 项目列表和设置的持久化存储（读取容错）
//! - `attachments` - 参考资料加载、扩展名白名单和大小格式化
//! - `webhook` - 初稿生成 Webhook 客户端（multipart 请求 + 响应校验）
//! - `tracker` - 初稿请求追踪器：新请求取代进行中的旧请求
//! - `drafting` - "生成初稿"完整流程
//! - `state` - 应用全局状态

pub mod attachments;
pub mod drafting;
pub mod file_guard;
pub mod kv;
pub mod state;
pub mod storage;
pub mod tracker;
pub mod webhook;
