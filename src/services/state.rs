//! # 应用全局状态
//!
//! 通过 Tauri 的 `manage()` 注册为应用状态，所有 command 函数通过
//! `State<AppState>` 参数注入访问。包含：
//! - `storage` - 项目列表和设置的持久化存储
//! - `drafts` - 初稿 Webhook 客户端（复用连接池）
//! - `tracker` - 初稿请求追踪器，用于取代过期请求
//!
//! ## 线程安全
//! 三个成员都可以在多个 command 线程之间共享：存储后端自带锁，
//! `reqwest::Client` 和 `watch` 通道本身是线程安全的。

use std::sync::Arc;

use crate::services::kv::{FileStore, KeyValueStore};
use crate::services::storage::Storage;
use crate::services::tracker::DraftTracker;
use crate::services::webhook::DraftClient;
use crate::utils::path;

pub struct AppState {
    pub storage: Storage,
    pub drafts: DraftClient,
    pub tracker: DraftTracker,
}

impl AppState {
    /// 使用指定的存储后端创建状态（测试中注入内存后端）
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage: Storage::new(backend),
            drafts: DraftClient::new(),
            tracker: DraftTracker::new(),
        }
    }

    /// 使用数据目录下的文件存储创建状态
    ///
    /// # 错误
    /// 无法确定数据目录时返回错误信息
    pub fn open_default() -> Result<Self, String> {
        let data_dir = path::get_data_dir()?;
        log::info!("데이터 디렉터리: {}", data_dir.display());
        Ok(Self::new(Arc::new(FileStore::new(data_dir))))
    }
}
