//! # 持久化存储服务
//!
//! 在注入的 `KeyValueStore` 后端之上实现两条相互独立的记录：
//! - 项目列表（键 `shinhwa_projects`）：最新创建的项目排在最前
//! - 应用设置（键 `shinhwa_settings`）：单例
//!
//! ## 容错策略
//! 读取时遇到缺失、损坏或无法解析的数据一律视为"没有数据"，
//! 返回空列表或默认设置并记录警告日志，绝不把错误抛给调用方。
//! 写入失败属于 I/O 故障而非数据损坏，以 `StoreError` 返回。
//!
//! ## 并发
//! 同一 `Storage`（及其克隆）内的读-改-写由写锁串行化；
//! 不做跨进程加锁，假定同一时刻只有一个客户端实例。

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;

use thiserror::Error;

use crate::models::project::{NewProject, Project, ProjectError};
use crate::models::settings::AppSettings;
use crate::services::kv::KeyValueStore;

/// 项目列表的存储键
pub const PROJECTS_KEY: &str = "shinhwa_projects";

/// 应用设置的存储键
pub const SETTINGS_KEY: &str = "shinhwa_settings";

/// 存储写入错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("저장소 쓰기 실패 ({key}): {source}")]
    Write {
        key: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("직렬화 실패: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// 设置校验错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("올바른 Webhook URL 형식이 아닙니다 (http/https 절대 URL 필요): {0}")]
    InvalidWebhookUrl(String),
}

/// 持久化存储
///
/// 持有一个可共享的后端实例，`Clone` 只复制 `Arc`。
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl Storage {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    // ======== 项目 ========

    /// 读取全部项目，按创建时间倒序（最新在前）
    ///
    /// 数据缺失、损坏或读取失败时返回空列表；
    /// 单条无法识别的记录（如未知的项目类型）被跳过并记录警告。
    pub fn list_projects(&self) -> Vec<Project> {
        self.read_project_records()
            .into_iter()
            .enumerate()
            .filter_map(|(i, record)| match serde_json::from_value::<Project>(record) {
                Ok(project) => Some(project),
                Err(e) => {
                    log::warn!("프로젝트 항목 [{}] 을 건너뜁니다: {}", i, e);
                    None
                }
            })
            .collect()
    }

    /// 把项目插入列表最前面并整体写回
    ///
    /// 在原始记录上操作，已存储但无法识别的记录原样保留。
    pub fn save_project(&self, project: Project) -> Result<(), StoreError> {
        let _guard = self.lock_writes();
        let mut records = self.read_project_records();
        records.insert(0, serde_json::to_value(&project)?);
        let content = serde_json::to_string(&records)?;
        self.write_raw(PROJECTS_KEY, &content)
    }

    /// 按 ID 线性查找项目
    pub fn get_project_by_id(&self, id: &str) -> Option<Project> {
        self.list_projects().into_iter().find(|p| p.id == id)
    }

    /// 校验新建项目表单，分配 ID 和创建时间后保存
    pub fn create_project(&self, form: NewProject) -> Result<Project, StoreError> {
        let project = form.into_project()?;
        self.save_project(project.clone())?;
        log::info!("프로젝트 생성: {} ({})", project.name, project.id);
        Ok(project)
    }

    // ======== 设置 ========

    /// 读取应用设置；缺失或损坏时返回默认 Webhook URL
    pub fn get_settings(&self) -> AppSettings {
        let Some(raw) = self.read_raw(SETTINGS_KEY) else {
            return AppSettings::default();
        };

        match serde_json::from_str::<AppSettings>(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("설정을 불러오지 못했습니다. 기본값을 사용합니다: {}", e);
                AppSettings::default()
            }
        }
    }

    /// 覆盖保存应用设置
    ///
    /// 非空 URL 必须是 http/https 绝对 URL；空 URL 允许保存，
    /// 在生成初稿时作为配置错误报告。
    pub fn save_settings(&self, settings: &AppSettings) -> Result<(), StoreError> {
        validate_webhook_url(&settings.webhook_url)?;
        let content = serde_json::to_string(settings)?;
        let _guard = self.lock_writes();
        self.write_raw(SETTINGS_KEY, &content)
    }

    // ======== 内部辅助 ========

    /// 写锁只保护 `()`，持锁线程 panic 后锁状态仍然有效
    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 读取项目列表的原始记录；整体不是数组时视为没有数据
    fn read_project_records(&self) -> Vec<Value> {
        let Some(raw) = self.read_raw(PROJECTS_KEY) else {
            return Vec::new();
        };

        match serde_json::from_str::<Option<Vec<Value>>>(&raw) {
            Ok(records) => records.unwrap_or_default(),
            Err(e) => {
                log::warn!("프로젝트 목록을 불러오지 못했습니다: {}", e);
                Vec::new()
            }
        }
    }

    /// 读取原始文本；读取失败视为没有数据
    fn read_raw(&self, key: &str) -> Option<String> {
        match self.backend.get_item(key) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("저장소 읽기 실패 ({}): {}", key, e);
                None
            }
        }
    }

    fn write_raw(&self, key: &'static str, content: &str) -> Result<(), StoreError> {
        self.backend
            .set_item(key, content)
            .map_err(|source| StoreError::Write { key, source })
    }
}

/// 校验 Webhook URL：空字符串放行，非空时必须是 http/https 绝对 URL
fn validate_webhook_url(url: &str) -> Result<(), SettingsError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    match reqwest::Url::parse(trimmed) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(SettingsError::InvalidWebhookUrl(url.to_string())),
    }
}
