//! # 工具函数模块
//!
//! - `path` - 应用数据目录定位

pub mod path;

#[cfg(test)]
pub(crate) mod mock_webhook;
