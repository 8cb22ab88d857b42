//! # 路径工具函数
//!
//! 提供应用数据目录的定位：
//! - 默认位于系统数据目录下的 `shinhwa-report/`
//! - 可通过 `SHINHWA_DATA_DIR` 环境变量覆盖（便携安装或调试用）

use std::path::PathBuf;

/// 覆盖数据目录的环境变量名
pub const DATA_DIR_ENV: &str = "SHINHWA_DATA_DIR";

/// 数据目录在系统数据目录下的子目录名
const APP_DIR_NAME: &str = "shinhwa-report";

/// 获取应用数据目录的绝对路径
///
/// 优先使用 `SHINHWA_DATA_DIR` 环境变量（非空时），
/// 否则使用 `dirs` crate 获取跨平台的系统数据目录。
///
/// # 错误
/// 如果无法确定系统数据目录（极端情况，如无 HOME 环境变量），返回错误信息。
///
/// # 示例
/// - Windows: `C:\Users\username\AppData\Roaming\shinhwa-report`
/// - Linux: `/home/username/.local/share/shinhwa-report`
/// - macOS: `/Users/username/Library/Application Support/shinhwa-report`
pub fn get_data_dir() -> Result<PathBuf, String> {
    let override_dir = std::env::var_os(DATA_DIR_ENV);
    resolve_data_dir(override_dir.as_deref().map(PathBuf::from), dirs::data_dir())
}

/// 根据覆盖路径和系统数据目录解析最终的数据目录
fn resolve_data_dir(
    override_dir: Option<PathBuf>,
    system_dir: Option<PathBuf>,
) -> Result<PathBuf, String> {
    if let Some(dir) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }
    let base = system_dir.ok_or_else(|| "애플리케이션 데이터 디렉터리를 찾을 수 없습니다".to_string())?;
    Ok(base.join(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_takes_precedence() {
        let dir = resolve_data_dir(
            Some(PathBuf::from("/tmp/portable")),
            Some(PathBuf::from("/home/u/.local/share")),
        )
        .unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/portable"));
    }

    #[test]
    fn test_empty_override_falls_back_to_system_dir() {
        let dir = resolve_data_dir(Some(PathBuf::new()), Some(PathBuf::from("/data"))).unwrap();
        assert_eq!(dir, PathBuf::from("/data").join("shinhwa-report"));
    }

    #[test]
    fn test_missing_system_dir_is_error() {
        assert!(resolve_data_dir(None, None).is_err());
    }
}
