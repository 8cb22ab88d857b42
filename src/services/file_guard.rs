//! # 文件写入守卫服务
//!
//! 统一所有对应用数据文件的修改操作：
//!
//! ## 路径安全验证
//! 写入前验证目标路径位于数据目录内，防止键名中的 `..` 或绝对路径逃逸。
//!
//! ## 单代备份
//! 覆盖已有文件前，先把旧内容复制为同目录下的 `<文件名>.bak`，
//! 只保留最近一次覆盖前的版本，供用户手工恢复。
//!
//! ## 原子写入
//! 内容先写入同目录临时文件 `<文件名>.<uuid>.tmp`，再通过 `rename` 替换目标文件，
//! 避免写入中途崩溃留下半截 JSON。每次写入使用独立的临时文件名，
//! 并发写入者不会互相覆盖或删除对方的临时文件。
//!
//! ## 使用方式
//! 所有对数据目录的写入必须通过 `safe_write_file()`。

use std::io;
use std::path::{Component, Path, PathBuf};

/// 备份文件后缀
pub const BACKUP_SUFFIX: &str = ".bak";

/// 临时文件后缀
const TEMP_SUFFIX: &str = ".tmp";

/// 安全写入文件（统一入口）
///
/// 执行流程：
/// 1. 验证 `relative` 是相对路径且不含 `..`，拼接到 `root` 下
/// 2. 确保父目录存在
/// 3. 如果目标文件已存在，复制为 `.bak`
/// 4. 写入本次独占的 `.tmp` 并 rename 到目标位置
///
/// # 返回值
/// 写入成功后目标文件的完整路径
///
/// # 错误
/// 路径验证失败、目录创建失败、备份失败或写入失败时返回 I/O 错误
pub fn safe_write_file(root: &Path, relative: &str, content: &[u8]) -> io::Result<PathBuf> {
    let target = contained_path(root, relative)?;

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if target.exists() {
        std::fs::copy(&target, with_suffix(&target, BACKUP_SUFFIX))?;
    }

    let temp = with_suffix(&target, &format!(".{}{}", uuid::Uuid::new_v4(), TEMP_SUFFIX));
    std::fs::write(&temp, content)?;
    if let Err(e) = std::fs::rename(&temp, &target) {
        let _ = std::fs::remove_file(&temp);
        return Err(e);
    }

    Ok(target)
}

/// 把相对路径拼接到数据目录下，拒绝任何可能逃出数据目录的路径
///
/// 只允许普通路径组件（`Component::Normal`），
/// 因此绝对路径、`..`、盘符前缀都会被拒绝。
pub fn contained_path(root: &Path, relative: &str) -> io::Result<PathBuf> {
    let rel = Path::new(relative);
    let is_safe = !relative.is_empty()
        && rel
            .components()
            .all(|c| matches!(c, Component::Normal(_)));

    if !is_safe {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "안전 검사 실패: 경로 {} 는 데이터 디렉터리 {} 밖을 가리킵니다",
                relative,
                root.display()
            ),
        ));
    }

    Ok(root.join(rel))
}

/// 在完整文件名后追加后缀（`a.json` → `a.json.bak`）
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parent_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = safe_write_file(dir.path(), "nested/store.json", b"[]").unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"[]");
        let leftovers: Vec<_> = std::fs::read_dir(target.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(TEMP_SUFFIX))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_parallel_writers_never_lose_their_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let root = dir.path();
                    scope.spawn(move || {
                        safe_write_file(root, "shared.json", format!("[{i}]").as_bytes())
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap().unwrap();
            }
        });

        let content = std::fs::read_to_string(dir.path().join("shared.json")).unwrap();
        assert!(content.starts_with('[') && content.ends_with(']'));
    }

    #[test]
    fn test_overwrite_keeps_previous_generation_as_backup() {
        let dir = tempfile::tempdir().unwrap();
        safe_write_file(dir.path(), "settings.json", b"first").unwrap();
        safe_write_file(dir.path(), "settings.json", b"second").unwrap();
        let target = safe_write_file(dir.path(), "settings.json", b"third").unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"third");
        let backup = with_suffix(&target, BACKUP_SUFFIX);
        assert_eq!(std::fs::read(backup).unwrap(), b"second");
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        for bad in ["../outside.json", "/etc/passwd", "a/../../b", ""] {
            let err = safe_write_file(dir.path(), bad, b"x").unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "path {bad:?}");
        }
    }
}
