//! # 参考资料附件服务
//!
//! 负责从磁盘加载用户选择的参考资料：
//! - 扩展名白名单校验（PDF、Word、HWP、文本、Markdown、Excel、CSV、PPTX）
//! - 按扩展名推断 MIME 类型，用于 multipart 文件字段
//! - 文件大小的可读格式化（前端文件列表展示用）

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::models::draft::Attachment;

/// 允许上传的文件扩展名（不含点，小写）及其 MIME 类型
const ALLOWED_TYPES: [(&str, &str); 8] = [
    ("pdf", "application/pdf"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("hwp", "application/x-hwp"),
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("csv", "text/csv"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
];

/// 无法识别扩展名时使用的 MIME 类型
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// 文件选择对话框使用的扩展名过滤串（与前端 `accept` 属性一致）
pub fn accept_filter() -> String {
    ALLOWED_TYPES
        .iter()
        .map(|(ext, _)| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// 附件加载错误
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("파일 이름을 확인할 수 없습니다: {0}")]
    MissingFileName(String),

    #[error("지원하지 않는 파일 형식입니다: {0}")]
    UnsupportedType(String),

    #[error("파일을 읽지 못했습니다 ({path}): {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 附件元信息，供前端文件列表展示
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentInfo {
    pub file_name: String,
    pub size: u64,
    pub size_label: String,
}

/// 判断文件名的扩展名是否在白名单内（大小写不敏感）
pub fn is_allowed(file_name: &str) -> bool {
    extension(file_name).is_some_and(|ext| ALLOWED_TYPES.iter().any(|(e, _)| *e == ext))
}

/// 按扩展名推断 MIME 类型，未知扩展名返回 `application/octet-stream`
pub fn mime_for(file_name: &str) -> &'static str {
    extension(file_name)
        .and_then(|ext| ALLOWED_TYPES.iter().find(|(e, _)| *e == ext))
        .map(|(_, mime)| *mime)
        .unwrap_or(FALLBACK_MIME)
}

fn extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// 从磁盘加载附件
///
/// # 错误
/// - 路径没有文件名部分
/// - 扩展名不在白名单内
/// - 读取文件失败
pub async fn load_attachment(path: &Path) -> Result<Attachment, AttachmentError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AttachmentError::MissingFileName(path.display().to_string()))?
        .to_string();

    if !is_allowed(&file_name) {
        return Err(AttachmentError::UnsupportedType(file_name));
    }

    let content = tokio::fs::read(path)
        .await
        .map_err(|source| AttachmentError::Read {
            path: path.display().to_string(),
            source,
        })?;

    Ok(Attachment::new(file_name, content))
}

/// 按顺序加载多个附件，遇到第一个错误即停止
pub async fn load_attachments<P: AsRef<Path>>(
    paths: &[P],
) -> Result<Vec<Attachment>, AttachmentError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(load_attachment(path.as_ref()).await?);
    }
    Ok(files)
}

/// 读取文件元信息（不读取内容）
pub async fn describe(path: &Path) -> Result<AttachmentInfo, AttachmentError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AttachmentError::MissingFileName(path.display().to_string()))?
        .to_string();

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|source| AttachmentError::Read {
            path: path.display().to_string(),
            source,
        })?;

    Ok(AttachmentInfo {
        file_name,
        size: metadata.len(),
        size_label: format_file_size(metadata.len()),
    })
}

/// 把字节数格式化为可读字符串
///
/// 以 1024 为进制，最多保留两位小数并去掉末尾的 0：
/// `0` → `0 Bytes`，`1536` → `1.5 KB`，`1048576` → `1 MB`。
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions_are_case_insensitive() {
        assert!(is_allowed("보고서.PDF"));
        assert!(is_allowed("조사표.hwp"));
        assert!(is_allowed("notes.md"));
        assert!(!is_allowed("script.exe"));
        assert!(!is_allowed("no_extension"));
    }

    #[test]
    fn test_mime_inference() {
        assert_eq!(mime_for("a.pdf"), "application/pdf");
        assert_eq!(mime_for("a.CSV"), "text/csv");
        assert_eq!(mime_for("a.bin"), FALLBACK_MIME);
    }

    #[test]
    fn test_accept_filter_lists_all_extensions() {
        assert_eq!(
            accept_filter(),
            ".pdf,.docx,.hwp,.txt,.md,.xlsx,.csv,.pptx"
        );
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
        assert_eq!(format_file_size(1288490189), "1.2 GB");
    }

    #[tokio::test]
    async fn test_load_attachments_keeps_order_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("현황.txt");
        let b = dir.path().join("survey.pdf");
        std::fs::write(&a, "일반현황 자료").unwrap();
        std::fs::write(&b, [0x25, 0x50, 0x44, 0x46, 0x00, 0xff]).unwrap();

        let files = load_attachments(&[&b, &a]).await.unwrap();
        assert_eq!(files[0].file_name, "survey.pdf");
        assert_eq!(files[0].content, vec![0x25, 0x50, 0x44, 0x46, 0x00, 0xff]);
        assert_eq!(files[1].file_name, "현황.txt");
    }

    #[tokio::test]
    async fn test_load_rejects_unsupported_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("tool.exe");
        std::fs::write(&exe, b"MZ").unwrap();

        assert!(matches!(
            load_attachment(&exe).await,
            Err(AttachmentError::UnsupportedType(_))
        ));
        assert!(matches!(
            load_attachment(&dir.path().join("missing.pdf")).await,
            Err(AttachmentError::Read { .. })
        ));
    }

    #[tokio::test]
    async fn test_describe_reports_size_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.xlsx");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        let info = describe(&path).await.unwrap();
        assert_eq!(info.file_name, "table.xlsx");
        assert_eq!(info.size, 2048);
        assert_eq!(info.size_label, "2 KB");
    }
}
