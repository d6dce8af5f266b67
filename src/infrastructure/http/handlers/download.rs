//! Client Package Download Handler
//!
//! 按平台下发客户端安装包，文件流式返回

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use std::path::Component;
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 支持的客户端平台
const PLATFORMS: &[&str] = &["windows", "macos", "linux", "android", "ios"];

fn is_valid_platform(platform: &str) -> bool {
    PLATFORMS.contains(&platform)
}

/// 文件名必须是单一路径段，拒绝目录穿越
fn is_safe_filename(filename: &str) -> bool {
    if filename.is_empty() {
        return false;
    }
    let path = std::path::Path::new(filename);
    let mut components = path.components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// 按扩展名推断 Content-Type
fn content_type_for(filename: &str) -> &'static str {
    let ext = filename.rsplit('.').next().unwrap_or_default();
    match ext {
        "exe" | "msi" => "application/x-msdownload",
        "dmg" => "application/x-apple-diskimage",
        "apk" => "application/vnd.android.package-archive",
        "deb" => "application/vnd.debian.binary-package",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        _ => "application/octet-stream",
    }
}

/// 下载客户端安装包
pub async fn download_package(
    State(state): State<Arc<AppState>>,
    Path((platform, filename)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    if !is_valid_platform(&platform) {
        return Err(ApiError::BadRequest(format!(
            "Unsupported platform: {}",
            platform
        )));
    }
    if !is_safe_filename(&filename) {
        return Err(ApiError::BadRequest(format!(
            "Invalid filename: {}",
            filename
        )));
    }

    let path = state.downloads_dir.join(&platform).join(&filename);
    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::NotFound(format!(
                "Package not found: {}/{}",
                platform, filename
            )));
        }
        Err(e) => return Err(ApiError::Internal(e.to_string())),
    };

    let metadata = file
        .metadata()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::info!(
        platform = %platform,
        filename = %filename,
        size = metadata.len(),
        "Package download started"
    );

    let stream = ReaderStream::new(file);
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&filename))
        .header(header::CONTENT_LENGTH, metadata.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from_stream(stream))
        .map_err(|e| ApiError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_whitelist() {
        assert!(is_valid_platform("android"));
        assert!(is_valid_platform("windows"));
        assert!(!is_valid_platform("amiga"));
        assert!(!is_valid_platform(""));
    }

    #[test]
    fn test_safe_filename() {
        assert!(is_safe_filename("sentra-1.0.0.apk"));
        assert!(is_safe_filename("setup.exe"));
        assert!(!is_safe_filename(""));
        assert!(!is_safe_filename("../secrets.db"));
        assert!(!is_safe_filename("a/b.apk"));
        assert!(!is_safe_filename("/etc/passwd"));
        assert!(!is_safe_filename(".."));
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for("setup.exe"), "application/x-msdownload");
        assert_eq!(content_type_for("app.dmg"), "application/x-apple-diskimage");
        assert_eq!(
            content_type_for("sentra.apk"),
            "application/vnd.android.package-archive"
        );
        assert_eq!(content_type_for("bundle.tar.gz"), "application/gzip");
        assert_eq!(content_type_for("unknown.bin"), "application/octet-stream");
        assert_eq!(content_type_for("noextension"), "application/octet-stream");
    }
}
