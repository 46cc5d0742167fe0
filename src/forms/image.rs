use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

/// Encode raw bytes as a `data:` URI the API stores verbatim.
pub fn to_data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Best-effort mime type from a file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// True for URIs the upload endpoint accepts.
pub fn is_image_data_uri(uri: &str) -> bool {
    uri.starts_with("data:image")
}
