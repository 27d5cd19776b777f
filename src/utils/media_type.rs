use std::path::Path;

/// Extensions the extraction service accepts, used as the file dialog
/// filter. Files dropped onto the window bypass the filter and are sent
/// anyway; the service rejects anything it cannot handle.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "pdf", "docx"];

/// Best-effort media type from the file extension. Native file handles
/// carry no MIME information, so this is what goes on the multipart part.
pub fn guess_media_type(path: &Path) -> String {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
    .to_string()
}
