use std::path::Path;

/// Content types served, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Html,
    Jpeg,
    Png,
    Gif,
    Bmp,
    Icon,
    OctetStream,
}

impl ContentType {
    /// Picks the content type for a path from its extension (case-insensitive).
    ///
    /// Anything unrecognized, including a missing extension, is served as a
    /// generic binary stream.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("html") | Some("htm") => ContentType::Html,
            Some("jpg") | Some("jpeg") => ContentType::Jpeg,
            Some("png") => ContentType::Png,
            Some("gif") => ContentType::Gif,
            Some("bmp") => ContentType::Bmp,
            Some("ico") => ContentType::Icon,
            _ => ContentType::OctetStream,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Html => "text/html",
            ContentType::Jpeg => "image/jpeg",
            ContentType::Png => "image/png",
            ContentType::Gif => "image/gif",
            ContentType::Bmp => "image/bmp",
            ContentType::Icon => "image/x-icon",
            ContentType::OctetStream => "application/octet-stream",
        }
    }
}
