//! Bundled shell assets served over the `appdock://` protocol.
//!
//! The shell webview loads its HTML/JS/CSS from the assets directory
//! without a local HTTP server.

use std::path::{Path, PathBuf};

/// One resolved asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub mime: &'static str,
    pub body: Vec<u8>,
}

/// Resolves `appdock://localhost/<path>` requests against the assets
/// directory. Paths that escape the directory, including through
/// symlinks, resolve to nothing.
pub struct ContentProvider {
    root: PathBuf,
}

impl ContentProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, path: &str) -> Option<Asset> {
        let requested = self.root.join(path.trim_start_matches('/'));

        let root = std::fs::canonicalize(&self.root).ok()?;
        let file = std::fs::canonicalize(&requested).ok()?;
        if !file.starts_with(&root) {
            return None;
        }

        let body = std::fs::read(&file).ok()?;
        Some(Asset {
            mime: mime_from_extension(&file),
            body,
        })
    }
}

/// Strip the scheme and host from a custom-protocol request URI.
pub fn request_path(uri: &str) -> &str {
    uri.strip_prefix("appdock://localhost/")
        .or_else(|| uri.strip_prefix("appdock://localhost"))
        .or_else(|| uri.strip_prefix("http://appdock.localhost/"))
        .or_else(|| uri.strip_prefix("appdock:///"))
        .or_else(|| uri.strip_prefix("appdock://"))
        .unwrap_or("")
}

fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("wasm") => "application/wasm",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain",
        Some("xml") => "application/xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn assets() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>shell</html>").unwrap();
        std::fs::create_dir_all(dir.path().join("js")).unwrap();
        std::fs::write(dir.path().join("js/app.js"), "console.log(1)").unwrap();
        dir
    }

    #[test]
    fn resolves_files_with_mime() {
        let dir = assets();
        let cp = ContentProvider::new(dir.path());

        let index = cp.resolve("index.html").unwrap();
        assert_eq!(index.mime, "text/html");
        assert_eq!(index.body, b"<html>shell</html>");

        let script = cp.resolve("/js/app.js").unwrap();
        assert_eq!(script.mime, "application/javascript");
    }

    #[test]
    fn traversal_is_blocked() {
        let dir = assets();
        let cp = ContentProvider::new(dir.path().join("js"));
        assert!(cp.resolve("../index.html").is_none());
        assert!(cp.resolve("/etc/passwd").is_none());
        assert!(cp.resolve("a/../../../etc/passwd").is_none());
    }

    #[test]
    fn nonexistent_file_returns_none() {
        let dir = assets();
        let cp = ContentProvider::new(dir.path());
        assert!(cp.resolve("missing.html").is_none());
    }

    #[test]
    fn request_path_strips_scheme_variants() {
        assert_eq!(request_path("appdock://localhost/index.html"), "index.html");
        assert_eq!(request_path("appdock://localhost"), "");
        assert_eq!(request_path("http://appdock.localhost/js/app.js"), "js/app.js");
        assert_eq!(request_path("appdock:///index.html"), "index.html");
        assert_eq!(request_path("https://example.com/x"), "");
    }

    #[test]
    fn mime_types() {
        assert_eq!(mime_from_extension(Path::new("a.css")), "text/css");
        assert_eq!(mime_from_extension(Path::new("a.svg")), "image/svg+xml");
        assert_eq!(
            mime_from_extension(Path::new("data.xyz")),
            "application/octet-stream"
        );
    }
}
