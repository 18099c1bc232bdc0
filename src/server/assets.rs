//! Files under `/static/`, read from disk on every request.

use std::path::{Component, Path, PathBuf};

use super::http::Response;

pub const STATIC_PREFIX: &str = "/static/";

/// Serve `relative` (the request path with [`STATIC_PREFIX`] removed) from `root`.
pub fn serve(root: &Path, relative: &str) -> Response {
    let Some(path) = resolve(root, relative) else {
        return Response::error(403);
    };

    match std::fs::read(&path) {
        Ok(contents) if path.is_file() => Response::new(200, mime_type(&path), contents),
        _ => Response::error(404),
    }
}

/// Join a request path onto `root`, refusing anything that could step outside it
fn resolve(root: &Path, relative: &str) -> Option<PathBuf> {
    let relative = Path::new(relative);
    relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
        .then(|| root.join(relative))
}

fn mime_type(path: &Path) -> &'static str {
    match path.extension().and_then(|s| s.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serves_file_with_mime_type() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("style.css"), "body {}").unwrap();

        let response = serve(dir.path(), "style.css");
        assert_eq!(response.status, 200);
        assert_eq!(response.header("content-type"), Some("text/css; charset=utf-8"));
        assert_eq!(response.body, b"body {}");
    }

    #[test]
    fn test_missing_file_and_directory_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("img")).unwrap();

        assert_eq!(serve(dir.path(), "nope.js").status, 404);
        assert_eq!(serve(dir.path(), "img").status, 404);
    }

    #[test]
    fn test_traversal_is_forbidden() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(serve(dir.path(), "../Cargo.toml").status, 403);
        assert_eq!(serve(dir.path(), "a/../../b").status, 403);
        assert_eq!(serve(dir.path(), "/etc/passwd").status, 403);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(mime_type(Path::new("a.png")), "image/png");
        assert_eq!(mime_type(Path::new("a.JPEG")), "application/octet-stream");
        assert_eq!(mime_type(Path::new("noext")), "application/octet-stream");
    }
}
