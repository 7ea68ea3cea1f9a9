//! Static file serving module
//!
//! Serves assets from the configured static directory, with MIME detection
//! by extension and a canonicalization guard against path traversal.

use crate::config::AppState;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Serve one asset; `rest` is the request path with the static prefix
/// already stripped.
pub async fn serve(state: &AppState, rest: &str) -> Response<Full<Bytes>> {
    match load(&state.config.wiki.static_dir, rest).await {
        Some((data, content_type)) => http::build_file_response(data, content_type),
        None => http::build_404_response(),
    }
}

/// Load an asset from the static directory.
///
/// Returns `None` for anything that should be a 404: missing files,
/// directories, and paths that escape the static directory.
async fn load(static_dir: &str, rest: &str) -> Option<(Vec<u8>, &'static str)> {
    let clean_rest = rest.trim_start_matches('/').replace("..", "");
    let file_path = Path::new(static_dir).join(clean_rest);

    let static_dir_canonical = match Path::new(static_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{static_dir}': {e}"
            ));
            return None;
        }
    };

    // Missing file is an ordinary 404, not worth a log line.
    let Ok(file_path_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_path_canonical.starts_with(&static_dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            rest,
            file_path_canonical.display()
        ));
        return None;
    }
    if file_path_canonical.is_dir() {
        return None;
    }

    let content = match fs::read(&file_path_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path_canonical.display(),
                e
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(
        file_path_canonical
            .extension()
            .and_then(|e| e.to_str()),
    );

    Some((content, content_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_static_dir(tag: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("flatwiki-static-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_load_existing_asset() {
        let dir = temp_static_dir("ok");
        std::fs::write(dir.join("style.css"), "body {}").unwrap();

        let (data, content_type) = load(dir.to_str().unwrap(), "style.css").await.unwrap();
        assert_eq!(data, b"body {}");
        assert_eq!(content_type, "text/css");
    }

    #[tokio::test]
    async fn test_load_missing_asset() {
        let dir = temp_static_dir("missing");
        assert!(load(dir.to_str().unwrap(), "nope.css").await.is_none());
    }

    #[tokio::test]
    async fn test_traversal_is_blocked() {
        let dir = temp_static_dir("traversal");
        std::fs::write(dir.join("inside.txt"), "ok").unwrap();

        assert!(load(dir.to_str().unwrap(), "../../etc/passwd").await.is_none());
        assert!(load(dir.to_str().unwrap(), "..%2F..%2Fetc/passwd").await.is_none());
    }

    #[tokio::test]
    async fn test_directory_is_not_served() {
        let dir = temp_static_dir("dir");
        std::fs::create_dir_all(dir.join("img")).unwrap();

        assert!(load(dir.to_str().unwrap(), "img").await.is_none());
    }
}
