//! Static file serving for the game pages.
//!
//! Stylesheets and scripts are embedded directly in the binary so the server
//! can be distributed as a single file.

use axum::{
    body::Body,
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;

/// Embedded static files from the `assets/static` directory.
#[derive(Embed)]
#[folder = "assets/static"]
pub struct StaticAssets;

/// GET /static/{*path} - Serves an embedded asset.
pub async fn serve_static(Path(path): Path<String>) -> Response {
    let path = path.trim_start_matches('/');

    match StaticAssets::get(path) {
        Some(content) => file_response(path, content.data.as_ref()),
        None => (StatusCode::NOT_FOUND, "File not found").into_response(),
    }
}

/// Creates an HTTP response for a file with appropriate content type.
fn file_response(path: &str, content: &[u8]) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CACHE_CONTROL, cache_control_for_path(path))
        .body(Body::from(content.to_vec()))
        .unwrap_or_else(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create response",
            )
                .into_response()
        })
}

/// Returns appropriate Cache-Control header based on file path.
///
/// - Scripts and stylesheets: revalidate so catalog-driven pages pick up new code
/// - Images and fonts: long cache (1 day)
fn cache_control_for_path(path: &str) -> &'static str {
    let ext = std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("js" | "css" | "html") => "no-cache, must-revalidate",
        _ => "public, max-age=86400",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_control_for_path() {
        assert_eq!(cache_control_for_path("play.js"), "no-cache, must-revalidate");
        assert_eq!(cache_control_for_path("style.CSS"), "no-cache, must-revalidate");
        assert_eq!(cache_control_for_path("sounds/pop.mp3"), "public, max-age=86400");
        assert_eq!(cache_control_for_path("favicon"), "public, max-age=86400");
    }

    #[test]
    fn test_embedded_assets_present() {
        assert!(StaticAssets::get("style.css").is_some());
        assert!(StaticAssets::get("play.js").is_some());
    }
}
