//! Static page serving module
//!
//! Pages are read from the templates directory on every request and sent as-is.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::path::Path;
use tokio::fs;

use crate::http;
use crate::logger;

pub const INDEX_PAGE: &str = "index.html";
pub const NOT_FOUND_PAGE: &str = "404.html";

/// Serve `file` from `templates_dir` with the given status
///
/// An unreadable page is an unexpected fault and is answered with 500.
pub async fn serve_page(
    templates_dir: &Path,
    file: &str,
    status: StatusCode,
    server_name: &str,
) -> Response<Full<Bytes>> {
    let page_path = templates_dir.join(file);
    match fs::read(&page_path).await {
        Ok(content) => http::build_html_response(status, content, server_name),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read template '{}': {e}",
                page_path.display()
            ));
            http::build_500_response(server_name)
        }
    }
}
