//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation, route matching, and dispatching.

use crate::config::AppState;
use crate::handler::convert::{self, ErrorBody};
use crate::handler::pages::{self, INDEX_PAGE, NOT_FOUND_PAGE};
use crate::http::{self, QueryParams};
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

pub const CONVERSION_PATH: &str = "/get_currency";

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let uri = req.uri();
    let server_name = state.config.http.server_name.as_str();

    let response = if method == Method::GET {
        let ctx = RequestContext {
            path: uri.path(),
            query: uri.query(),
        };
        route_request(&ctx, &state).await
    } else {
        logger::log_warning(&format!("Method not allowed: {method}"));
        http::build_405_response(server_name)
    };

    if state.config.logging.access_log {
        logger::log_access(&AccessLogEntry {
            remote_addr: peer_addr.to_string(),
            method: method.to_string(),
            uri: uri.to_string(),
            http_version: format!("{:?}", req.version()),
            status: response.status().as_u16(),
        });
    }

    Ok(response)
}

/// Route request by path, ignoring trailing slashes
pub async fn route_request(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let server_name = state.config.http.server_name.as_str();

    match ctx.path.trim_end_matches('/') {
        "" => {
            pages::serve_page(state.templates_dir(), INDEX_PAGE, StatusCode::OK, server_name).await
        }
        CONVERSION_PATH => serve_conversion(ctx, state).await,
        _ => {
            pages::serve_page(
                state.templates_dir(),
                NOT_FOUND_PAGE,
                StatusCode::NOT_FOUND,
                server_name,
            )
            .await
        }
    }
}

async fn serve_conversion(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let server_name = state.config.http.server_name.as_str();
    let params = QueryParams::parse(ctx.query);

    match convert::handle_conversion(&params, &state.config.upstream).await {
        Ok(result) => http::build_json_response(StatusCode::OK, &result, server_name),
        Err(err) => http::build_json_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            &ErrorBody::from(&err),
            server_name,
        ),
    }
}
