/// HTTP endpoint serving the earthquake dashboard as JSON
///
/// Each request runs a full render cycle: fetch the feed, build the table,
/// compose the view. Requests are handled one at a time on the calling
/// thread; nothing is cached between them.
///
/// Endpoints:
/// - GET /dashboard?severity=&period=&region=&show_map=&show_table=&count=
/// - GET /health - Service health check

use crate::config::{ConfigError, DashboardConfig, ServiceConfig};
use crate::dashboard::render_dashboard;
use crate::ingest::FeedAdapter;
use log::{info, warn};

type JsonResponse = tiny_http::Response<std::io::Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Query parsing
// ---------------------------------------------------------------------------

/// Builds the dashboard selections for a request, starting from the
/// configured defaults and applying each query parameter in turn.
pub fn parse_dashboard_query(
    query: &str,
    defaults: &DashboardConfig,
) -> Result<DashboardConfig, ConfigError> {
    let mut config = defaults.clone();

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (raw_name, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let name = decode_component(raw_name)?;
        let value = decode_component(raw_value)?;
        config.apply_option(&name, &value)?;
    }

    Ok(config)
}

fn decode_component(raw: &str) -> Result<String, ConfigError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .map_err(|_| ConfigError::InvalidOption {
            option: "query string".to_string(),
            value: raw.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// Routes one request URL to a status code and JSON body.
pub fn route(url: &str, feed: &dyn FeedAdapter, config: &ServiceConfig) -> (u16, serde_json::Value) {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));

    match path {
        "/health" => (
            200,
            serde_json::json!({
                "status": "ok",
                "service": "quakemon_service",
                "version": env!("CARGO_PKG_VERSION")
            }),
        ),
        "/dashboard" => handle_dashboard(query, feed, config),
        _ => (
            404,
            serde_json::json!({
                "error": "Not found",
                "available_endpoints": ["/health", "/dashboard"]
            }),
        ),
    }
}

fn handle_dashboard(
    query: &str,
    feed: &dyn FeedAdapter,
    config: &ServiceConfig,
) -> (u16, serde_json::Value) {
    let selections = match parse_dashboard_query(query, &config.dashboard) {
        Ok(selections) => selections,
        Err(e) => return (400, serde_json::json!({ "error": e.to_string() })),
    };

    match render_dashboard(feed, &selections, &config.histogram) {
        Ok(view) => match serde_json::to_value(&view) {
            Ok(body) => (200, body),
            Err(e) => (500, serde_json::json!({ "error": e.to_string() })),
        },
        Err(e) => {
            warn!("Dashboard render failed: {}", e);
            (502, serde_json::json!({ "error": e.to_string() }))
        }
    }
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Start HTTP endpoint server on the specified port. Runs until the
/// listener shuts down.
pub fn start_endpoint_server(
    port: u16,
    feed: &dyn FeedAdapter,
    config: &ServiceConfig,
) -> Result<(), String> {
    let address = format!("{}:{}", config.endpoint.bind_address, port);
    let server = tiny_http::Server::http(&address)
        .map_err(|e| format!("Failed to start HTTP server: {}", e))?;

    println!("📡 HTTP endpoint listening on http://{}", address);
    println!("   GET /dashboard?severity=&period=&region=&show_map=&show_table=&count=");
    println!("   GET /health - Service health check\n");

    for request in server.incoming_requests() {
        let (status, body) = if *request.method() == tiny_http::Method::Get {
            route(request.url(), feed, config)
        } else {
            (405, serde_json::json!({ "error": "Method not allowed" }))
        };
        info!("{} {} -> {}", request.method(), request.url(), status);

        if let Err(e) = request.respond(create_response(status, &body)) {
            warn!("Failed to send response: {}", e);
        }
    }

    Ok(())
}

/// Create HTTP response with JSON body
fn create_response(status_code: u16, json: &serde_json::Value) -> JsonResponse {
    let body = serde_json::to_string_pretty(json).unwrap_or_else(|_| "{}".to_string());

    let response = tiny_http::Response::from_data(body.into_bytes())
        .with_status_code(tiny_http::StatusCode::from(status_code));

    match tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
