use axum::{
    extract::{ConnectInfo, Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::{net::SocketAddr, time::Instant};

use crate::infrastructure::log_ship::{Level, Stack};
use crate::state::AppState;

/// Access log for every request, plus error observation: any error response
/// is reported to the remote log sink before it leaves the service. The
/// sink is fire-and-forget, so a sink failure can't affect the response.
pub async fn access_log_mw(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();

    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let version = format!("{:?}", req.version());

    let ua = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let referer = req
        .headers()
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(req).await;

    let status = response.status();
    let ms = start.elapsed().as_millis();

    tracing::info!(
        r#"{ip} - - "{method} {path} {version}" {status} - "{referer}" "{ua}" {ms}ms"#,
        ip = addr.ip(),
        method = method,
        path = path,
        version = version,
        status = status.as_u16(),
        referer = referer,
        ua = ua,
        ms = ms,
    );

    if status.is_server_error() {
        state.log_ship.log(
            Stack::Backend,
            Level::Error,
            "route",
            format!("{method} {path} -> {status}"),
        );
    } else if status.is_client_error() {
        state.log_ship.log(
            Stack::Backend,
            Level::Warn,
            "route",
            format!("{method} {path} -> {status}"),
        );
    }

    response
}
