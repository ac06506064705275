//! Background worker turning visit events into persisted click records.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::entities::ClickEvent;
use crate::domain::repositories::AliasRepository;
use crate::domain::visit_event::VisitEvent;
use crate::infrastructure::geoip::GeoResolver;
use crate::infrastructure::log_ship::{Level, LogShip, Stack};

/// Consumes visit events and appends click records to their aliases.
///
/// Each event is resolved to a [`ClickEvent`] (referrer defaulting to
/// "Direct", location from the geo resolver or "Unknown") and appended with
/// a short retry. A write that still fails after the retries is logged and
/// dropped; nothing here propagates back to the redirect that produced the
/// event.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<VisitEvent>,
    store: Arc<dyn AliasRepository>,
    geo: Arc<dyn GeoResolver>,
    log_ship: LogShip,
) {
    while let Some(event) = rx.recv().await {
        let location = event.client_ip.and_then(|ip| geo.lookup(ip));
        let click = ClickEvent::record(event.referrer.clone(), location);

        let strategy = ExponentialBackoff::from_millis(50).map(jitter).take(3);
        let result = Retry::spawn(strategy, || {
            store.append_click(&event.code, click.clone())
        })
        .await;

        if let Err(e) = result {
            tracing::warn!(code = %event.code, "dropping click record: {e}");
            log_ship.log(
                Stack::Backend,
                Level::Error,
                "repository",
                format!("failed to append click for '{}': {e}", event.code),
            );
        }
    }
}
