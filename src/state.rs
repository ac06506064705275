use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::AliasService;
use crate::domain::visit_event::VisitEvent;
use crate::infrastructure::log_ship::LogShip;

/// Shared per-request context, built once at startup and cloned per handler.
#[derive(Clone)]
pub struct AppState {
    pub alias_service: Arc<AliasService>,
    pub visit_tx: mpsc::Sender<VisitEvent>,
    pub log_ship: LogShip,
}
