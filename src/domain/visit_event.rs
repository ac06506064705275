//! Visit message passed from the redirect handler to the click worker.

use std::net::IpAddr;

/// Raw per-visit context captured on the redirect path.
///
/// The handler sends this into a bounded channel and responds immediately;
/// geo resolution and persistence happen in the background worker. If the
/// queue is full the visit is dropped — analytics is advisory and must never
/// delay or fail a redirect.
#[derive(Debug, Clone)]
pub struct VisitEvent {
    pub code: String,
    pub referrer: Option<String>,
    pub client_ip: Option<IpAddr>,
}

impl VisitEvent {
    pub fn new(code: String, referrer: Option<&str>, client_ip: Option<IpAddr>) -> Self {
        Self {
            code,
            referrer: referrer.map(|s| s.to_string()),
            client_ip,
        }
    }
}
