//! Fire-and-forget client for the remote evaluation log service.
//!
//! The contract is fail-open end to end: an entry that fails validation is
//! skipped, a full queue drops the entry, and a transport failure is logged
//! locally and discarded. Callers never observe an error from `log`.

use serde::Serialize;
use tokio::sync::mpsc;

/// Originating stack of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stack {
    Backend,
    Frontend,
}

impl Stack {
    pub fn as_str(self) -> &'static str {
        match self {
            Stack::Backend => "backend",
            Stack::Frontend => "frontend",
        }
    }
}

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

/// Packages accepted only with [`Stack::Backend`].
const BACKEND_PACKAGES: &[&str] = &[
    "cache",
    "controller",
    "cron_job",
    "db",
    "domain",
    "handler",
    "repository",
    "route",
    "service",
];

/// Packages accepted only with [`Stack::Frontend`].
const FRONTEND_PACKAGES: &[&str] = &["api", "component", "hook", "page", "state", "style"];

/// Packages accepted with either stack.
const SHARED_PACKAGES: &[&str] = &["auth", "config", "middleware", "utils"];

/// Reason an entry was rejected by [`validate_entry`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidEntry {
    #[error("package '{package}' is not allowed for stack '{stack}'")]
    UnknownPackage { stack: &'static str, package: String },

    #[error("message must not be empty")]
    EmptyMessage,
}

/// Checks an entry against the sink's allow-list contract.
///
/// Pure check-only function; callers skip the send on `Err` instead of
/// propagating it.
pub fn validate_entry(stack: Stack, package: &str, message: &str) -> Result<(), InvalidEntry> {
    let stack_packages = match stack {
        Stack::Backend => BACKEND_PACKAGES,
        Stack::Frontend => FRONTEND_PACKAGES,
    };

    if !stack_packages.contains(&package) && !SHARED_PACKAGES.contains(&package) {
        return Err(InvalidEntry::UnknownPackage {
            stack: stack.as_str(),
            package: package.to_string(),
        });
    }

    if message.is_empty() {
        return Err(InvalidEntry::EmptyMessage);
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct LogEntry {
    stack: &'static str,
    level: &'static str,
    package: String,
    message: String,
}

/// Handle for shipping log entries to the remote sink.
///
/// Cheap to clone; all clones feed the same bounded queue. A disabled
/// shipper (no endpoint or token configured) accepts and discards entries.
#[derive(Clone)]
pub struct LogShip {
    tx: Option<mpsc::Sender<LogEntry>>,
}

impl LogShip {
    /// A shipper that drops everything.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Starts the background delivery task and returns the sending handle.
    pub fn start(endpoint: String, token: String, queue_capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<LogEntry>(queue_capacity);

        tokio::spawn(async move {
            let client = reqwest::Client::new();

            while let Some(entry) = rx.recv().await {
                let result = client
                    .post(&endpoint)
                    .bearer_auth(&token)
                    .json(&entry)
                    .send()
                    .await;

                match result {
                    Ok(response) if !response.status().is_success() => {
                        tracing::warn!(
                            "log sink rejected entry: {}",
                            response.status()
                        );
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!("log sink unreachable: {e}");
                    }
                }
            }
        });

        Self { tx: Some(tx) }
    }

    /// Enqueues one entry for delivery.
    ///
    /// Invalid entries are skipped, a full queue drops the entry, and a
    /// disabled shipper discards it; none of these are errors to the caller.
    pub fn log(&self, stack: Stack, level: Level, package: &str, message: impl Into<String>) {
        let message = message.into();

        if let Err(reason) = validate_entry(stack, package, &message) {
            tracing::debug!("skipping log entry: {reason}");
            return;
        }

        let Some(tx) = &self.tx else {
            return;
        };

        let entry = LogEntry {
            stack: stack.as_str(),
            level: level.as_str(),
            package: package.to_string(),
            message,
        };

        if tx.try_send(entry).is_err() {
            tracing::debug!("log queue full, entry dropped");
        }
    }

    #[cfg(test)]
    fn with_sender(tx: mpsc::Sender<LogEntry>) -> Self {
        Self { tx: Some(tx) }
    }
}
