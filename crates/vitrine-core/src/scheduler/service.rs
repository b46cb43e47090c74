use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::content::{Certificate, ContentFetcher};

/// Events emitted by the background refresh service
#[derive(Debug, Clone)]
pub enum RefreshEvent {
    /// A certificate poll completed; the UI diffs against its seen-set
    Certificates { items: Vec<Certificate> },
    /// A poll failed; the widget keeps its last good state
    Error { message: String },
}

/// Background service polling the certificates endpoint on a fixed interval
///
/// Runs until the shutdown signal flips, so the perpetual poll is tied to
/// the UI lifetime instead of re-arming forever.
pub struct RefreshService {
    fetcher: Arc<ContentFetcher>,
    config: Arc<AppConfig>,
    event_tx: mpsc::UnboundedSender<RefreshEvent>,
}

impl RefreshService {
    pub fn new(
        fetcher: Arc<ContentFetcher>,
        config: Arc<AppConfig>,
        event_tx: mpsc::UnboundedSender<RefreshEvent>,
    ) -> Self {
        Self {
            fetcher,
            config,
            event_tx,
        }
    }

    fn send_event(&self, event: RefreshEvent) {
        if self.event_tx.send(event).is_err() {
            warn!("Failed to send refresh event: receiver dropped");
        }
    }

    /// Poll in a loop until shutdown signal
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let refresh_secs = self.config.api.refresh_interval_secs;

        // Skip if refresh is disabled (0)
        if refresh_secs == 0 {
            info!("Background refresh disabled (refresh_interval_secs = 0)");
            let _ = shutdown.changed().await;
            return;
        }

        info!("Refresh service started: interval={}s", refresh_secs);

        let mut interval = tokio::time::interval(Duration::from_secs(refresh_secs));
        // Skip the first tick (fires immediately); the initial load already
        // happened at startup.
        interval.tick().await;

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_ok() && *shutdown.borrow() {
                        info!("Refresh service received shutdown signal");
                        break;
                    }
                }

                _ = interval.tick() => {
                    debug!("Polling certificates");
                    match self.fetcher.certificates().await {
                        Ok(items) => {
                            self.send_event(RefreshEvent::Certificates { items });
                        }
                        Err(e) => {
                            error!("Certificate poll failed: {}", e);
                            self.send_event(RefreshEvent::Error {
                                message: e.to_string(),
                            });
                        }
                    }
                }
            }
        }

        info!("Refresh service stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_disabled_service_exits_on_shutdown() {
        let mut config = AppConfig::default();
        config.api.refresh_interval_secs = 0;
        config.api.base_url = "https://backend.example.com".to_string();
        let config = Arc::new(config);

        let fetcher = Arc::new(ContentFetcher::new(&config).unwrap());
        let (tx, _rx) = mpsc::unbounded_channel();
        let service = RefreshService::new(fetcher, config, tx);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(service.run(shutdown_rx));

        shutdown_tx.send(true).unwrap();

        let result = timeout(Duration::from_secs(1), handle).await;
        assert!(result.is_ok());
    }
}
