//! Test utilities for mosaic-client
//!
//! Serves a router on `127.0.0.1` with an ephemeral port and hands back a
//! [`MosaicClient`] already pointed at it.

use std::net::Ipv4Addr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::{MosaicClient, Result};

/// Per-request timeout for test clients; conversions of small fixtures are fast
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// A running mosaic server that stops accepting connections when dropped
pub struct TestServer {
    pub client: MosaicClient,
    base_url: String,
    stop: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Serve `router` on a free local port
    pub async fn start(router: axum::Router) -> Result<Self> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let (stop, stopped) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let served = axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    stopped.await.ok();
                })
                .await;
            if let Err(e) = served {
                tracing::warn!(error = %e, "Test server exited with error");
            }
        });

        let client = MosaicClient::with_config(&base_url, REQUEST_TIMEOUT, CONNECT_TIMEOUT)?;
        tracing::debug!(url = %base_url, "Test server listening");

        Ok(Self {
            client,
            base_url,
            stop: Some(stop),
        })
    }

    /// Root URL, for requests the typed client cannot express
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}
