// File: tests/test_helpers.rs

use std::net::SocketAddr;
use std::sync::Arc;

use api_gateway::{router, AppState};
use pricing_client::PricingClientConfig;
use pricing_engine::TaxRateCatalog;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A pricing server running on an ephemeral port; aborted on drop
pub struct ServerGuard {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ServerGuard {
    /// Start a server with the built-in tax rates
    pub async fn start() -> Self {
        Self::start_with(TaxRateCatalog::with_defaults()).await
    }

    /// Start a server around a given catalog
    pub async fn start_with(catalog: TaxRateCatalog) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let app = router(Arc::new(AppState::new(catalog)));

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self { addr, handle }
    }

    /// Client configuration pointing at this server
    pub fn client_config(&self) -> PricingClientConfig {
        let url = format!("http://{}", self.addr);
        PricingClientConfig::new(url.parse().expect("Invalid test URL"), 2000)
    }

    /// Stop the server
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
