//! HTTP adapter serving the feature collection.
//!
//! - `GET /api/countries`: the collection body, unmodified
//! - `GET /api/locate?q=`: server-side resolution and focus point
//! - `GET /health`: liveness plus cache status

mod handlers;
mod routes;

pub use handlers::COUNTRIES_CACHE_CONTROL;
pub use routes::create_router;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::provider::AsyncHttpClient;
use crate::service::CountryService;

/// Shared state for the server.
pub struct AppState<C> {
    pub service: Arc<CountryService<C>>,
}

impl<C> AppState<C> {
    pub fn new(service: Arc<CountryService<C>>) -> Self {
        Self { service }
    }
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

/// Errors that stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Serves until `shutdown` resolves.
pub async fn serve<C, F>(
    service: Arc<CountryService<C>>,
    addr: SocketAddr,
    shutdown: F,
) -> Result<(), ServerError>
where
    C: AsyncHttpClient + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let local = listener.local_addr()?;
    info!(addr = %local, "Starting server at http://{}", local);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}
