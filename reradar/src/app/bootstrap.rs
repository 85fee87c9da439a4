//! Application bootstrap implementation.
//!
//! `ReradarApp` wires the reference store, flight provider, waypoint store
//! and dispatcher together in one place, then serves host sessions over any
//! byte stream.

use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::config::AppConfig;
use super::error::AppError;
use crate::dispatch::Dispatcher;
use crate::enrich::EnrichmentEngine;
use crate::provider::{Flightradar24Provider, FlightProvider, ReqwestClient};
use crate::reference::{DirectoryDatasets, ReferenceStore};
use crate::session::{Session, SessionEnd};
use crate::waypoints::{FileWaypointStore, WaypointStore};

/// The reRadar backend with its collaborators wired up.
///
/// # Example
///
/// ```ignore
/// use reradar::app::{AppConfig, ReradarApp};
///
/// let app = ReradarApp::build(AppConfig::default())?;
/// let end = app.run(socket_path, CancellationToken::new()).await?;
/// ```
pub struct ReradarApp {
    config: AppConfig,
    store: Arc<ReferenceStore>,
    dispatcher: Arc<Dispatcher>,
}

impl ReradarApp {
    /// Build the application with the live Flightradar24 provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn build(config: AppConfig) -> Result<Self, AppError> {
        let client =
            ReqwestClient::with_config(config.provider.timeout, &config.provider.user_agent)?;
        let provider = Flightradar24Provider::with_endpoints(client, config.endpoints.clone());
        Ok(Self::with_provider(config, Arc::new(provider)))
    }

    /// Build the application around an existing provider.
    pub fn with_provider(config: AppConfig, provider: Arc<dyn FlightProvider>) -> Self {
        let store = Arc::new(match &config.datasets_dir {
            Some(directory) => ReferenceStore::new(DirectoryDatasets::new(directory.clone())),
            None => ReferenceStore::embedded(),
        });

        let waypoints: Arc<dyn WaypointStore> = Arc::new(match &config.waypoints_file {
            Some(file) => FileWaypointStore::new(file.clone()),
            None => FileWaypointStore::user_default(),
        });

        let dispatcher = Arc::new(Dispatcher::new(
            EnrichmentEngine::new(Arc::clone(&store)),
            provider,
            waypoints,
        ));

        info!(
            datasets = ?store,
            queue_capacity = config.session.queue_capacity,
            "reRadar backend ready"
        );

        Self {
            config,
            store,
            dispatcher,
        }
    }

    /// The shared reference dataset store.
    pub fn store(&self) -> Arc<ReferenceStore> {
        Arc::clone(&self.store)
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }

    /// Serve one session over an already-open stream.
    pub async fn serve<R, W>(
        &self,
        reader: R,
        writer: W,
        shutdown: CancellationToken,
    ) -> Result<SessionEnd, AppError>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin,
    {
        let session = Session::new(self.dispatcher(), self.config.session.clone());
        Ok(session.run(reader, writer, shutdown).await?)
    }

    /// Connect to the host socket at `path` and serve until the session ends.
    #[cfg(unix)]
    pub async fn run(
        &self,
        path: &std::path::Path,
        shutdown: CancellationToken,
    ) -> Result<SessionEnd, AppError> {
        info!(socket = %path.display(), "Connecting to host");
        let stream = crate::transport::connect(path)
            .await
            .map_err(AppError::Connect)?;
        let (reader, writer) = stream.into_split();
        self.serve(reader, writer, shutdown).await
    }
}
