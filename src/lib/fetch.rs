use super::config::PreviewConfig;
use super::error::PreviewError;
use super::geo::BoundingBox;
use super::geojson::FeatureCollection;
use super::output::Preview;
use log::{debug, info, warn};
use reqwest::Client;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Every feature, all fields, geometry as GeoJSON.
pub const QUERY_PARAMS: [(&str, &str); 4] = [
    ("where", "1=1"),
    ("outFields", "*"),
    ("f", "geojson"),
    ("returnGeometry", "true"),
];

/// Query endpoint of the first layer of a feature service.
pub fn query_url(service_url: &str) -> String {
    format!("{}/0/query", service_url.trim().trim_end_matches('/'))
}

pub trait FeatureSource {
    fn fetch(
        &self,
        service_url: &str,
    ) -> impl Future<Output = Result<FeatureCollection, PreviewError>> + Send;
}

pub struct HttpFeatureSource {
    client: Client,
}

impl HttpFeatureSource {
    pub fn new(config: &PreviewConfig) -> Result<Self, PreviewError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(HttpFeatureSource { client })
    }
}

impl FeatureSource for HttpFeatureSource {
    async fn fetch(&self, service_url: &str) -> Result<FeatureCollection, PreviewError> {
        let url = query_url(service_url);
        debug!("GET {}", url);
        let response = self.client.get(&url).query(&QUERY_PARAMS).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PreviewError::Status {
                status: status.as_u16(),
                url,
            });
        }
        let body = response.text().await?;
        FeatureCollection::from_json_str(&body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewState {
    Idle,
    Loading,
    Success(Preview),
    Error { message: String, preview: Preview },
}

impl PreviewState {
    /// Bounds the map should show in this state.
    pub fn bounds(&self, fallback: BoundingBox) -> BoundingBox {
        match self {
            PreviewState::Success(preview) | PreviewState::Error { preview, .. } => {
                preview.bounds
            }
            PreviewState::Idle | PreviewState::Loading => fallback,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PreviewState::Error { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Applied(PreviewState),
    /// A later load was started before this one finished; its result was dropped.
    Superseded,
}

/// Drives `Loading -> Success | Error` for one map preview.
///
/// Every load takes a ticket; only the holder of the newest ticket may
/// publish, so a slow response never replaces the result of a later request.
pub struct PreviewLoader<S> {
    source: S,
    config: PreviewConfig,
    latest: AtomicU64,
    state: Mutex<PreviewState>,
}

impl<S: FeatureSource> PreviewLoader<S> {
    pub fn new(source: S, config: PreviewConfig) -> Self {
        PreviewLoader {
            source,
            config,
            latest: AtomicU64::new(0),
            state: Mutex::new(PreviewState::Idle),
        }
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    pub fn state(&self) -> PreviewState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn load(&self, service_url: &str) -> LoadOutcome {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.publish(ticket, PreviewState::Loading);

        let next = match self.source.fetch(service_url).await {
            Ok(collection) => {
                info!(
                    "received {} features from {}",
                    collection.len(),
                    service_url
                );
                PreviewState::Success(Preview::resolve(collection, &self.config))
            }
            Err(err) => {
                warn!("preview of {} failed: {}", service_url, err);
                PreviewState::Error {
                    message: err.to_string(),
                    preview: Preview::empty(self.config.fallback_bounds),
                }
            }
        };

        if self.publish(ticket, next.clone()) {
            LoadOutcome::Applied(next)
        } else {
            debug!("discarding response #{} for {}", ticket, service_url);
            LoadOutcome::Superseded
        }
    }

    fn publish(&self, ticket: u64, next: PreviewState) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if self.latest.load(Ordering::SeqCst) != ticket {
            return false;
        }
        *state = next;
        true
    }
}
