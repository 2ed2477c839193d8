use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use futures::StreamExt;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    error::{FetchError, LocationError},
    location::LocationTracker,
    model::{AppState, Coordinate, PermissionState, WeatherSnapshot},
    provider::WeatherProvider,
};

/// Orchestrates permission acquisition and weather fetches.
///
/// Results are published through two single-slot `watch` channels, one for
/// [`PermissionState`] and one for [`AppState`]. Every publish overwrites the
/// previous value; observers always see only the latest one.
///
/// Fetches are not cancelled once started. Instead each fetch is stamped with
/// a generation counter and may only publish its outcome while it is still
/// the newest fetch, so the most recently started fetch always wins and a
/// stale completion is discarded.
pub struct WeatherController {
    provider: Arc<dyn WeatherProvider>,
    tracker: Arc<dyn LocationTracker>,
    permission_tx: watch::Sender<PermissionState>,
    app_tx: watch::Sender<AppState>,
    fetch_epoch: AtomicU64,
}

impl WeatherController {
    pub fn new(provider: Arc<dyn WeatherProvider>, tracker: Arc<dyn LocationTracker>) -> Self {
        let (permission_tx, _) = watch::channel(PermissionState::NotDetermined);
        let (app_tx, _) = watch::channel(AppState::Loading);

        Self {
            provider,
            tracker,
            permission_tx,
            app_tx,
            fetch_epoch: AtomicU64::new(0),
        }
    }

    /// Read the current permission status from the tracker and publish it.
    pub async fn initialize(&self) {
        let state = self.tracker.permission_state().await;
        self.permission_tx.send_replace(state);
    }

    /// Subscribe to permission state updates.
    pub fn watch_permission_state(&self) -> watch::Receiver<PermissionState> {
        self.permission_tx.subscribe()
    }

    /// Subscribe to app state updates.
    pub fn watch_app_state(&self) -> watch::Receiver<AppState> {
        self.app_tx.subscribe()
    }

    pub fn permission_state(&self) -> PermissionState {
        *self.permission_tx.borrow()
    }

    pub fn app_state(&self) -> AppState {
        self.app_tx.borrow().clone()
    }

    /// Ask the tracker to prompt for location permission.
    ///
    /// A no-op when permission is already granted. A grant publishes
    /// `Granted` and runs exactly one location-based fetch before returning;
    /// the two denial outcomes publish `Denied` / `DeniedAlways`. Any other
    /// tracker failure leaves the permission state unchanged and is returned
    /// to the caller instead of being dropped.
    pub async fn request_permission(&self) -> Result<(), LocationError> {
        if self.tracker.is_granted().await {
            return Ok(());
        }

        match self.tracker.request_permission().await {
            Ok(()) => {
                info!("location permission granted");
                self.permission_tx.send_replace(PermissionState::Granted);
                self.update_from_current_location().await;
                Ok(())
            }
            Err(LocationError::PermissionDenied) => {
                self.permission_tx.send_replace(PermissionState::Denied);
                Ok(())
            }
            Err(LocationError::PermissionDeniedPermanently) => {
                self.permission_tx
                    .send_replace(PermissionState::DeniedAlways);
                Ok(())
            }
            Err(err) => {
                warn!("permission request failed: {err}");
                Err(err)
            }
        }
    }

    /// Fetch weather for a city entered by the user.
    pub async fn search_by_city(&self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            self.app_tx
                .send_replace(AppState::Error("Enter a city name to search.".to_owned()));
            return;
        }

        let epoch = self.begin_fetch();
        let result = self.provider.current_by_city(city).await;
        self.finish_fetch(epoch, result);
    }

    /// Fetch weather for the device's current position: take exactly one
    /// reading from the tracker, then fetch by coordinates.
    pub async fn update_from_current_location(&self) {
        let epoch = self.begin_fetch();

        let coordinate = match self.read_one_location().await {
            Ok(coordinate) => coordinate,
            Err(err) => {
                warn!("location read failed: {err}");
                self.publish_if_current(
                    epoch,
                    AppState::Error("Could not determine your current position.".to_owned()),
                );
                return;
            }
        };

        let result = self.provider.current_by_coordinates(coordinate).await;
        self.finish_fetch(epoch, result);
    }

    async fn read_one_location(&self) -> Result<Coordinate, LocationError> {
        self.tracker.start_tracking().await?;
        let first = self.tracker.locations().next().await;
        self.tracker.stop_tracking().await;

        first.ok_or(LocationError::ServiceUnavailable)
    }

    /// Stamp a new fetch generation and publish `Loading`.
    ///
    /// The `Loading` publish goes through the same generation guard as the
    /// outcome: a fetch that was superseded between stamping and publishing
    /// must not publish anything at all.
    fn begin_fetch(&self) -> u64 {
        let epoch = self.fetch_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.publish_if_current(epoch, AppState::Loading);
        epoch
    }

    fn finish_fetch(&self, epoch: u64, result: Result<WeatherSnapshot, FetchError>) {
        let state = match result {
            Ok(snapshot) => AppState::Success(snapshot),
            Err(err) => AppState::Error(err.to_string()),
        };
        self.publish_if_current(epoch, state);
    }

    fn publish_if_current(&self, epoch: u64, state: AppState) {
        if self.fetch_epoch.load(Ordering::SeqCst) == epoch {
            self.app_tx.send_replace(state);
        } else {
            debug!("discarding outcome of superseded fetch {epoch}");
        }
    }
}
