//! Config-backed stand-in for a device geolocation service.

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use tokio::sync::Mutex;

use skycast_core::{Coordinate, LocationError, LocationTracker, PermissionState};

/// Hands out the configured home coordinate as the "device" position.
///
/// Permission mirrors a real platform tracker: not determined until asked,
/// granted when a home location exists, permanently denied when it does not.
/// Leaving `DeniedAlways` requires running `skycast configure`, the CLI's
/// equivalent of a settings hand-off.
#[derive(Debug)]
pub struct FixedLocationTracker {
    home: Option<Coordinate>,
    state: Mutex<PermissionState>,
}

impl FixedLocationTracker {
    pub fn new(home: Option<Coordinate>) -> Self {
        Self {
            home,
            state: Mutex::new(PermissionState::NotDetermined),
        }
    }
}

#[async_trait]
impl LocationTracker for FixedLocationTracker {
    async fn permission_state(&self) -> PermissionState {
        *self.state.lock().await
    }

    async fn is_granted(&self) -> bool {
        *self.state.lock().await == PermissionState::Granted
    }

    async fn request_permission(&self) -> Result<(), LocationError> {
        let mut state = self.state.lock().await;
        if self.home.is_some() {
            *state = PermissionState::Granted;
            Ok(())
        } else {
            *state = PermissionState::DeniedAlways;
            Err(LocationError::PermissionDeniedPermanently)
        }
    }

    async fn start_tracking(&self) -> Result<(), LocationError> {
        if self.home.is_some() {
            Ok(())
        } else {
            Err(LocationError::ServiceUnavailable)
        }
    }

    async fn stop_tracking(&self) {}

    fn locations(&self) -> BoxStream<'static, Coordinate> {
        match self.home {
            Some(home) => stream::iter(std::iter::repeat(home)).boxed(),
            None => stream::empty().boxed(),
        }
    }
}
