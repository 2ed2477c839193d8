use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::{
    error::LocationError,
    model::{Coordinate, PermissionState},
};

/// Narrow boundary over the host platform's geolocation service.
///
/// The core never talks to the platform directly; implementations live with
/// the host (the CLI ships a config-backed one, tests use stubs).
#[async_trait]
pub trait LocationTracker: Send + Sync {
    /// Current permission status. Reading the status never fails.
    async fn permission_state(&self) -> PermissionState;

    async fn is_granted(&self) -> bool;

    /// Prompt the user for location permission.
    ///
    /// `Ok(())` means granted. [`LocationError::PermissionDenied`] and
    /// [`LocationError::PermissionDeniedPermanently`] are the two denial
    /// outcomes; any other variant is a provider failure outside the
    /// permission flow.
    async fn request_permission(&self) -> Result<(), LocationError>;

    async fn start_tracking(&self) -> Result<(), LocationError>;

    async fn stop_tracking(&self);

    /// Stream of position readings while tracking is active. The controller
    /// consumes only the first element and then stops tracking, even though
    /// the source keeps emitting.
    fn locations(&self) -> BoxStream<'static, Coordinate>;
}
