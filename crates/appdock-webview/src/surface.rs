//! The seam between the lifecycle manager and a native web view.

use appdock_common::{AppId, DockError, Rect};
use appdock_registry::PartitionKey;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("failed to build surface: {0}")]
    Build(String),

    #[error("surface operation failed: {0}")]
    Operation(String),

    #[error("failed to clear partition: {0}")]
    Clear(String),
}

impl From<SurfaceError> for DockError {
    fn from(err: SurfaceError) -> Self {
        match err {
            SurfaceError::Clear(msg) => DockError::PartitionClearFailed(msg),
            other => DockError::SurfaceCreationFailed(other.to_string()),
        }
    }
}

/// Everything needed to build a surface for one app.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceRequest {
    pub app_id: AppId,
    pub url: String,
    pub partition: PartitionKey,
    pub zoom_level: f64,
    pub bounds: Rect,
}

/// A live native surface. Created hidden.
pub trait Surface {
    fn set_bounds(&self, bounds: Rect) -> Result<(), SurfaceError>;
    fn set_visible(&self, visible: bool) -> Result<(), SurfaceError>;
    fn set_zoom(&self, level: f64) -> Result<(), SurfaceError>;
    fn load_url(&self, url: &str) -> Result<(), SurfaceError>;
    fn reload(&self) -> Result<(), SurfaceError>;
}

/// Creates and releases surfaces and owns their storage partitions.
///
/// Surface creation and destruction are the only suspension points of
/// the lifecycle manager.
#[async_trait(?Send)]
pub trait SurfaceBackend {
    type Surface: Surface;

    async fn create(&self, request: &SurfaceRequest) -> Result<Self::Surface, SurfaceError>;

    async fn destroy(&self, surface: Self::Surface);

    /// Wipe cookies and storage of `partition`. `live` holds every surface
    /// currently bound to it.
    fn clear_partition(
        &self,
        partition: &PartitionKey,
        live: &[&Self::Surface],
    ) -> Result<(), SurfaceError>;

    /// Drop in-memory references to a partition no surface uses anymore.
    /// On-disk data is kept.
    fn release_partition(&self, partition: &PartitionKey);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_errors_map_to_partition_failures() {
        let err: DockError = SurfaceError::Clear("locked".into()).into();
        assert_eq!(err.kind(), "partition_clear_failed");

        let err: DockError = SurfaceError::Build("no display".into()).into();
        assert_eq!(err.kind(), "surface_creation_failed");
        assert!(err.to_string().contains("no display"));
    }
}
