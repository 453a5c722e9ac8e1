//! Storage abstractions for schedule persistence and uploaded files.
//!
//! The schedule document is read and written wholesale; there is no partial
//! write or transactional guarantee. Concurrent writers from two sessions
//! can race and overwrite each other's changes.

pub mod local;
pub mod uploads;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ScheduleData;

// Re-export for convenience
pub use local::LocalScheduleStore;

/// Trait for schedule document backends.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Load the whole schedule document; a missing document is empty.
    async fn load(&self) -> Result<ScheduleData>;

    /// Persist the whole schedule document.
    async fn save(&self, data: &ScheduleData) -> Result<()>;
}
