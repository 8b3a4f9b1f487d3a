//! Location listing.

use std::sync::Arc;

use crate::client::MonitorService;
use crate::error::Result;
use crate::types::Location;

#[derive(Clone)]
pub struct ListLocationsOrchestrator {
    remote: Arc<dyn MonitorService>,
}

impl ListLocationsOrchestrator {
    pub fn new(remote: Arc<dyn MonitorService>) -> Self {
        Self { remote }
    }

    /// Locations monitors can run from, as reported by the service.
    pub async fn list_locations(&self) -> Result<Vec<Location>> {
        self.remote.list_locations().await
    }
}
