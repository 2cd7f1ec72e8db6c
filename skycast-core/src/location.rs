use std::fmt::Debug;

use async_trait::async_trait;

use crate::model::Coordinates;

/// Source of the coordinates a weather request is issued for.
///
/// Platform implementations (GPS, IP lookup) live outside this crate; the
/// core only ever consumes one coordinate pair per request.
#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    async fn current_location(&self) -> anyhow::Result<Coordinates>;
}

/// A fixed coordinate pair, for callers that already know where they are.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_location(&self) -> anyhow::Result<Coordinates> {
        Ok(self.0)
    }
}
