use crate::analytics::record::RequestRecord;
use async_trait::async_trait;

pub mod http_requester;

/// Performs one timed call against the target.
///
/// Implementations never fail: every outcome, transport errors included, is encoded in the
/// returned record so that one failing request cannot abort its batch.
#[async_trait]
pub trait Requester: Send + Sync {
    async fn request(&self, unit: u32) -> RequestRecord;

    fn target(&self) -> &str;
}
