//! Boundary traits over the donation platform.
//!
//! The engine only ever talks to the platform through these, so tests can
//! count `create_campaign` calls with an in-memory double and a persistent
//! ledger or alternative backend can slot in later without touching the
//! cycle logic.

use std::future::Future;

use crate::error::PlatformError;
use crate::types::{Campaign, CampaignDraft, Identity};

/// Looks up platform accounts by role.
pub trait IdentityLookup {
    /// First account holding `role`, or `None` if the platform has none.
    fn find_by_role(
        &self,
        role: &str,
    ) -> impl Future<Output = Result<Option<Identity>, PlatformError>> + Send;
}

/// Creates and lists campaigns on the platform.
pub trait CampaignStore {
    fn create_campaign(
        &self,
        creator_id: &str,
        draft: &CampaignDraft,
    ) -> impl Future<Output = Result<Campaign, PlatformError>> + Send;

    fn list_emergency_campaigns(
        &self,
    ) -> impl Future<Output = Result<Vec<Campaign>, PlatformError>> + Send;
}
