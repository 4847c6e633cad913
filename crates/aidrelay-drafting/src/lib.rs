//! Emergency-campaign drafting for aidrelay.
//!
//! Turns HIGH/CRITICAL alerts into campaign drafts on the donation platform,
//! exactly once per distinct real-world event. The platform itself (campaign
//! and user persistence) sits behind the [`CampaignStore`] and
//! [`IdentityLookup`] traits; [`PlatformClient`] is the HTTP implementation
//! against its REST API. Drafts always land in pending review; nothing here
//! publishes a campaign.

pub mod client;
pub mod draft;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod store;
pub mod types;

pub use client::PlatformClient;
pub use engine::{CycleReport, EmergencyEngine};
pub use error::{DraftError, PlatformError};
pub use ledger::DedupLedger;
pub use store::{CampaignStore, IdentityLookup};
pub use types::{Campaign, CampaignDraft, Identity};
