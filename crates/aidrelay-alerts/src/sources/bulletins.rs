//! National-authority bulletin source, intentionally disabled.
//!
//! The authority publishes situation bulletins as a human-oriented web page
//! with no public API. Scraping it would match unrelated page text and
//! produce false-positive alerts, so this adapter stays a stub until a
//! machine-readable feed exists.

use aidrelay_core::DisasterAlert;

pub(crate) struct BulletinSource;

impl BulletinSource {
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn fetch(&self) -> Vec<DisasterAlert> {
        tracing::warn!(
            source = "bulletins",
            "national bulletin source has no public API; returning no alerts"
        );
        Vec::new()
    }
}
