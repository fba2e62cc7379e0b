//! Multi-criteria proposal comparison.
//!
//! Each offer is scored on price, delivery, and warranty against the RFP terms,
//! the three axes are averaged without weights, and the first offer holding the
//! highest total is recommended. The engine is pure: identical inputs always
//! produce identical reports.

mod config;
mod narrative;
mod profile;
mod rules;

pub use config::ScoringConfig;
pub use profile::{
    coerce_amount, resolve_vendor_label, ComparisonRequest, OfferInput, ProposalOffer,
    RequirementInput, RequirementProfile, VendorReference, UNKNOWN_VENDOR,
};

pub(crate) use profile::lenient_amount;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless scorer that applies the configured heuristics to a set of offers.
#[derive(Debug, Clone, Default)]
pub struct ProposalScorer {
    config: ScoringConfig,
}

impl ProposalScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score every offer against the requirement and assemble the ranked report.
    ///
    /// `scores` preserves the order of `offers`. Fails with
    /// [`ScoringError::InvalidInput`] when `offers` is empty.
    pub fn compare(
        &self,
        requirement: &RequirementProfile,
        offers: &[ProposalOffer],
    ) -> Result<ComparisonReport, ScoringError> {
        let scores: Vec<ScoreRow> = offers
            .iter()
            .map(|offer| {
                let axes = rules::score_offer(requirement, offer, &self.config);
                ScoreRow {
                    vendor_name: offer.vendor_label.clone(),
                    price_score: axes.price,
                    delivery_score: axes.delivery,
                    warranty_score: axes.warranty,
                    total_score: axes.total(),
                }
            })
            .collect();

        let winner_index = narrative::select_winner(&scores).ok_or_else(|| {
            ScoringError::InvalidInput("at least one proposal is required".to_string())
        })?;
        let winner_row = &scores[winner_index];
        let winner_offer = &offers[winner_index];

        debug!(
            offers = offers.len(),
            winner = %winner_row.vendor_name,
            total_score = winner_row.total_score,
            "scored proposals"
        );

        let considerations = narrative::considerations(requirement, offers, winner_offer);

        Ok(ComparisonReport {
            summary: narrative::summary(offers.len(), winner_row),
            recommendation: Recommendation {
                best_vendor: winner_row.vendor_name.clone(),
                reason: narrative::reason(winner_row),
            },
            considerations,
            scores,
        })
    }
}

/// Per-offer axis scores, each within `0..=100`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRow {
    pub vendor_name: String,
    pub price_score: u8,
    pub delivery_score: u8,
    pub warranty_score: u8,
    pub total_score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub best_vendor: String,
    pub reason: String,
}

/// Ranked comparison returned to callers and serialized as the HTTP body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub summary: String,
    pub scores: Vec<ScoreRow>,
    pub recommendation: Recommendation,
    pub considerations: Vec<String>,
}

/// Error raised when the scorer cannot produce a report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
