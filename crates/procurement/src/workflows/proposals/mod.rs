//! RFP intake, vendor directory, proposal capture, and proposal comparison.
//!
//! Requirement extraction and inbox parsing happen upstream; this module consumes their
//! structured output, stores it behind the repository traits, and ranks the proposals
//! received for an RFP with [`ProposalScorer`].

pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ProposalId, ProposalItem, ProposalRecord, ProposalSubmission, ProposalView, Rfp, RfpDraft,
    RfpId, RfpItem, RfpSummary, Vendor, VendorDraft, VendorId, VendorUpdate,
};
pub use repository::{RepositoryError, RfpRepository, VendorDirectory};
pub use router::procurement_router;
pub use scoring::{
    ComparisonReport, ComparisonRequest, OfferInput, ProposalOffer, ProposalScorer,
    Recommendation, RequirementInput, RequirementProfile, ScoreRow, ScoringConfig, ScoringError,
};
pub use service::{ProcurementService, ProcurementServiceError, RfpComparison};
