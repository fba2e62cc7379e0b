use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{
    ProposalId, ProposalRecord, ProposalSubmission, ProposalView, Rfp, RfpDraft, RfpId,
    RfpSummary, Vendor, VendorDraft, VendorId, VendorUpdate,
};
use super::repository::{RepositoryError, RfpRepository, VendorDirectory};
use super::scoring::{
    ComparisonReport, ProposalOffer, ProposalScorer, RequirementProfile, ScoringConfig,
    ScoringError,
};

/// Service composing the RFP store, the vendor directory, and the proposal scorer.
pub struct ProcurementService<R, V> {
    rfps: Arc<R>,
    vendors: Arc<V>,
    scorer: Arc<ProposalScorer>,
    ids: IdSequences,
}

/// Per-service counters backing the `rfp-`, `vendor-`, and `proposal-` ids.
#[derive(Debug)]
struct IdSequences {
    rfp: AtomicU64,
    vendor: AtomicU64,
    proposal: AtomicU64,
}

impl Default for IdSequences {
    fn default() -> Self {
        Self {
            rfp: AtomicU64::new(1),
            vendor: AtomicU64::new(1),
            proposal: AtomicU64::new(1),
        }
    }
}

fn next_id(sequence: &AtomicU64, prefix: &str) -> String {
    let id = sequence.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id:06}")
}

/// Comparison of every proposal received for one RFP.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RfpComparison {
    pub rfp: RfpSummary,
    pub proposal_count: usize,
    pub comparison: ComparisonReport,
}

impl<R, V> ProcurementService<R, V>
where
    R: RfpRepository + 'static,
    V: VendorDirectory + 'static,
{
    pub fn new(rfps: Arc<R>, vendors: Arc<V>, config: ScoringConfig) -> Self {
        Self {
            rfps,
            vendors,
            scorer: Arc::new(ProposalScorer::new(config)),
            ids: IdSequences::default(),
        }
    }

    pub fn scorer(&self) -> &ProposalScorer {
        &self.scorer
    }

    /// Store a structured RFP draft.
    pub fn create_rfp(&self, draft: RfpDraft) -> Result<Rfp, ProcurementServiceError> {
        if draft.title.trim().is_empty() {
            return Err(ProcurementServiceError::Validation(
                "RFP title is required".to_string(),
            ));
        }

        let id = RfpId(next_id(&self.ids.rfp, "rfp"));
        let rfp = self
            .rfps
            .insert_rfp(Rfp::from_draft(id, draft, Utc::now()))?;
        info!(rfp_id = %rfp.id.0, title = %rfp.title, "rfp created");
        Ok(rfp)
    }

    /// All RFPs, newest first.
    pub fn list_rfps(&self) -> Result<Vec<Rfp>, ProcurementServiceError> {
        let mut rfps = self.rfps.list_rfps()?;
        rfps.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(rfps)
    }

    pub fn get_rfp(&self, id: &RfpId) -> Result<Rfp, ProcurementServiceError> {
        self.rfps
            .fetch_rfp(id)?
            .ok_or_else(|| ProcurementServiceError::RfpNotFound(id.clone()))
    }

    /// Register a vendor. Name and email are required and emails are unique.
    pub fn register_vendor(&self, draft: VendorDraft) -> Result<Vendor, ProcurementServiceError> {
        let name = draft.name.trim().to_string();
        let email = Vendor::normalize_email(&draft.email);
        if name.is_empty() || email.is_empty() {
            return Err(ProcurementServiceError::Validation(
                "vendor name and email are required".to_string(),
            ));
        }

        if self.vendors.find_by_email(&email)?.is_some() {
            return Err(ProcurementServiceError::DuplicateVendor { email });
        }

        let vendor = Vendor {
            id: VendorId(next_id(&self.ids.vendor, "vendor")),
            name,
            email,
            phone: draft.phone.filter(|phone| !phone.trim().is_empty()),
            company: draft.company.filter(|company| !company.trim().is_empty()),
            created_at: Utc::now(),
        };

        let stored = match self.vendors.insert_vendor(vendor) {
            Err(RepositoryError::Conflict) => {
                return Err(ProcurementServiceError::DuplicateVendor {
                    email: Vendor::normalize_email(&draft.email),
                })
            }
            other => other?,
        };
        info!(vendor_id = %stored.id.0, "vendor registered");
        Ok(stored)
    }

    /// All vendors, newest first.
    pub fn list_vendors(&self) -> Result<Vec<Vendor>, ProcurementServiceError> {
        let mut vendors = self.vendors.list_vendors()?;
        vendors.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(vendors)
    }

    pub fn get_vendor(&self, id: &VendorId) -> Result<Vendor, ProcurementServiceError> {
        self.vendors
            .fetch_vendor(id)?
            .ok_or_else(|| ProcurementServiceError::VendorNotFound(id.clone()))
    }

    /// Apply a partial edit. A changed email must not belong to another vendor.
    pub fn update_vendor(
        &self,
        id: &VendorId,
        update: VendorUpdate,
    ) -> Result<Vendor, ProcurementServiceError> {
        let mut vendor = self.get_vendor(id)?;

        if let Some(name) = update.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(ProcurementServiceError::Validation(
                    "vendor name cannot be blank".to_string(),
                ));
            }
            vendor.name = name;
        }

        if let Some(email) = update.email {
            let email = Vendor::normalize_email(&email);
            if email.is_empty() {
                return Err(ProcurementServiceError::Validation(
                    "vendor email cannot be blank".to_string(),
                ));
            }
            if email != vendor.email {
                if let Some(owner) = self.vendors.find_by_email(&email)? {
                    if owner.id != vendor.id {
                        return Err(ProcurementServiceError::DuplicateVendor { email });
                    }
                }
            }
            vendor.email = email;
        }

        if let Some(phone) = update.phone {
            vendor.phone = Some(phone).filter(|phone| !phone.trim().is_empty());
        }
        if let Some(company) = update.company {
            vendor.company = Some(company).filter(|company| !company.trim().is_empty());
        }

        let email = vendor.email.clone();
        let stored = match self.vendors.update_vendor(vendor) {
            Err(RepositoryError::Conflict) => {
                return Err(ProcurementServiceError::DuplicateVendor { email })
            }
            Err(RepositoryError::NotFound) => {
                return Err(ProcurementServiceError::VendorNotFound(id.clone()))
            }
            other => other?,
        };
        info!(vendor_id = %stored.id.0, "vendor updated");
        Ok(stored)
    }

    /// Remove a vendor. Proposals that referenced it fall back to their sender label.
    pub fn delete_vendor(&self, id: &VendorId) -> Result<Vendor, ProcurementServiceError> {
        let removed = self
            .vendors
            .delete_vendor(id)?
            .ok_or_else(|| ProcurementServiceError::VendorNotFound(id.clone()))?;
        info!(vendor_id = %removed.id.0, "vendor deleted");
        Ok(removed)
    }

    /// Record a parsed vendor reply against an existing RFP.
    pub fn record_proposal(
        &self,
        submission: ProposalSubmission,
    ) -> Result<ProposalRecord, ProcurementServiceError> {
        self.get_rfp(&submission.rfp_id)?;
        if let Some(vendor_id) = &submission.vendor_id {
            self.get_vendor(vendor_id)?;
        }

        let id = ProposalId(next_id(&self.ids.proposal, "proposal"));
        let record = self
            .rfps
            .insert_proposal(ProposalRecord::from_submission(id, submission, Utc::now()))?;
        info!(
            proposal_id = %record.id.0,
            rfp_id = %record.rfp_id.0,
            "proposal recorded"
        );
        Ok(record)
    }

    /// Proposals received for one RFP, newest first.
    pub fn proposals_for_rfp(
        &self,
        rfp_id: &RfpId,
    ) -> Result<Vec<ProposalView>, ProcurementServiceError> {
        let records = self.rfps.proposals_for(rfp_id)?;
        self.newest_first(records)
    }

    /// Every stored proposal, newest first.
    pub fn list_proposals(&self) -> Result<Vec<ProposalView>, ProcurementServiceError> {
        let records = self.rfps.list_proposals()?;
        self.newest_first(records)
    }

    /// Score every proposal received for `rfp_id`, in the order received.
    pub fn compare(&self, rfp_id: &RfpId) -> Result<RfpComparison, ProcurementServiceError> {
        let rfp = self.get_rfp(rfp_id)?;
        let records = self.rfps.proposals_for(rfp_id)?;
        if records.is_empty() {
            return Err(ProcurementServiceError::NoProposals(rfp_id.clone()));
        }

        info!(rfp_id = %rfp_id.0, proposals = records.len(), "comparing proposals");

        let vendors = self.vendors_for(&records)?;
        let offers: Vec<ProposalOffer> = records
            .iter()
            .map(|record| record.offer(lookup(&vendors, record)))
            .collect();

        let comparison = self.scorer.compare(&rfp.requirement_profile(), &offers)?;
        info!(
            rfp_id = %rfp_id.0,
            best_vendor = %comparison.recommendation.best_vendor,
            "comparison complete"
        );

        Ok(RfpComparison {
            rfp: rfp.summary(),
            proposal_count: records.len(),
            comparison,
        })
    }

    /// Score offers supplied directly by the caller without touching the stores.
    pub fn compare_offers(
        &self,
        requirement: &RequirementProfile,
        offers: &[ProposalOffer],
    ) -> Result<ComparisonReport, ProcurementServiceError> {
        Ok(self.scorer.compare(requirement, offers)?)
    }

    fn newest_first(
        &self,
        mut records: Vec<ProposalRecord>,
    ) -> Result<Vec<ProposalView>, ProcurementServiceError> {
        records.sort_by(|a, b| {
            b.received_at
                .cmp(&a.received_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        let vendors = self.vendors_for(&records)?;
        Ok(records
            .into_iter()
            .map(|record| ProposalView {
                vendor_name: record.vendor_label(lookup(&vendors, &record)),
                proposal: record,
            })
            .collect())
    }

    fn vendors_for(
        &self,
        records: &[ProposalRecord],
    ) -> Result<BTreeMap<VendorId, Vendor>, ProcurementServiceError> {
        let mut vendors = BTreeMap::new();
        for vendor_id in records.iter().filter_map(|record| record.vendor_id.as_ref()) {
            if vendors.contains_key(vendor_id) {
                continue;
            }
            match self.vendors.fetch_vendor(vendor_id)? {
                Some(vendor) => {
                    vendors.insert(vendor_id.clone(), vendor);
                }
                None => warn!(vendor_id = %vendor_id.0, "proposal references unknown vendor"),
            }
        }
        Ok(vendors)
    }
}

fn lookup<'a>(
    vendors: &'a BTreeMap<VendorId, Vendor>,
    record: &ProposalRecord,
) -> Option<&'a Vendor> {
    record
        .vendor_id
        .as_ref()
        .and_then(|vendor_id| vendors.get(vendor_id))
}

/// Error raised by the procurement service.
#[derive(Debug, thiserror::Error)]
pub enum ProcurementServiceError {
    #[error("RFP {0} not found")]
    RfpNotFound(RfpId),
    #[error("vendor {0} not found")]
    VendorNotFound(VendorId),
    #[error("no proposals found for RFP {0}")]
    NoProposals(RfpId),
    #[error("vendor with email {email} already exists")]
    DuplicateVendor { email: String },
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
