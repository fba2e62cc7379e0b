use super::domain::{ProposalRecord, Rfp, RfpId, Vendor, VendorId};

/// Storage abstraction for RFPs and the proposals that answer them.
pub trait RfpRepository: Send + Sync {
    fn insert_rfp(&self, rfp: Rfp) -> Result<Rfp, RepositoryError>;
    fn fetch_rfp(&self, id: &RfpId) -> Result<Option<Rfp>, RepositoryError>;
    fn list_rfps(&self) -> Result<Vec<Rfp>, RepositoryError>;
    fn insert_proposal(&self, proposal: ProposalRecord)
        -> Result<ProposalRecord, RepositoryError>;
    /// Proposals referencing `rfp_id`, in the order they were received.
    fn proposals_for(&self, rfp_id: &RfpId) -> Result<Vec<ProposalRecord>, RepositoryError>;
    fn list_proposals(&self) -> Result<Vec<ProposalRecord>, RepositoryError>;
}

/// Vendor contact directory.
pub trait VendorDirectory: Send + Sync {
    /// Rejects a vendor whose email is already registered with [`RepositoryError::Conflict`].
    fn insert_vendor(&self, vendor: Vendor) -> Result<Vendor, RepositoryError>;
    fn fetch_vendor(&self, id: &VendorId) -> Result<Option<Vendor>, RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<Vendor>, RepositoryError>;
    fn list_vendors(&self) -> Result<Vec<Vendor>, RepositoryError>;
    /// Replaces the vendor stored under `vendor.id`. Fails with
    /// [`RepositoryError::NotFound`] for an unknown id and with
    /// [`RepositoryError::Conflict`] when the email belongs to another vendor.
    fn update_vendor(&self, vendor: Vendor) -> Result<Vendor, RepositoryError>;
    /// Removes the vendor, returning `None` when the id is unknown.
    fn delete_vendor(&self, id: &VendorId) -> Result<Option<Vendor>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
