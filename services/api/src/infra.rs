use metrics_exporter_prometheus::PrometheusHandle;
use procurement::workflows::proposals::{
    ProposalRecord, RepositoryError, Rfp, RfpId, RfpRepository, Vendor, VendorDirectory, VendorId,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn lock<'a, T>(mutex: &'a Mutex<T>, store: &str) -> Result<MutexGuard<'a, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable(format!("{store} store lock poisoned")))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRfpStore {
    rfps: Arc<Mutex<HashMap<RfpId, Rfp>>>,
    proposals: Arc<Mutex<Vec<ProposalRecord>>>,
}

impl RfpRepository for InMemoryRfpStore {
    fn insert_rfp(&self, rfp: Rfp) -> Result<Rfp, RepositoryError> {
        let mut guard = lock(&self.rfps, "rfp")?;
        if guard.contains_key(&rfp.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(rfp.id.clone(), rfp.clone());
        Ok(rfp)
    }

    fn fetch_rfp(&self, id: &RfpId) -> Result<Option<Rfp>, RepositoryError> {
        let guard = lock(&self.rfps, "rfp")?;
        Ok(guard.get(id).cloned())
    }

    fn list_rfps(&self) -> Result<Vec<Rfp>, RepositoryError> {
        let guard = lock(&self.rfps, "rfp")?;
        Ok(guard.values().cloned().collect())
    }

    fn insert_proposal(
        &self,
        proposal: ProposalRecord,
    ) -> Result<ProposalRecord, RepositoryError> {
        let mut guard = lock(&self.proposals, "proposal")?;
        if guard.iter().any(|existing| existing.id == proposal.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(proposal.clone());
        Ok(proposal)
    }

    fn proposals_for(&self, rfp_id: &RfpId) -> Result<Vec<ProposalRecord>, RepositoryError> {
        let guard = lock(&self.proposals, "proposal")?;
        Ok(guard
            .iter()
            .filter(|proposal| &proposal.rfp_id == rfp_id)
            .cloned()
            .collect())
    }

    fn list_proposals(&self) -> Result<Vec<ProposalRecord>, RepositoryError> {
        Ok(lock(&self.proposals, "proposal")?.clone())
    }
}

/// Vendors keyed by id, with a secondary index on normalized email.
#[derive(Default, Clone)]
pub(crate) struct InMemoryVendorDirectory {
    vendors: Arc<Mutex<VendorIndex>>,
}

#[derive(Default)]
struct VendorIndex {
    by_id: HashMap<VendorId, Vendor>,
    by_email: HashMap<String, VendorId>,
}

impl VendorDirectory for InMemoryVendorDirectory {
    fn insert_vendor(&self, vendor: Vendor) -> Result<Vendor, RepositoryError> {
        let mut guard = lock(&self.vendors, "vendor")?;
        if guard.by_email.contains_key(&vendor.email) || guard.by_id.contains_key(&vendor.id) {
            return Err(RepositoryError::Conflict);
        }
        guard
            .by_email
            .insert(vendor.email.clone(), vendor.id.clone());
        guard.by_id.insert(vendor.id.clone(), vendor.clone());
        Ok(vendor)
    }

    fn fetch_vendor(&self, id: &VendorId) -> Result<Option<Vendor>, RepositoryError> {
        let guard = lock(&self.vendors, "vendor")?;
        Ok(guard.by_id.get(id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Vendor>, RepositoryError> {
        let guard = lock(&self.vendors, "vendor")?;
        Ok(guard
            .by_email
            .get(email)
            .and_then(|id| guard.by_id.get(id))
            .cloned())
    }

    fn list_vendors(&self) -> Result<Vec<Vendor>, RepositoryError> {
        let guard = lock(&self.vendors, "vendor")?;
        Ok(guard.by_id.values().cloned().collect())
    }

    fn update_vendor(&self, vendor: Vendor) -> Result<Vendor, RepositoryError> {
        let mut guard = lock(&self.vendors, "vendor")?;
        let previous_email = guard
            .by_id
            .get(&vendor.id)
            .map(|existing| existing.email.clone())
            .ok_or(RepositoryError::NotFound)?;

        if previous_email != vendor.email {
            if guard.by_email.contains_key(&vendor.email) {
                return Err(RepositoryError::Conflict);
            }
            guard.by_email.remove(&previous_email);
            guard
                .by_email
                .insert(vendor.email.clone(), vendor.id.clone());
        }
        guard.by_id.insert(vendor.id.clone(), vendor.clone());
        Ok(vendor)
    }

    fn delete_vendor(&self, id: &VendorId) -> Result<Option<Vendor>, RepositoryError> {
        let mut guard = lock(&self.vendors, "vendor")?;
        let removed = guard.by_id.remove(id);
        if let Some(vendor) = &removed {
            guard.by_email.remove(&vendor.email);
        }
        Ok(removed)
    }
}
