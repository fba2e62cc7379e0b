use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::proposals::domain::{
    ProposalRecord, ProposalSubmission, Rfp, RfpDraft, RfpId, Vendor, VendorDraft, VendorId,
};
use crate::workflows::proposals::repository::{RepositoryError, RfpRepository, VendorDirectory};
use crate::workflows::proposals::scoring::{ProposalOffer, RequirementProfile, ScoringConfig};
use crate::workflows::proposals::{procurement_router, ProcurementService};

#[derive(Default)]
pub(super) struct MemoryRfps {
    rfps: Mutex<Vec<Rfp>>,
    proposals: Mutex<Vec<ProposalRecord>>,
}

impl RfpRepository for MemoryRfps {
    fn insert_rfp(&self, rfp: Rfp) -> Result<Rfp, RepositoryError> {
        let mut guard = self.rfps.lock().expect("rfp mutex poisoned");
        if guard.iter().any(|existing| existing.id == rfp.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(rfp.clone());
        Ok(rfp)
    }

    fn fetch_rfp(&self, id: &RfpId) -> Result<Option<Rfp>, RepositoryError> {
        let guard = self.rfps.lock().expect("rfp mutex poisoned");
        Ok(guard.iter().find(|rfp| &rfp.id == id).cloned())
    }

    fn list_rfps(&self) -> Result<Vec<Rfp>, RepositoryError> {
        Ok(self.rfps.lock().expect("rfp mutex poisoned").clone())
    }

    fn insert_proposal(
        &self,
        proposal: ProposalRecord,
    ) -> Result<ProposalRecord, RepositoryError> {
        self.proposals
            .lock()
            .expect("proposal mutex poisoned")
            .push(proposal.clone());
        Ok(proposal)
    }

    fn proposals_for(&self, rfp_id: &RfpId) -> Result<Vec<ProposalRecord>, RepositoryError> {
        let guard = self.proposals.lock().expect("proposal mutex poisoned");
        Ok(guard
            .iter()
            .filter(|proposal| &proposal.rfp_id == rfp_id)
            .cloned()
            .collect())
    }

    fn list_proposals(&self) -> Result<Vec<ProposalRecord>, RepositoryError> {
        Ok(self.proposals.lock().expect("proposal mutex poisoned").clone())
    }
}

#[derive(Default)]
pub(super) struct MemoryVendors {
    vendors: Mutex<Vec<Vendor>>,
}

impl VendorDirectory for MemoryVendors {
    fn insert_vendor(&self, vendor: Vendor) -> Result<Vendor, RepositoryError> {
        let mut guard = self.vendors.lock().expect("vendor mutex poisoned");
        if guard.iter().any(|existing| existing.email == vendor.email) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(vendor.clone());
        Ok(vendor)
    }

    fn fetch_vendor(&self, id: &VendorId) -> Result<Option<Vendor>, RepositoryError> {
        let guard = self.vendors.lock().expect("vendor mutex poisoned");
        Ok(guard.iter().find(|vendor| &vendor.id == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Vendor>, RepositoryError> {
        let guard = self.vendors.lock().expect("vendor mutex poisoned");
        Ok(guard.iter().find(|vendor| vendor.email == email).cloned())
    }

    fn list_vendors(&self) -> Result<Vec<Vendor>, RepositoryError> {
        Ok(self.vendors.lock().expect("vendor mutex poisoned").clone())
    }

    fn update_vendor(&self, vendor: Vendor) -> Result<Vendor, RepositoryError> {
        let mut guard = self.vendors.lock().expect("vendor mutex poisoned");
        if guard
            .iter()
            .any(|existing| existing.email == vendor.email && existing.id != vendor.id)
        {
            return Err(RepositoryError::Conflict);
        }
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == vendor.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = vendor.clone();
        Ok(vendor)
    }

    fn delete_vendor(&self, id: &VendorId) -> Result<Option<Vendor>, RepositoryError> {
        let mut guard = self.vendors.lock().expect("vendor mutex poisoned");
        Ok(guard
            .iter()
            .position(|vendor| &vendor.id == id)
            .map(|index| guard.remove(index)))
    }
}

pub(super) struct UnavailableRfps;

impl RfpRepository for UnavailableRfps {
    fn insert_rfp(&self, _rfp: Rfp) -> Result<Rfp, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_rfp(&self, _id: &RfpId) -> Result<Option<Rfp>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_rfps(&self) -> Result<Vec<Rfp>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_proposal(
        &self,
        _proposal: ProposalRecord,
    ) -> Result<ProposalRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn proposals_for(&self, _rfp_id: &RfpId) -> Result<Vec<ProposalRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_proposals(&self) -> Result<Vec<ProposalRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) type MemoryService = ProcurementService<MemoryRfps, MemoryVendors>;

pub(super) fn build_service() -> (MemoryService, Arc<MemoryRfps>, Arc<MemoryVendors>) {
    let rfps = Arc::new(MemoryRfps::default());
    let vendors = Arc::new(MemoryVendors::default());
    let service = ProcurementService::new(rfps.clone(), vendors.clone(), ScoringConfig::default());
    (service, rfps, vendors)
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    procurement_router(Arc::new(service))
}

/// Requirement used by the worked two-vendor example.
pub(super) fn requirement() -> RequirementProfile {
    RequirementProfile::new(Some(10_000.0), Some(14.0), Some(24.0))
}

pub(super) fn offer(vendor: &str, price: f64, delivery: f64, warranty: f64) -> ProposalOffer {
    ProposalOffer::new(vendor, price, delivery, warranty)
}

pub(super) fn example_offers() -> Vec<ProposalOffer> {
    vec![
        offer("A", 9_000.0, 10.0, 24.0),
        offer("B", 8_000.0, 20.0, 12.0),
    ]
}

pub(super) fn laptop_rfp() -> RfpDraft {
    RfpDraft {
        title: "Office laptops".to_string(),
        description: "20 laptops with 16GB RAM for the Denver office".to_string(),
        budget: Some(10_000.0),
        items: Vec::new(),
        delivery_days: Some(14.0),
        payment_terms: None,
        warranty_months: Some(24.0),
    }
}

pub(super) fn vendor_draft(name: &str, email: &str) -> VendorDraft {
    VendorDraft {
        name: name.to_string(),
        email: email.to_string(),
        phone: Some("+1-555-0100".to_string()),
        company: None,
    }
}

pub(super) fn submission(
    rfp_id: &RfpId,
    vendor_id: Option<&VendorId>,
    price: f64,
    delivery: f64,
    warranty: f64,
) -> ProposalSubmission {
    ProposalSubmission {
        rfp_id: rfp_id.clone(),
        vendor_id: vendor_id.cloned(),
        sender: None,
        total_price: Some(price),
        delivery_days: Some(delivery),
        warranty_months: Some(warranty),
        items: Vec::new(),
        notes: None,
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
