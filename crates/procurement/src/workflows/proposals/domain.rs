use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scoring::{
    coerce_amount, lenient_amount, resolve_vendor_label, ProposalOffer, RequirementProfile,
};

/// Identifier wrapper for requests for proposal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RfpId(pub String);

/// Identifier wrapper for registered vendors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VendorId(pub String);

/// Identifier wrapper for received proposals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProposalId(pub String);

/// Issued ids share a prefix and differ only in their numeric suffix, so a
/// longer id was always issued later than a shorter one.
fn issue_order(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

macro_rules! issued_id {
    ($($id:ident),+) => {$(
        impl fmt::Display for $id {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Ord for $id {
            fn cmp(&self, other: &Self) -> Ordering {
                issue_order(&self.0, &other.0)
            }
        }

        impl PartialOrd for $id {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }
    )+};
}

issued_id!(RfpId, VendorId, ProposalId);

/// Line item requested by an RFP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RfpItem {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub specifications: String,
}

fn default_quantity() -> u32 {
    1
}

/// Structured RFP as produced by the requirement extraction step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RfpDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub budget: Option<f64>,
    #[serde(default)]
    pub items: Vec<RfpItem>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub delivery_days: Option<f64>,
    #[serde(default)]
    pub payment_terms: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub warranty_months: Option<f64>,
}

/// Stored request for proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rfp {
    pub id: RfpId,
    pub title: String,
    pub description: String,
    pub budget: Option<f64>,
    pub items: Vec<RfpItem>,
    pub delivery_days: Option<f64>,
    pub payment_terms: String,
    pub warranty_months: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Rfp {
    pub const DEFAULT_PAYMENT_TERMS: &'static str = "Net 30";

    pub fn from_draft(id: RfpId, draft: RfpDraft, created_at: DateTime<Utc>) -> Self {
        let payment_terms = draft
            .payment_terms
            .map(|terms| terms.trim().to_string())
            .filter(|terms| !terms.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_PAYMENT_TERMS.to_string());

        Self {
            id,
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            budget: draft.budget,
            items: draft.items,
            delivery_days: draft.delivery_days,
            payment_terms,
            warranty_months: draft.warranty_months,
            created_at,
        }
    }

    /// Reference terms the scorer measures each offer against.
    pub fn requirement_profile(&self) -> RequirementProfile {
        RequirementProfile::new(self.budget, self.delivery_days, self.warranty_months)
    }

    pub fn summary(&self) -> RfpSummary {
        RfpSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            budget: coerce_amount(self.budget),
        }
    }
}

/// Short RFP reference embedded in comparison envelopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RfpSummary {
    pub id: RfpId,
    pub title: String,
    pub budget: f64,
}

/// Vendor registration payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

/// Registered vendor contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Vendor {
    /// Emails are matched case-insensitively, so they are stored trimmed and lowercased.
    pub fn normalize_email(raw: &str) -> String {
        raw.trim().to_ascii_lowercase()
    }
}

/// Partial vendor edit. Absent fields keep their stored value; a blank phone
/// or company clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

/// Priced line item quoted in a proposal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalItem {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub price_per_unit: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub quantity: Option<f64>,
}

/// Structured vendor reply, typically produced by parsing an inbound email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalSubmission {
    pub rfp_id: RfpId,
    #[serde(default)]
    pub vendor_id: Option<VendorId>,
    /// Sender address of the reply, used when no vendor record resolves.
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub delivery_days: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub warranty_months: Option<f64>,
    #[serde(default)]
    pub items: Vec<ProposalItem>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Stored proposal. Numeric terms are kept as received and coerced only when scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRecord {
    pub id: ProposalId,
    pub rfp_id: RfpId,
    pub vendor_id: Option<VendorId>,
    pub sender: Option<String>,
    pub total_price: Option<f64>,
    pub delivery_days: Option<f64>,
    pub warranty_months: Option<f64>,
    pub items: Vec<ProposalItem>,
    pub notes: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl ProposalRecord {
    pub fn from_submission(
        id: ProposalId,
        submission: ProposalSubmission,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            rfp_id: submission.rfp_id,
            vendor_id: submission.vendor_id,
            sender: submission.sender,
            total_price: submission.total_price,
            delivery_days: submission.delivery_days,
            warranty_months: submission.warranty_months,
            items: submission.items,
            notes: submission.notes,
            received_at,
        }
    }

    /// Display label: vendor name, then sender address, then the unknown-vendor sentinel.
    pub fn vendor_label(&self, vendor: Option<&Vendor>) -> String {
        resolve_vendor_label(
            vendor.map(|vendor| vendor.name.as_str()),
            self.sender
                .as_deref()
                .or(vendor.map(|vendor| vendor.email.as_str())),
        )
    }

    pub fn offer(&self, vendor: Option<&Vendor>) -> ProposalOffer {
        ProposalOffer {
            vendor_label: self.vendor_label(vendor),
            total_price: coerce_amount(self.total_price),
            delivery_days: coerce_amount(self.delivery_days),
            warranty_months: coerce_amount(self.warranty_months),
            notes: self.notes.clone().unwrap_or_default(),
        }
    }
}

/// Proposal joined with its resolved vendor label for listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalView {
    #[serde(flatten)]
    pub proposal: ProposalRecord,
    pub vendor_name: String,
}
