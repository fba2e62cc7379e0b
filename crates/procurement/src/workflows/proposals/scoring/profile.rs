use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Label used when neither a vendor name nor a contact identifier is available.
pub const UNKNOWN_VENDOR: &str = "Unknown Vendor";

/// Normalized RFP terms used as the reference point for every axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementProfile {
    pub budget: f64,
    pub delivery_days: f64,
    pub warranty_months: f64,
}

impl RequirementProfile {
    pub fn new(
        budget: Option<f64>,
        delivery_days: Option<f64>,
        warranty_months: Option<f64>,
    ) -> Self {
        Self {
            budget: coerce_amount(budget),
            delivery_days: coerce_amount(delivery_days),
            warranty_months: coerce_amount(warranty_months),
        }
    }
}

/// Raw requirement terms as received from upstream producers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementInput {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub budget: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub delivery_days: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub warranty_months: Option<f64>,
}

impl From<RequirementInput> for RequirementProfile {
    fn from(input: RequirementInput) -> Self {
        Self::new(input.budget, input.delivery_days, input.warranty_months)
    }
}

/// Normalized vendor offer consumed by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalOffer {
    pub vendor_label: String,
    pub total_price: f64,
    pub delivery_days: f64,
    pub warranty_months: f64,
    pub notes: String,
}

impl ProposalOffer {
    pub fn new(
        vendor_label: impl Into<String>,
        total_price: f64,
        delivery_days: f64,
        warranty_months: f64,
    ) -> Self {
        let label = vendor_label.into();
        Self {
            vendor_label: resolve_vendor_label(Some(label.as_str()), None),
            total_price: coerce_amount(Some(total_price)),
            delivery_days: coerce_amount(Some(delivery_days)),
            warranty_months: coerce_amount(Some(warranty_months)),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Embedded vendor reference carried by an offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorReference {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Raw offer as produced by the inbox parser or an API caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferInput {
    #[serde(default)]
    pub vendor: Option<VendorReference>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub delivery_days: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub warranty_months: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<OfferInput> for ProposalOffer {
    fn from(input: OfferInput) -> Self {
        let vendor = input.vendor.unwrap_or_default();
        let contact = input.contact.or(vendor.email);
        Self {
            vendor_label: resolve_vendor_label(vendor.name.as_deref(), contact.as_deref()),
            total_price: coerce_amount(input.total_price),
            delivery_days: coerce_amount(input.delivery_days),
            warranty_months: coerce_amount(input.warranty_months),
            notes: input.notes.unwrap_or_default(),
        }
    }
}

/// Ad-hoc comparison payload: requirement terms plus raw offers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    #[serde(default)]
    pub requirement: RequirementInput,
    #[serde(default)]
    pub offers: Vec<OfferInput>,
}

impl ComparisonRequest {
    pub fn into_parts(self) -> (RequirementProfile, Vec<ProposalOffer>) {
        let offers = self.offers.into_iter().map(ProposalOffer::from).collect();
        (self.requirement.into(), offers)
    }
}

/// Pick the first non-blank candidate: vendor name, then contact, then [`UNKNOWN_VENDOR`].
pub fn resolve_vendor_label(vendor_name: Option<&str>, contact: Option<&str>) -> String {
    [vendor_name, contact]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(UNKNOWN_VENDOR)
        .to_string()
}

/// Missing, non-finite, and negative amounts all normalize to zero.
pub fn coerce_amount(value: Option<f64>) -> f64 {
    value
        .filter(|amount| amount.is_finite() && *amount > 0.0)
        .unwrap_or(0.0)
}

/// Accepts numbers and numeric strings; anything else deserializes to `None`.
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }))
}
