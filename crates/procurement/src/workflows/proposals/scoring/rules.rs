use super::config::ScoringConfig;
use super::profile::{ProposalOffer, RequirementProfile};

/// Upper bound shared by every axis and the total.
pub(crate) const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AxisScores {
    pub price: u8,
    pub delivery: u8,
    pub warranty: u8,
}

impl AxisScores {
    /// Unweighted mean of the three axes, rounded.
    pub fn total(&self) -> u8 {
        let sum = u16::from(self.price) + u16::from(self.delivery) + u16::from(self.warranty);
        clamp_score(f64::from(sum) / 3.0)
    }
}

pub(crate) fn score_offer(
    requirement: &RequirementProfile,
    offer: &ProposalOffer,
    config: &ScoringConfig,
) -> AxisScores {
    AxisScores {
        price: price_score(requirement.budget, offer.total_price, config),
        delivery: delivery_score(requirement.delivery_days, offer.delivery_days, config),
        warranty: warranty_score(requirement.warranty_months, offer.warranty_months, config),
    }
}

/// Lower is better. Anything at or under budget caps at 100.
pub(crate) fn price_score(budget: f64, price: f64, config: &ScoringConfig) -> u8 {
    if price <= 0.0 {
        return 0;
    }

    if budget > 0.0 {
        clamp_score(budget / price * 100.0)
    } else {
        clamp_score(100.0 - price / config.reference_price * 100.0)
    }
}

/// Faster is better. Meeting the required window caps at 100.
pub(crate) fn delivery_score(required_days: f64, offered_days: f64, config: &ScoringConfig) -> u8 {
    if offered_days <= 0.0 {
        return 0;
    }

    if required_days > 0.0 {
        clamp_score(required_days / offered_days * 100.0)
    } else {
        clamp_score(100.0 - config.delivery_decay_per_day * offered_days)
    }
}

/// Longer is better. Matching the required warranty caps at 100.
pub(crate) fn warranty_score(
    required_months: f64,
    offered_months: f64,
    config: &ScoringConfig,
) -> u8 {
    if offered_months <= 0.0 {
        return 0;
    }

    if required_months > 0.0 {
        clamp_score(offered_months / required_months * 100.0)
    } else {
        clamp_score(config.warranty_points_per_month * offered_months)
    }
}

fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, f64::from(MAX_SCORE)) as u8
}
