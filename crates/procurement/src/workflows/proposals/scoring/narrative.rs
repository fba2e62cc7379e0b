use super::profile::{ProposalOffer, RequirementProfile};
use super::ScoreRow;

pub(crate) const FORMULA_ONLY_NOTE: &str =
    "All proposals were scored purely by formula; no qualitative override was applied.";

/// Index of the first row holding the highest total. Later rows replace the
/// leader only when strictly greater, so ties resolve to input order.
pub(crate) fn select_winner(scores: &[ScoreRow]) -> Option<usize> {
    let mut leader: Option<(usize, u8)> = None;
    for (index, row) in scores.iter().enumerate() {
        match leader {
            Some((_, best)) if row.total_score <= best => {}
            _ => leader = Some((index, row.total_score)),
        }
    }
    leader.map(|(index, _)| index)
}

pub(crate) fn considerations(
    requirement: &RequirementProfile,
    offers: &[ProposalOffer],
    winner: &ProposalOffer,
) -> Vec<String> {
    let mut notes = Vec::new();

    let average_price =
        offers.iter().map(|offer| offer.total_price).sum::<f64>() / offers.len() as f64;

    if winner.total_price < average_price {
        notes.push(format!(
            "{} is priced at {}, below the average of {} across all proposals.",
            winner.vendor_label,
            format_amount(winner.total_price),
            format_amount(average_price.round()),
        ));
    }

    if winner.delivery_days > 0.0
        && requirement.delivery_days > 0.0
        && winner.delivery_days <= requirement.delivery_days
    {
        notes.push(format!(
            "{} meets the delivery requirement ({} days offered, {} required).",
            winner.vendor_label,
            format_amount(winner.delivery_days),
            format_amount(requirement.delivery_days),
        ));
    }

    if winner.warranty_months > 0.0
        && requirement.warranty_months > 0.0
        && winner.warranty_months >= requirement.warranty_months
    {
        notes.push(format!(
            "{} meets the warranty requirement ({} months offered, {} required).",
            winner.vendor_label,
            format_amount(winner.warranty_months),
            format_amount(requirement.warranty_months),
        ));
    }

    if let Some(cheapest) = first_extreme(offers, |offer| offer.total_price, |a, b| a < b) {
        if cheapest.vendor_label != winner.vendor_label {
            notes.push(format!(
                "{} has the lowest price at {}.",
                cheapest.vendor_label,
                format_amount(cheapest.total_price),
            ));
        }
    }

    if let Some(longest) = first_extreme(offers, |offer| offer.warranty_months, |a, b| a > b) {
        if longest.vendor_label != winner.vendor_label {
            notes.push(format!(
                "{} offers the longest warranty at {} months.",
                longest.vendor_label,
                format_amount(longest.warranty_months),
            ));
        }
    }

    if notes.is_empty() {
        notes.push(FORMULA_ONLY_NOTE.to_string());
    }

    notes
}

pub(crate) fn summary(offer_count: usize, winner: &ScoreRow) -> String {
    let noun = if offer_count == 1 {
        "proposal"
    } else {
        "proposals"
    };
    format!(
        "Compared {offer_count} {noun}. {} ranks highest with a total score of {}/100.",
        winner.vendor_name, winner.total_score
    )
}

pub(crate) fn reason(winner: &ScoreRow) -> String {
    format!(
        "{} scored {} on price, {} on delivery, and {} on warranty, for the best total score of {}.",
        winner.vendor_name,
        winner.price_score,
        winner.delivery_score,
        winner.warranty_score,
        winner.total_score
    )
}

/// First offer whose metric beats every earlier one under `better`.
fn first_extreme<'a>(
    offers: &'a [ProposalOffer],
    metric: impl Fn(&ProposalOffer) -> f64,
    better: impl Fn(f64, f64) -> bool,
) -> Option<&'a ProposalOffer> {
    let mut best: Option<&ProposalOffer> = None;
    for offer in offers {
        match best {
            Some(current) if !better(metric(offer), metric(current)) => {}
            _ => best = Some(offer),
        }
    }
    best
}

/// Whole amounts print without decimals; fractional ones keep two places.
pub(crate) fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
