use super::common::*;
use crate::workflows::proposals::scoring::{
    ProposalOffer, ProposalScorer, RequirementProfile, ScoringConfig, ScoringError, UNKNOWN_VENDOR,
};

#[test]
fn worked_example_ranks_on_time_vendor_first() {
    let scorer = ProposalScorer::default();

    let report = scorer
        .compare(&requirement(), &example_offers())
        .expect("comparison succeeds");

    let a = &report.scores[0];
    assert_eq!(a.vendor_name, "A");
    assert_eq!(
        (a.price_score, a.delivery_score, a.warranty_score, a.total_score),
        (100, 100, 100, 100)
    );

    let b = &report.scores[1];
    assert_eq!(b.vendor_name, "B");
    assert_eq!(
        (b.price_score, b.delivery_score, b.warranty_score, b.total_score),
        (100, 70, 50, 73)
    );

    assert_eq!(report.recommendation.best_vendor, "A");
    assert_eq!(
        report.recommendation.reason,
        "A scored 100 on price, 100 on delivery, and 100 on warranty, for the best total score of 100."
    );
    assert_eq!(
        report.summary,
        "Compared 2 proposals. A ranks highest with a total score of 100/100."
    );
    assert_eq!(
        report.considerations,
        vec![
            "A meets the delivery requirement (10 days offered, 14 required).".to_string(),
            "A meets the warranty requirement (24 months offered, 24 required).".to_string(),
            "B has the lowest price at 8000.".to_string(),
        ]
    );
}

#[test]
fn empty_offer_set_is_rejected() {
    let scorer = ProposalScorer::default();

    match scorer.compare(&requirement(), &[]) {
        Err(ScoringError::InvalidInput(message)) => assert!(message.contains("proposal")),
        other => panic!("expected invalid input, got {other:?}"),
    }
}

#[test]
fn repeated_comparisons_serialize_identically() {
    let scorer = ProposalScorer::default();
    let offers = vec![
        offer("Northwind", 12_345.67, 21.0, 18.0),
        offer("Contoso", 9_999.0, 45.0, 6.0),
        offer("Fabrikam", 0.0, 0.0, 0.0),
    ];

    let first = scorer.compare(&requirement(), &offers).expect("first run");
    let second = scorer.compare(&requirement(), &offers).expect("second run");

    assert_eq!(
        serde_json::to_string(&first).expect("serializes"),
        serde_json::to_string(&second).expect("serializes")
    );
}

#[test]
fn every_score_stays_within_bounds() {
    let scorer = ProposalScorer::default();
    let amounts = [0.0, 0.01, 1.0, 7.5, 14.0, 365.0, 99_999.0, 1.0e12];
    let requirements = [
        RequirementProfile::default(),
        requirement(),
        RequirementProfile::new(Some(0.5), Some(1.0), Some(1.0)),
        RequirementProfile::new(Some(1.0e12), Some(1.0e6), Some(1.0e6)),
    ];

    for requirement in &requirements {
        let offers: Vec<ProposalOffer> = amounts
            .iter()
            .enumerate()
            .map(|(index, amount)| {
                offer(
                    &format!("vendor-{index}"),
                    *amount,
                    amounts[amounts.len() - 1 - index],
                    *amount,
                )
            })
            .collect();

        let report = scorer.compare(requirement, &offers).expect("compares");
        for row in &report.scores {
            for score in [
                row.price_score,
                row.delivery_score,
                row.warranty_score,
                row.total_score,
            ] {
                assert!(score <= 100, "{row:?} exceeds bounds");
            }
        }
    }
}

#[test]
fn rows_follow_input_order() {
    let scorer = ProposalScorer::default();
    let offers = vec![
        offer("Slow", 5_000.0, 60.0, 12.0),
        offer("Fast", 11_000.0, 7.0, 36.0),
        offer("Middle", 9_500.0, 14.0, 24.0),
    ];

    let report = scorer.compare(&requirement(), &offers).expect("compares");

    let names: Vec<&str> = report
        .scores
        .iter()
        .map(|row| row.vendor_name.as_str())
        .collect();
    assert_eq!(names, vec!["Slow", "Fast", "Middle"]);
}

#[test]
fn cheaper_offers_never_score_lower_on_price() {
    let scorer = ProposalScorer::default();
    let anchored = requirement();
    let unanchored = RequirementProfile::new(None, Some(14.0), Some(24.0));
    let prices = [250_000.0, 80_000.0, 40_000.0, 15_000.0, 10_001.0, 9_000.0, 1.0];

    for requirement in [anchored, unanchored] {
        let mut previous = 0;
        for price in prices {
            let offers = vec![
                offer("Probe", price, 14.0, 24.0),
                offer("Fixed", 10_000.0, 14.0, 24.0),
            ];
            let report = scorer.compare(&requirement, &offers).expect("compares");
            let score = report.scores[0].price_score;
            assert!(
                score >= previous,
                "price {price} scored {score}, below {previous}"
            );
            previous = score;
        }
    }
}

#[test]
fn meeting_the_delivery_window_caps_the_axis() {
    let scorer = ProposalScorer::default();
    let offers = vec![
        offer("Exact", 10_000.0, 14.0, 24.0),
        offer("Early", 10_000.0, 3.0, 24.0),
        offer("Late", 10_000.0, 15.0, 24.0),
    ];

    let report = scorer.compare(&requirement(), &offers).expect("compares");

    assert_eq!(report.scores[0].delivery_score, 100);
    assert_eq!(report.scores[1].delivery_score, 100);
    assert_eq!(report.scores[2].delivery_score, 93);
}

#[test]
fn ties_resolve_to_first_offer() {
    let scorer = ProposalScorer::default();
    let offers = vec![
        offer("Late", 10_000.0, 28.0, 24.0),
        offer("First", 10_000.0, 14.0, 24.0),
        offer("Second", 10_000.0, 14.0, 24.0),
    ];

    let report = scorer.compare(&requirement(), &offers).expect("compares");

    assert_eq!(report.scores[1].total_score, report.scores[2].total_score);
    assert_eq!(report.recommendation.best_vendor, "First");
}

#[test]
fn ties_with_different_axis_mix_still_prefer_input_order() {
    let scorer = ProposalScorer::default();
    // 100 + 50 + 100 and 100 + 100 + 50 both round to 83.
    let offers = vec![
        offer("SlowLongWarranty", 10_000.0, 28.0, 24.0),
        offer("FastShortWarranty", 10_000.0, 14.0, 12.0),
    ];

    let report = scorer.compare(&requirement(), &offers).expect("compares");

    assert_eq!(report.scores[0].total_score, 83);
    assert_eq!(report.scores[1].total_score, 83);
    assert_eq!(report.recommendation.best_vendor, "SlowLongWarranty");
}

#[test]
fn exact_match_at_budget_lists_requirement_notes_only() {
    let scorer = ProposalScorer::default();
    let offers = vec![offer("Exact", 10_000.0, 14.0, 24.0)];

    let report = scorer.compare(&requirement(), &offers).expect("compares");

    assert_eq!(
        report.considerations,
        vec![
            "Exact meets the delivery requirement (14 days offered, 14 required).".to_string(),
            "Exact meets the warranty requirement (24 months offered, 24 required).".to_string(),
        ]
    );
    assert_eq!(
        report.summary,
        "Compared 1 proposal. Exact ranks highest with a total score of 100/100."
    );
}

#[test]
fn unanchored_single_offer_falls_back_to_formula_note() {
    let scorer = ProposalScorer::default();
    let offers = vec![offer("Solo", 40_000.0, 10.0, 12.0)];

    let report = scorer
        .compare(&RequirementProfile::default(), &offers)
        .expect("compares");

    let row = &report.scores[0];
    assert_eq!(
        (row.price_score, row.delivery_score, row.warranty_score, row.total_score),
        (60, 80, 60, 67)
    );
    assert_eq!(
        report.considerations,
        vec![
            "All proposals were scored purely by formula; no qualitative override was applied."
                .to_string()
        ]
    );
}

#[test]
fn below_average_winner_and_longer_warranty_rival_are_noted() {
    let scorer = ProposalScorer::default();
    let offers = vec![
        offer("W", 20_000.0, 5.0, 6.0),
        offer("X", 50_000.0, 30.0, 36.0),
    ];

    let report = scorer
        .compare(&RequirementProfile::default(), &offers)
        .expect("compares");

    assert_eq!(report.scores[0].total_score, 67);
    assert_eq!(report.scores[1].total_score, 63);
    assert_eq!(report.recommendation.best_vendor, "W");
    assert_eq!(
        report.considerations,
        vec![
            "W is priced at 20000, below the average of 35000 across all proposals.".to_string(),
            "X offers the longest warranty at 36 months.".to_string(),
        ]
    );
}

#[test]
fn malformed_offer_scores_zero_without_being_dropped() {
    let scorer = ProposalScorer::default();
    let offers = vec![
        offer("", f64::NAN, -3.0, f64::INFINITY),
        offer("Reliable", 10_000.0, 14.0, 24.0),
    ];

    let report = scorer.compare(&requirement(), &offers).expect("compares");

    assert_eq!(report.scores.len(), 2);
    let dirty = &report.scores[0];
    assert_eq!(dirty.vendor_name, UNKNOWN_VENDOR);
    assert_eq!(
        (dirty.price_score, dirty.delivery_score, dirty.warranty_score, dirty.total_score),
        (0, 0, 0, 0)
    );
    assert_eq!(report.recommendation.best_vendor, "Reliable");
    assert!(report
        .considerations
        .contains(&"Unknown Vendor has the lowest price at 0.".to_string()));
}

#[test]
fn reference_price_is_configurable() {
    let scorer = ProposalScorer::new(ScoringConfig {
        reference_price: 50_000.0,
        ..ScoringConfig::default()
    });
    let offers = vec![offer("Mid", 25_000.0, 0.0, 0.0)];

    let report = scorer
        .compare(&RequirementProfile::default(), &offers)
        .expect("compares");

    assert_eq!(report.scores[0].price_score, 50);
    assert_eq!(scorer.config().reference_price, 50_000.0);
}

#[test]
fn report_serializes_with_camel_case_fields() {
    let report = ProposalScorer::default()
        .compare(&requirement(), &example_offers())
        .expect("compares");

    let value = serde_json::to_value(&report).expect("serializes");

    assert_eq!(value["recommendation"]["bestVendor"], "A");
    assert_eq!(value["scores"][1]["vendorName"], "B");
    assert_eq!(value["scores"][1]["deliveryScore"], 70);
    assert_eq!(value["scores"][1]["totalScore"], 73);
}
