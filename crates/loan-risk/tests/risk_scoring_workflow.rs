//! End-to-end scoring scenarios driven through the public API, starting from the loosely typed
//! payloads that the intake form and the prediction endpoint submit.

mod common {
    use loan_risk::scoring::{Features, RiskScorer, ScoringConfig};
    use serde_json::Value;

    pub(super) fn scorer() -> RiskScorer {
        RiskScorer::new(ScoringConfig::default())
    }

    pub(super) fn features(payload: Value) -> Features {
        serde_json::from_value(payload).expect("features deserialize from any object")
    }
}

mod scenarios {
    use super::common::*;
    use loan_risk::scoring::{
        RatingTablePreset, Recommendation, RiskLevel, RiskScorer, ScoringConfig,
        STANDARD_ASSESSMENT_FACTOR,
    };
    use serde_json::json;

    #[test]
    fn established_prime_borrower_is_approved() {
        let result = scorer().score(&features(json!({
            "rating_category": "A1",
            "amount_requested": 250000,
            "years_in_business": 10,
            "is_new_business": false,
            "number_of_employees": 20,
            "jobs_to_create": 0,
            "industry": "Agriculture",
        })));

        assert_eq!(result.score, 100);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.recommendation, Recommendation::Approve);
        assert_eq!(result.factors, vec![STANDARD_ASSESSMENT_FACTOR.to_string()]);
    }

    #[test]
    fn new_construction_business_with_d_rating_is_denied() {
        let result = scorer().score(&features(json!({
            "rating_category": "D",
            "amount_requested": 1500000,
            "years_in_business": 0.5,
            "is_new_business": true,
            "number_of_employees": 3,
            "jobs_to_create": 0,
            "industry": "Construction",
        })));

        assert_eq!(result.score, 5);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.recommendation, Recommendation::Deny);
        assert_eq!(
            result.factors,
            vec![
                "High risk rating: D",
                "New business with limited track record",
                "Limited business history",
                "High amount per employee ratio",
                "High-risk industry: Construction",
            ]
        );
    }

    #[test]
    fn empty_application_needs_review() {
        let result = scorer().score(&features(json!({
            "rating_category": null,
            "amount_requested": 0,
            "years_in_business": 0,
            "number_of_employees": 0,
            "jobs_to_create": 0,
        })));

        assert_eq!(result.score, 65);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.recommendation, Recommendation::Review);
    }

    #[test]
    fn half_million_boundary_is_approved_under_both_tables() {
        let payload = features(json!({
            "rating_category": "B2",
            "amount_requested": 500000,
            "years_in_business": 5,
            "number_of_employees": 50,
            "jobs_to_create": 10,
            "industry": "Technology",
        }));

        let prediction = scorer().score(&payload);
        let simulation =
            RiskScorer::new(ScoringConfig::with_preset(RatingTablePreset::Simulation))
                .score(&payload);

        assert_eq!(prediction.score, 90);
        assert_eq!(simulation.score, 85);
        for result in [prediction, simulation] {
            assert_eq!(result.risk_level, RiskLevel::Low);
            assert_eq!(result.recommendation, Recommendation::Approve);
        }
    }
}

mod simulation {
    use super::common::*;
    use loan_risk::scoring::{RawFeatures, Recommendation};
    use loan_risk::simulation::simulate;
    use serde_json::json;

    #[test]
    fn playground_adjustments_can_flip_the_recommendation() {
        let baseline: RawFeatures = serde_json::from_value(json!({
            "SUGEF": "C1",
            "AmountRequested": 450000,
            "years_in_business": 1.5,
            "NoEmp": 5,
            "CreateJob": 2,
            "NewBusiness": 0,
        }))
        .expect("raw features");
        let overrides: RawFeatures = serde_json::from_value(json!({
            "SUGEF": "A2",
            "years_in_business": 6,
            "NoEmp": 15,
        }))
        .expect("raw features");

        let outcome = simulate(&scorer(), baseline, overrides, None);

        // 70 - 10 (C1) - 5 (90k per employee) = 55
        assert_eq!(outcome.baseline.score, 55);
        assert_eq!(outcome.baseline.recommendation, Recommendation::Deny);
        // 70 + 15 (A2) + 10 (tenure) = 95
        assert_eq!(outcome.simulated.score, 95);
        assert_eq!(outcome.simulated.recommendation, Recommendation::Approve);
        assert_eq!(outcome.score_change, 40);
        assert!(outcome.recommendation_changed());
        assert_eq!(outcome.simulated_features.number_of_employees, 15);
    }

    #[test]
    fn scoring_is_shared_with_direct_calls() {
        let payload = json!({ "SUGEF": "B1", "AmountRequested": 80000, "NoEmp": 2 });
        let direct = scorer().score(&features(payload.clone()));

        let outcome = simulate(
            &scorer(),
            serde_json::from_value(payload).expect("raw features"),
            RawFeatures::default(),
            None,
        );

        assert_eq!(outcome.simulated, direct);
    }
}
