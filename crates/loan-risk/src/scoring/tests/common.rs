use crate::scoring::{Features, RatingCategory, RiskScorer, ScoringConfig};

pub(super) fn scorer() -> RiskScorer {
    RiskScorer::new(ScoringConfig::default())
}

/// Established business that triggers no rule besides the supplied rating.
pub(super) fn established_business(rating: Option<RatingCategory>) -> Features {
    Features {
        rating_category: rating,
        amount_requested: 250_000.0,
        years_in_business: 3.0,
        is_new_business: false,
        number_of_employees: 10,
        jobs_to_create: 0,
        industry: Some("Technology".to_string()),
    }
}

pub(super) fn prime_applicant() -> Features {
    Features {
        rating_category: Some(RatingCategory::A1),
        amount_requested: 250_000.0,
        years_in_business: 10.0,
        is_new_business: false,
        number_of_employees: 20,
        jobs_to_create: 0,
        industry: Some("Agriculture".to_string()),
    }
}

pub(super) fn distressed_applicant() -> Features {
    Features {
        rating_category: Some(RatingCategory::D),
        amount_requested: 1_500_000.0,
        years_in_business: 0.5,
        is_new_business: true,
        number_of_employees: 3,
        jobs_to_create: 0,
        industry: Some("Construction".to_string()),
    }
}
