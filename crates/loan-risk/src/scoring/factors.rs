use super::config::ScoringConfig;
use super::features::Features;
use super::rules::{high_risk_industry, HIGH_AMOUNT_PER_EMPLOYEE, LIMITED_HISTORY_YEARS};

pub const STANDARD_ASSESSMENT_FACTOR: &str = "Standard risk assessment completed";

/// Explains the score independently of the point arithmetic.
///
/// The order below is part of the output contract: rating, new business, limited history,
/// amount per employee, industry.
pub(crate) fn explain(features: &Features, config: &ScoringConfig) -> Vec<String> {
    let mut factors = Vec::new();

    if let Some(rating) = features.rating_category.filter(|rating| rating.is_low_grade()) {
        factors.push(format!("High risk rating: {rating}"));
    }

    if features.is_new_business {
        factors.push("New business with limited track record".to_string());
    }

    if features.years_in_business < LIMITED_HISTORY_YEARS {
        factors.push("Limited business history".to_string());
    }

    if features.amount_per_employee() > HIGH_AMOUNT_PER_EMPLOYEE {
        factors.push("High amount per employee ratio".to_string());
    }

    if let Some(industry) = high_risk_industry(features, config) {
        factors.push(format!("High-risk industry: {industry}"));
    }

    if factors.is_empty() {
        factors.push(STANDARD_ASSESSMENT_FACTOR.to_string());
    }

    factors
}
