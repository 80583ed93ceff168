use super::config::ScoringConfig;
use super::features::Features;
use super::{ScoreAdjustment, ScoreRule};

const LARGE_LOAN: f64 = 1_000_000.0;
const MEDIUM_LOAN: f64 = 500_000.0;
const SMALL_LOAN: f64 = 100_000.0;
pub(crate) const HIGH_AMOUNT_PER_EMPLOYEE: f64 = 100_000.0;
const ELEVATED_AMOUNT_PER_EMPLOYEE: f64 = 50_000.0;
pub(crate) const LIMITED_HISTORY_YEARS: f64 = 2.0;

/// Applies every additive rule and returns the adjustments with the unclamped total.
pub(crate) fn score_features(
    features: &Features,
    config: &ScoringConfig,
) -> (Vec<ScoreAdjustment>, i32) {
    let mut adjustments = Vec::new();
    let mut total = i32::from(config.base_score);

    let mut apply = |rule: ScoreRule, points: i16, notes: String| {
        if points != 0 {
            total += i32::from(points);
            adjustments.push(ScoreAdjustment {
                rule,
                points,
                notes,
            });
        }
    };

    if let Some(rating) = features.rating_category {
        apply(
            ScoreRule::Rating,
            config.rating_table.delta(rating),
            format!("rating {rating}"),
        );
    }

    let amount = features.amount_requested;
    let amount_points = if amount > LARGE_LOAN {
        -10
    } else if amount > MEDIUM_LOAN {
        -5
    } else if amount < SMALL_LOAN {
        5
    } else {
        0
    };
    apply(
        ScoreRule::AmountRequested,
        amount_points,
        format!("requested amount {amount:.2}"),
    );

    let years = features.years_in_business;
    let tenure_points = if years >= 5.0 {
        10
    } else if years >= LIMITED_HISTORY_YEARS {
        5
    } else if years < 1.0 {
        -10
    } else {
        0
    };
    apply(
        ScoreRule::BusinessAge,
        tenure_points,
        format!("{years} year(s) in business"),
    );

    if features.is_new_business {
        apply(
            ScoreRule::NewBusiness,
            -5,
            "new business penalty".to_string(),
        );
    }

    let per_employee = features.amount_per_employee();
    let ratio_points = if per_employee > HIGH_AMOUNT_PER_EMPLOYEE {
        -10
    } else if per_employee > ELEVATED_AMOUNT_PER_EMPLOYEE {
        -5
    } else {
        0
    };
    apply(
        ScoreRule::AmountPerEmployee,
        ratio_points,
        format!(
            "{per_employee:.2} requested per employee across {}",
            features.employee_divisor()
        ),
    );

    let jobs = features.jobs_to_create;
    let jobs_points = if jobs >= 10 {
        5
    } else if jobs >= 5 {
        3
    } else {
        0
    };
    apply(
        ScoreRule::JobCreation,
        jobs_points,
        format!("{jobs} job(s) to be created"),
    );

    if let Some(industry) = high_risk_industry(features, config) {
        apply(
            ScoreRule::Industry,
            -5,
            format!("{industry} is a high-risk industry"),
        );
    }

    (adjustments, total)
}

pub(crate) fn high_risk_industry<'a>(
    features: &'a Features,
    config: &ScoringConfig,
) -> Option<&'a str> {
    features
        .industry
        .as_deref()
        .filter(|industry| config.is_high_risk_industry(industry))
}
