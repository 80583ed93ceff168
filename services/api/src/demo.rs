use clap::Args;
use loan_risk::config::AppConfig;
use loan_risk::error::AppError;
use loan_risk::portfolio::RiskDistribution;
use loan_risk::scoring::{
    Features, RatingTablePreset, RawFeatures, RiskScorer, ScoreResult, ScoringConfig,
};
use loan_risk::simulation::{simulate, SimulationOutcome};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// JSON file with the application features. Individual flags override its values.
    #[arg(long)]
    pub(crate) features: Option<PathBuf>,
    /// SUGEF rating category (A1, A2, B1, B2, C1, C2, D)
    #[arg(long)]
    pub(crate) rating: Option<String>,
    /// Requested loan amount
    #[arg(long)]
    pub(crate) amount: Option<f64>,
    /// Years the business has been operating
    #[arg(long)]
    pub(crate) years: Option<f64>,
    /// Flag the applicant as a new business
    #[arg(long)]
    pub(crate) new_business: bool,
    /// Number of employees
    #[arg(long)]
    pub(crate) employees: Option<u32>,
    /// Jobs the loan is expected to create
    #[arg(long)]
    pub(crate) jobs: Option<u32>,
    /// Industry sector
    #[arg(long)]
    pub(crate) industry: Option<String>,
    /// Rating table preset: prediction or simulation. Defaults to APP_RATING_TABLE.
    #[arg(long)]
    pub(crate) rating_table: Option<RatingTablePreset>,
    /// Print the full result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    /// JSON file with the baseline application features
    #[arg(long)]
    pub(crate) features: PathBuf,
    /// JSON file with the adjusted features
    #[arg(long)]
    pub(crate) overrides: PathBuf,
    /// Previously stored score to measure the change against
    #[arg(long)]
    pub(crate) baseline_score: Option<u8>,
    /// Rating table preset: prediction or simulation. Defaults to APP_RATING_TABLE.
    #[arg(long)]
    pub(crate) rating_table: Option<RatingTablePreset>,
    /// Print the full outcome as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Rating table preset used for the reference applications. Defaults to APP_RATING_TABLE.
    #[arg(long)]
    pub(crate) rating_table: Option<RatingTablePreset>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let preset = resolve_rating_table(args.rating_table)?;
    let scorer = RiskScorer::new(ScoringConfig::with_preset(preset));
    let base = match &args.features {
        Some(path) => read_raw_features(path)?,
        None => RawFeatures::default(),
    };
    let features = Features::from(base.merge(flag_features(&args)?));
    let result = scorer.score(&features);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "Loan risk score ({} rating table, base {})",
        preset.label(),
        scorer.config().base_score
    );
    render_result(&result);
    Ok(())
}

pub(crate) fn run_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let preset = resolve_rating_table(args.rating_table)?;
    let scorer = RiskScorer::new(ScoringConfig::with_preset(preset));
    let baseline = read_raw_features(&args.features)?;
    let overrides = read_raw_features(&args.overrides)?;
    let outcome = simulate(&scorer, baseline, overrides, args.baseline_score);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    render_simulation(&outcome);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let preset = resolve_rating_table(args.rating_table)?;
    let scorer = RiskScorer::new(ScoringConfig::with_preset(preset));

    println!("Loan risk scoring demo ({} rating table)", preset.label());
    let mut scored = Vec::new();
    for (name, payload) in reference_applications() {
        let raw: RawFeatures = serde_json::from_value(payload)?;
        let result = scorer.score(&Features::from(raw));
        println!("\n{name}");
        render_result(&result);
        scored.push((result.risk_level, result.score));
    }

    let distribution = RiskDistribution::from_scores(scored);
    println!("\nPortfolio distribution");
    println!(
        "- {} applications | average score {:.1}",
        distribution.total, distribution.average_score
    );
    println!(
        "- {} low | {} medium | {} high",
        distribution.low_risk, distribution.medium_risk, distribution.high_risk
    );
    Ok(())
}

/// An explicit flag wins over `APP_RATING_TABLE`.
fn resolve_rating_table(flag: Option<RatingTablePreset>) -> Result<RatingTablePreset, AppError> {
    match flag {
        Some(preset) => Ok(preset),
        None => Ok(AppConfig::load()?.scoring.rating_table),
    }
}

fn read_raw_features(path: &Path) -> Result<RawFeatures, AppError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Builds raw features from the command-line flags; unset flags stay null.
fn flag_features(args: &ScoreArgs) -> Result<RawFeatures, AppError> {
    let mut fields = Map::new();
    if let Some(rating) = &args.rating {
        fields.insert("rating_category".into(), json!(rating));
    }
    if let Some(amount) = args.amount {
        fields.insert("amount_requested".into(), json!(amount));
    }
    if let Some(years) = args.years {
        fields.insert("years_in_business".into(), json!(years));
    }
    if args.new_business {
        fields.insert("is_new_business".into(), json!(true));
    }
    if let Some(employees) = args.employees {
        fields.insert("number_of_employees".into(), json!(employees));
    }
    if let Some(jobs) = args.jobs {
        fields.insert("jobs_to_create".into(), json!(jobs));
    }
    if let Some(industry) = &args.industry {
        fields.insert("industry".into(), json!(industry));
    }
    Ok(serde_json::from_value(Value::Object(fields))?)
}

fn render_result(result: &ScoreResult) {
    println!("- {}", result.summary());
    println!("  Adjustments (base {}):", result.base_score);
    for adjustment in &result.adjustments {
        println!(
            "    - {:?}: {:+} ({})",
            adjustment.rule, adjustment.points, adjustment.notes
        );
    }
    if result.raw_total() != i32::from(result.score) {
        println!("  Raw total {} clamped to {}", result.raw_total(), result.score);
    }
    println!("  Factors:");
    for factor in &result.factors {
        println!("    - {factor}");
    }
}

fn render_simulation(outcome: &SimulationOutcome) {
    println!("What-if simulation");
    println!("Baseline:");
    render_result(&outcome.baseline);
    println!("Simulated:");
    render_result(&outcome.simulated);
    println!(
        "- Score change {:+} against reference score {}",
        outcome.score_change, outcome.reference_score
    );
    if outcome.recommendation_changed() {
        println!(
            "- Recommendation moves from {} to {}",
            outcome.baseline.recommendation, outcome.simulated.recommendation
        );
    }
}

fn reference_applications() -> Vec<(&'static str, Value)> {
    vec![
        (
            "Established agricultural cooperative",
            json!({
                "rating_category": "A1",
                "amount_requested": 250000,
                "years_in_business": 10,
                "is_new_business": false,
                "number_of_employees": 20,
                "jobs_to_create": 0,
                "industry": "Agriculture",
            }),
        ),
        (
            "New construction venture",
            json!({
                "rating_category": "D",
                "amount_requested": 1500000,
                "years_in_business": 0.5,
                "is_new_business": true,
                "number_of_employees": 3,
                "jobs_to_create": 0,
                "industry": "Construction",
            }),
        ),
        (
            "Application with no rating on file",
            json!({
                "amount_requested": 0,
                "years_in_business": 0,
                "number_of_employees": 0,
                "jobs_to_create": 0,
            }),
        ),
        (
            "Growing technology firm",
            json!({
                "rating_category": "B2",
                "amount_requested": 500000,
                "years_in_business": 5,
                "is_new_business": false,
                "number_of_employees": 50,
                "jobs_to_create": 10,
                "industry": "Technology",
            }),
        ),
    ]
}
