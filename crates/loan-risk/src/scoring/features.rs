use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// SUGEF creditworthiness grade, best (A1) to worst (D).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RatingCategory {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
    D,
}

impl RatingCategory {
    pub const ALL: [RatingCategory; 7] = [
        RatingCategory::A1,
        RatingCategory::A2,
        RatingCategory::B1,
        RatingCategory::B2,
        RatingCategory::C1,
        RatingCategory::C2,
        RatingCategory::D,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RatingCategory::A1 => "A1",
            RatingCategory::A2 => "A2",
            RatingCategory::B1 => "B1",
            RatingCategory::B2 => "B2",
            RatingCategory::C1 => "C1",
            RatingCategory::C2 => "C2",
            RatingCategory::D => "D",
        }
    }

    /// Grades that are called out as a risk factor on their own.
    pub fn is_low_grade(self) -> bool {
        matches!(
            self,
            RatingCategory::C1 | RatingCategory::C2 | RatingCategory::D
        )
    }
}

impl fmt::Display for RatingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRating(pub String);

impl fmt::Display for UnknownRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown rating category '{}'", self.0)
    }
}

impl std::error::Error for UnknownRating {}

impl FromStr for RatingCategory {
    type Err = UnknownRating;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_uppercase();
        RatingCategory::ALL
            .into_iter()
            .find(|rating| rating.label() == normalized)
            .ok_or_else(|| UnknownRating(raw.to_string()))
    }
}

/// Strongly typed scoring inputs. Every field is already coerced to a safe value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawFeatures")]
pub struct Features {
    pub rating_category: Option<RatingCategory>,
    pub amount_requested: f64,
    pub years_in_business: f64,
    pub is_new_business: bool,
    pub number_of_employees: u32,
    pub jobs_to_create: u32,
    pub industry: Option<String>,
}

impl Features {
    /// Headcount used as a divisor; zero employees count as one.
    pub fn employee_divisor(&self) -> u32 {
        self.number_of_employees.max(1)
    }

    pub fn amount_per_employee(&self) -> f64 {
        self.amount_requested / f64::from(self.employee_divisor())
    }

    pub fn years_per_employee(&self) -> f64 {
        self.years_in_business / f64::from(self.employee_divisor())
    }
}

/// Loosely typed payload as submitted by forms and API clients.
///
/// Field values are kept as raw JSON so that nothing is interpreted until the single
/// conversion into [`Features`]. Legacy field names from the intake form are accepted
/// next to the canonical ones; the first non-null spelling wins.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct RawFeatures {
    pub rating_category: Option<Value>,
    pub amount_requested: Option<Value>,
    pub years_in_business: Option<Value>,
    pub is_new_business: Option<Value>,
    pub number_of_employees: Option<Value>,
    pub jobs_to_create: Option<Value>,
    pub industry: Option<Value>,
}

const RATING_NAMES: &[&str] = &["rating_category", "sugef_rating", "SUGEF", "sugef"];
const AMOUNT_NAMES: &[&str] = &["amount_requested", "AmountRequested"];
const YEARS_NAMES: &[&str] = &["years_in_business", "YearsInBusiness"];
const NEW_BUSINESS_NAMES: &[&str] = &["is_new_business", "new_business", "NewBusiness"];
const EMPLOYEE_NAMES: &[&str] = &["number_of_employees", "NoEmp"];
const JOBS_NAMES: &[&str] = &["jobs_to_create", "CreateJob"];
const INDUSTRY_NAMES: &[&str] = &["industry", "Industry"];

impl From<Map<String, Value>> for RawFeatures {
    fn from(mut fields: Map<String, Value>) -> Self {
        let mut take = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| fields.remove(*name))
                .find(|value| !value.is_null())
        };

        RawFeatures {
            rating_category: take(RATING_NAMES),
            amount_requested: take(AMOUNT_NAMES),
            years_in_business: take(YEARS_NAMES),
            is_new_business: take(NEW_BUSINESS_NAMES),
            number_of_employees: take(EMPLOYEE_NAMES),
            jobs_to_create: take(JOBS_NAMES),
            industry: take(INDUSTRY_NAMES),
        }
    }
}

impl RawFeatures {
    /// Replace every baseline field for which `overrides` carries a non-null value.
    pub fn merge(self, overrides: RawFeatures) -> RawFeatures {
        fn pick(base: Option<Value>, over: Option<Value>) -> Option<Value> {
            match over {
                Some(Value::Null) | None => base,
                Some(value) => Some(value),
            }
        }

        RawFeatures {
            rating_category: pick(self.rating_category, overrides.rating_category),
            amount_requested: pick(self.amount_requested, overrides.amount_requested),
            years_in_business: pick(self.years_in_business, overrides.years_in_business),
            is_new_business: pick(self.is_new_business, overrides.is_new_business),
            number_of_employees: pick(self.number_of_employees, overrides.number_of_employees),
            jobs_to_create: pick(self.jobs_to_create, overrides.jobs_to_create),
            industry: pick(self.industry, overrides.industry),
        }
    }
}

impl From<RawFeatures> for Features {
    fn from(raw: RawFeatures) -> Self {
        Features {
            rating_category: raw.rating_category.as_ref().and_then(coerce_rating),
            amount_requested: raw.amount_requested.as_ref().map_or(0.0, coerce_decimal),
            years_in_business: raw.years_in_business.as_ref().map_or(0.0, coerce_decimal),
            is_new_business: raw.is_new_business.as_ref().is_some_and(coerce_flag),
            number_of_employees: raw.number_of_employees.as_ref().map_or(0, coerce_count),
            jobs_to_create: raw.jobs_to_create.as_ref().map_or(0, coerce_count),
            industry: raw.industry.as_ref().and_then(coerce_text),
        }
    }
}

impl From<&Features> for RawFeatures {
    fn from(features: &Features) -> Self {
        RawFeatures {
            rating_category: features
                .rating_category
                .map(|rating| Value::String(rating.label().to_string())),
            amount_requested: Some(Value::from(features.amount_requested)),
            years_in_business: Some(Value::from(features.years_in_business)),
            is_new_business: Some(Value::Bool(features.is_new_business)),
            number_of_employees: Some(Value::from(features.number_of_employees)),
            jobs_to_create: Some(Value::from(features.jobs_to_create)),
            industry: features.industry.clone().map(Value::String),
        }
    }
}

fn coerce_rating(value: &Value) -> Option<RatingCategory> {
    value.as_str().and_then(|raw| raw.parse().ok())
}

/// Non-negative finite decimal, or 0.
pub(crate) fn coerce_decimal(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(number) if number.is_finite() && number > 0.0 => number,
        _ => 0.0,
    }
}

/// Truncates toward zero and saturates at `u32::MAX`.
pub(crate) fn coerce_count(value: &Value) -> u32 {
    coerce_decimal(value).trunc() as u32
}

pub(crate) fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(raw) => matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "y"
        ),
        _ => false,
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
