//! Company profile assembly from multiple provider payloads
//!
//! Each target field carries an ordered list of candidates; the first one
//! that yields a non-empty value wins. `null`, `""` and absent keys are
//! empty. Fields nobody knows are reported as `""`.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Which raw payload a candidate reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileSource {
    /// Company profile endpoint
    Profile,
    /// Basic financials endpoint
    Metric,
}

/// A key in one of the raw payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    pub source: ProfileSource,
    pub key: String,
}

impl FieldRef {
    pub fn profile(key: &str) -> Self {
        Self {
            source: ProfileSource::Profile,
            key: key.to_string(),
        }
    }

    pub fn metric(key: &str) -> Self {
        Self {
            source: ProfileSource::Metric,
            key: key.to_string(),
        }
    }

    fn lookup<'a>(&self, raw: &'a RawProfile) -> Option<&'a Value> {
        let payload = match self.source {
            ProfileSource::Profile => &raw.profile,
            ProfileSource::Metric => &raw.metric,
        };
        payload.get(&self.key).filter(|value| !is_empty(value))
    }
}

/// One way of obtaining a field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Candidate {
    /// Copy a value as reported
    Field(FieldRef),
    /// Multiply two numeric values
    Product { left: FieldRef, right: FieldRef },
}

impl Candidate {
    fn resolve(&self, raw: &RawProfile) -> Option<Value> {
        match self {
            Self::Field(field) => field.lookup(raw).cloned(),
            Self::Product { left, right } => {
                let left = left.lookup(raw)?.as_f64()?;
                let right = right.lookup(raw)?.as_f64()?;
                Number::from_f64(left * right).map(Value::Number)
            },
        }
    }
}

/// Raw provider payloads for one company
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawProfile {
    pub profile: Value,
    pub metric: Value,
}

/// Ordered candidates for every profile field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMapping {
    pub name: Vec<Candidate>,
    pub website: Vec<Candidate>,
    pub sector: Vec<Candidate>,
    pub employee_count: Vec<Candidate>,
    pub market_cap: Vec<Candidate>,
    pub total_revenue: Vec<Candidate>,
    pub trailing_eps: Vec<Candidate>,
}

impl Default for ProfileMapping {
    fn default() -> Self {
        let profile = |key| Candidate::Field(FieldRef::profile(key));
        let metric = |key| Candidate::Field(FieldRef::metric(key));

        Self {
            name: vec![profile("name")],
            website: vec![profile("weburl")],
            sector: vec![profile("finnhubIndustry"), profile("gsector"), profile("sector")],
            employee_count: vec![profile("employeeTotal")],
            market_cap: vec![metric("marketCapitalization"), profile("marketCapitalization")],
            total_revenue: vec![
                metric("revenueTTM"),
                Candidate::Product {
                    left: FieldRef::metric("revenuePerShareTTM"),
                    right: FieldRef::profile("shareOutstanding"),
                },
            ],
            trailing_eps: vec![
                metric("epsTTM"),
                metric("epsBasicExclExtraItemsTTM"),
                metric("epsInclExtraItemsTTM"),
            ],
        }
    }
}

impl ProfileMapping {
    /// Merge raw payloads into a profile
    pub fn resolve(&self, raw: &RawProfile) -> CompanyProfile {
        let first = |candidates: &[Candidate]| {
            candidates
                .iter()
                .find_map(|candidate| candidate.resolve(raw))
                .unwrap_or_else(unknown)
        };

        CompanyProfile {
            name: first(&self.name),
            website: first(&self.website),
            sector: first(&self.sector),
            employee_count: first(&self.employee_count),
            market_cap: first(&self.market_cap),
            total_revenue: first(&self.total_revenue),
            trailing_eps: first(&self.trailing_eps),
        }
    }
}

/// Basic company information
///
/// Values are strings or numbers as the provider reports them; `""` marks
/// a field no source could fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: Value,
    pub website: Value,
    pub sector: Value,
    pub employee_count: Value,
    pub market_cap: Value,
    pub total_revenue: Value,
    pub trailing_eps: Value,
}

impl CompanyProfile {
    /// Whether the company name is unknown
    pub fn is_unnamed(&self) -> bool {
        is_empty(&self.name)
    }
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: unknown(),
            website: unknown(),
            sector: unknown(),
            employee_count: unknown(),
            market_cap: unknown(),
            total_revenue: unknown(),
            trailing_eps: unknown(),
        }
    }
}

fn unknown() -> Value {
    Value::String(String::new())
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
