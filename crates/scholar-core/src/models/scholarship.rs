use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Scholarship listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scholarship {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub last_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_renewable: Option<bool>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
