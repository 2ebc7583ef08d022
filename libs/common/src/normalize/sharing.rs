//! Occupancy plan formatting

use serde::Serialize;
use serde_json::Value;

use super::{decode_field, display_text};

/// Shown whenever no plan can be rendered
pub const SHARING_FALLBACK: &str = "Multiple Sharing Options";

/// One occupancy plan with its price
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharingPlan {
    /// Key as sent by the backend, e.g. `double`
    pub key: String,
    /// Display label, e.g. `2-Sharing`
    pub label: String,
    /// Price as display text, without currency
    pub price: String,
}

impl SharingPlan {
    pub fn display(&self) -> String {
        format!("{} - ₹{}", self.label, self.price)
    }
}

fn sharing_label(key: &str) -> String {
    let occupancy = match key {
        "single" => "1",
        "double" => "2",
        "triple" => "3",
        "four" => "4",
        "five" => "5",
        "six" => "6",
        other => other,
    };
    format!("{}-Sharing", occupancy)
}

/// Plans in the order the backend listed them; blank prices are skipped
pub fn sharing_plans(raw: &Value) -> Vec<SharingPlan> {
    match &*decode_field(raw) {
        Value::Object(entries) => entries
            .iter()
            .filter_map(|(key, price)| {
                display_text(price).map(|price| SharingPlan {
                    key: key.clone(),
                    label: sharing_label(key),
                    price,
                })
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// `"1-Sharing - ₹5000, 2-Sharing - ₹4000"`, or the fallback text
pub fn format_sharing(raw: &Value) -> String {
    let plans = sharing_plans(raw);
    if plans.is_empty() {
        return SHARING_FALLBACK.to_string();
    }

    plans
        .iter()
        .map(SharingPlan::display)
        .collect::<Vec<_>>()
        .join(", ")
}
