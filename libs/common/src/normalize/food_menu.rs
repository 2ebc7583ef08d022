//! Weekly food menu reshaping
//!
//! The backend has stored menus in three layouts over time:
//!
//! 1. an array of per-day records: `[{"day": "monday", "breakfast": ...}]`
//! 2. an object keyed by day: `{"monday": {"breakfast": ...}}`
//! 3. an object keyed by meal: `{"breakfast": {"monday": ...}}`
//!
//! Any of them (or a JSON string holding one) becomes a fixed Monday..Sunday
//! table.

use chrono::Weekday;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{decode_field, display_text};

/// Text used for a meal the menu does not mention
pub const NO_MEAL: &str = "-";

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MEALS: [&str; 3] = ["breakfast", "lunch", "dinner"];

/// One day of the weekly menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuRow {
    pub day: String,
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

type DayMeals = [Option<String>; 3];

/// Reshape any known menu layout into seven rows, Monday first
///
/// Returns an empty vec when no day can be recognized.
pub fn reshape_menu(raw: &Value) -> Vec<MenuRow> {
    let mut week: [Option<DayMeals>; 7] = Default::default();

    match &*decode_field(raw) {
        Value::Array(records) => fill_from_records(records, &mut week),
        Value::Object(map) if MEALS.iter().any(|meal| get_ignore_case(map, meal).is_some()) => {
            fill_from_meal_maps(map, &mut week)
        }
        Value::Object(map) => fill_from_day_map(map, &mut week),
        _ => {}
    }

    if week.iter().all(Option::is_none) {
        return Vec::new();
    }

    week.into_iter()
        .zip(DAY_NAMES)
        .map(|(meals, day)| {
            let [breakfast, lunch, dinner] = meals.unwrap_or_default();
            let or_dash = |meal: Option<String>| meal.unwrap_or_else(|| NO_MEAL.to_string());
            MenuRow {
                day: day.to_string(),
                breakfast: or_dash(breakfast),
                lunch: or_dash(lunch),
                dinner: or_dash(dinner),
            }
        })
        .collect()
}

fn parse_day(name: &str) -> Option<usize> {
    name.trim()
        .parse::<Weekday>()
        .ok()
        .map(|day| day.num_days_from_monday() as usize)
}

fn get_ignore_case<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.iter()
        .find(|(name, _)| name.trim().eq_ignore_ascii_case(key))
        .map(|(_, value)| value)
}

fn meal_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(display_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        other => display_text(other),
    }
}

fn merge(slot: &mut Option<DayMeals>, meals: DayMeals) {
    let current = slot.get_or_insert_with(Default::default);
    for (existing, incoming) in current.iter_mut().zip(meals) {
        if incoming.is_some() {
            *existing = incoming;
        }
    }
}

fn meals_of(record: &Map<String, Value>) -> DayMeals {
    MEALS.map(|meal| get_ignore_case(record, meal).and_then(meal_text))
}

fn fill_from_records(records: &[Value], week: &mut [Option<DayMeals>; 7]) {
    for (index, record) in records.iter().enumerate() {
        let decoded = decode_field(record);
        let Value::Object(record) = &*decoded else {
            continue;
        };

        let slot = get_ignore_case(record, "day")
            .and_then(Value::as_str)
            .and_then(parse_day)
            .or_else(|| (index < 7 && week[index].is_none()).then_some(index));

        if let Some(slot) = slot {
            merge(&mut week[slot], meals_of(record));
        }
    }
}

fn fill_from_day_map(map: &Map<String, Value>, week: &mut [Option<DayMeals>; 7]) {
    for (day, value) in map {
        let Some(slot) = parse_day(day) else {
            continue;
        };

        let meals = match &*decode_field(value) {
            Value::Object(record) => meals_of(record),
            _ => Default::default(),
        };
        merge(&mut week[slot], meals);
    }
}

fn fill_from_meal_maps(map: &Map<String, Value>, week: &mut [Option<DayMeals>; 7]) {
    for (meal_index, meal) in MEALS.iter().enumerate() {
        let Some(days) = get_ignore_case(map, meal) else {
            continue;
        };
        let decoded = decode_field(days);
        let Value::Object(days) = &*decoded else {
            continue;
        };

        for (day, value) in days {
            if let Some(slot) = parse_day(day) {
                let mut meals: DayMeals = Default::default();
                meals[meal_index] = meal_text(value);
                merge(&mut week[slot], meals);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(day: &str, breakfast: &str, lunch: &str, dinner: &str) -> MenuRow {
        MenuRow {
            day: day.to_string(),
            breakfast: breakfast.to_string(),
            lunch: lunch.to_string(),
            dinner: dinner.to_string(),
        }
    }

    #[test]
    fn test_records_fill_a_full_week() {
        let raw = json!([
            {"day": "Monday", "breakfast": "Idli", "lunch": "Rice"},
            {"day": "wed", "dinner": "Chapati"},
            {"day": "SUNDAY", "breakfast": "Dosa", "lunch": "Biryani", "dinner": ""}
        ]);

        let menu = reshape_menu(&raw);
        assert_eq!(menu.len(), 7);
        assert_eq!(menu[0], row("Monday", "Idli", "Rice", "-"));
        assert_eq!(menu[1], row("Tuesday", "-", "-", "-"));
        assert_eq!(menu[2], row("Wednesday", "-", "-", "Chapati"));
        assert_eq!(menu[6], row("Sunday", "Dosa", "Biryani", "-"));
    }

    #[test]
    fn test_records_without_day_use_their_position() {
        let raw = json!([{"breakfast": "Poha"}, {"breakfast": "Upma"}]);
        let menu = reshape_menu(&raw);
        assert_eq!(menu[0].breakfast, "Poha");
        assert_eq!(menu[1].breakfast, "Upma");
        assert_eq!(menu[2].breakfast, "-");
    }

    #[test]
    fn test_day_keyed_object() {
        let raw = json!({
            "tuesday": {"breakfast": "Vada", "lunch": ["Rice", "Sambar"], "dinner": "Roti"},
            "friday": "{\"lunch\":\"Pulao\"}",
            "notaday": {"breakfast": "x"}
        });

        let menu = reshape_menu(&raw);
        assert_eq!(menu.len(), 7);
        assert_eq!(menu[1], row("Tuesday", "Vada", "Rice, Sambar", "Roti"));
        assert_eq!(menu[4], row("Friday", "-", "Pulao", "-"));
    }

    #[test]
    fn test_meal_keyed_object_is_transposed() {
        let menu = reshape_menu(&json!({"breakfast": {"monday": "Idli"}}));
        assert_eq!(menu.len(), 7);
        assert_eq!(menu[0], row("Monday", "Idli", "-", "-"));
        assert!(menu[1..].iter().all(|r| r.breakfast == "-" && r.lunch == "-" && r.dinner == "-"));
    }

    #[test]
    fn test_json_string_input() {
        let menu = reshape_menu(&json!("{\"dinner\":{\"sat\":\"Paneer\"}}"));
        assert_eq!(menu[5], row("Saturday", "-", "-", "Paneer"));
    }

    #[test]
    fn test_unknown_shapes_yield_empty_menu() {
        assert!(reshape_menu(&Value::Null).is_empty());
        assert!(reshape_menu(&json!("not a menu")).is_empty());
        assert!(reshape_menu(&json!(42)).is_empty());
        assert!(reshape_menu(&json!([])).is_empty());
        assert!(reshape_menu(&json!({"foo": "bar"})).is_empty());
    }
}
