//! Amenity flags to display list

use serde::Serialize;
use serde_json::Value;

use super::{decode_field, is_truthy};

/// Most facilities shown for a single listing
pub const MAX_FACILITIES: usize = 6;

/// Icon identifier a renderer maps to a glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKey {
    Wifi,
    Parking,
    Snowflake,
    Fan,
    Bed,
    Lightbulb,
    Chair,
    Utensils,
    Shower,
    Broom,
    Tv,
    Dumbbell,
}

/// A facility ready for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Facility {
    pub name: &'static str,
    pub icon: IconKey,
}

const fn facility(name: &'static str, icon: IconKey) -> Facility {
    Facility { name, icon }
}

/// Known flag keys in display order; `clean` is an alias of `cleaning`
const CANONICAL: &[(&str, Facility)] = &[
    ("wifi", facility("WiFi", IconKey::Wifi)),
    ("parking", facility("Parking", IconKey::Parking)),
    ("ac", facility("AC", IconKey::Snowflake)),
    ("fan", facility("Fan", IconKey::Fan)),
    ("bed", facility("Bed", IconKey::Bed)),
    ("lights", facility("Lights", IconKey::Lightbulb)),
    ("cupboard", facility("Cupboard", IconKey::Chair)),
    ("food", facility("Food", IconKey::Utensils)),
    ("water", facility("24/7 Water", IconKey::Shower)),
    ("geyser", facility("Hot Water", IconKey::Shower)),
    ("cleaning", facility("Cleaning", IconKey::Broom)),
    ("clean", facility("Cleaning", IconKey::Broom)),
    ("tv", facility("TV", IconKey::Tv)),
    ("gym", facility("Gym", IconKey::Dumbbell)),
];

const PLACEHOLDER_SET: [Facility; 4] = [
    facility("Bed", IconKey::Bed),
    facility("Food", IconKey::Utensils),
    facility("Clean", IconKey::Broom),
    facility("Wash", IconKey::Shower),
];

/// What to show when a listing has no recognizable facilities
///
/// `Placeholder` invents a generic set and is therefore lossy: a listing
/// with no data looks like one with four amenities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultFacilities {
    #[default]
    Placeholder,
    None,
}

/// Turns a facilities field into at most six display entries
#[derive(Debug, Clone, Copy, Default)]
pub struct FacilityNormalizer {
    defaults: DefaultFacilities,
}

impl FacilityNormalizer {
    pub fn new(defaults: DefaultFacilities) -> Self {
        Self { defaults }
    }

    /// Normalize a native or JSON-encoded map of amenity flags
    pub fn normalize(&self, raw: &Value) -> Vec<Facility> {
        let decoded = decode_field(raw);
        let flags = match &*decoded {
            Value::Object(flags) => Some(flags),
            _ => None,
        };

        let mut list: Vec<Facility> = Vec::new();
        if let Some(flags) = flags {
            for (key, facility) in CANONICAL {
                let enabled = flags
                    .iter()
                    .any(|(name, value)| name.eq_ignore_ascii_case(key) && is_truthy(value));

                if enabled && !list.contains(facility) {
                    list.push(*facility);
                }
            }
        }
        list.truncate(MAX_FACILITIES);

        if list.is_empty() && self.defaults == DefaultFacilities::Placeholder {
            return PLACEHOLDER_SET.to_vec();
        }
        list
    }
}
