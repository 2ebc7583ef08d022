//! Hostel records as sent by the backend, and the listing card built from them

use common::Normalizers;
use common::lenient::{integer, number, raw, text};
use common::normalize::{Facility, SharingPlan, format_sharing, sharing_plans};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

pub const UNNAMED_HOSTEL: &str = "Unnamed Hostel";
pub const UNKNOWN_AREA: &str = "Unknown Area";
pub const UNKNOWN_LOCATION: &str = "Unknown Location";
pub const DEFAULT_RATING: f64 = 4.5;

/// A hostel as the backend sent it
///
/// Every field is optional and loosely typed: different endpoints use
/// different key names and encodings. Image, facility and sharing fields are
/// kept raw for the normalizers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HostelRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub area: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub owner_id: Option<String>,
    pub owner_name: Option<String>,
    pub price: Option<f64>,
    pub rent: Option<f64>,
    pub advance_amount: Option<f64>,
    pub total_rooms: Option<i64>,
    pub occupied_rooms: Option<i64>,
    pub vacant_rooms: Option<i64>,
    pub images: Value,
    pub img: Value,
    pub facilities: Value,
    pub sharing_data: Value,
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub pg_type: Option<String>,
    pub status: Option<String>,
}

impl HostelRecord {
    /// Decode one record; only non-objects are refused
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;

        Some(Self {
            id: text(map, &["hostel_id", "id", "_id"]),
            name: text(map, &["hostel_name", "name", "hostelName"]),
            address: text(map, &["address"]),
            area: text(map, &["area"]),
            city: text(map, &["city"]),
            state: text(map, &["state"]),
            pincode: text(map, &["pincode"]),
            owner_id: text(map, &["owner_id", "ownerId"]),
            owner_name: text(map, &["owner_name", "ownerName"]),
            price: number(map, &["price"]),
            rent: number(map, &["rent"]),
            advance_amount: number(map, &["advance_amount", "advanceAmount"]),
            total_rooms: integer(map, &["total_rooms", "totalRooms"]),
            occupied_rooms: integer(map, &["occupied_rooms", "occupiedRooms"]),
            vacant_rooms: integer(map, &["vacant_rooms", "vacantRooms"]),
            images: raw(map, &["images"]),
            img: raw(map, &["img", "image"]),
            facilities: raw(map, &["facilities"]),
            sharing_data: raw(map, &["sharing_data", "sharingData"]),
            rating: number(map, &["rating"]),
            description: text(map, &["description"]),
            pg_type: text(map, &["pg_type", "pgType"]),
            status: text(map, &["status"]),
        })
    }

    /// Decode a list, dropping entries that are not objects
    pub fn list_from(value: &Value) -> Vec<Self> {
        match value {
            Value::Array(items) => items.iter().filter_map(Self::from_value).collect(),
            _ => Vec::new(),
        }
    }

    /// Case-insensitive "either contains the other" match on the city
    ///
    /// Records without a city never match.
    pub fn in_city(&self, city: &str) -> bool {
        let query = city.trim().to_lowercase();
        match self.city.as_deref().map(|c| c.trim().to_lowercase()) {
            Some(own) if !own.is_empty() && !query.is_empty() => {
                own.contains(&query) || query.contains(&own)
            }
            _ => false,
        }
    }
}

/// Audience of a PG, derived from its free-text type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GenderLabel {
    Mens,
    Womens,
    CoLiving,
}

impl GenderLabel {
    pub fn from_pg_type(pg_type: &str) -> Self {
        let pg_type = pg_type.to_lowercase();
        if pg_type.contains("women") || pg_type.contains("female") {
            GenderLabel::Womens
        } else if pg_type.contains("co") || pg_type.contains("mixed") {
            GenderLabel::CoLiving
        } else {
            GenderLabel::Mens
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GenderLabel::Mens => "Men's PG",
            GenderLabel::Womens => "Women's PG",
            GenderLabel::CoLiving => "Co-Living",
        }
    }
}

impl fmt::Display for GenderLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized listing card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub id: Option<String>,
    pub name: String,
    pub area: String,
    pub location: String,
    pub city: Option<String>,
    /// Resolved image URLs; never empty
    pub images: Vec<String>,
    pub display_image: String,
    pub rating: f64,
    pub facilities: Vec<Facility>,
    pub sharing: String,
    pub sharing_plans: Vec<SharingPlan>,
    /// Lowercased type as entered by the owner, `hostel` when absent
    pub pg_type: String,
    pub gender: GenderLabel,
    pub description: String,
    pub price: Option<f64>,
    placeholder: String,
}

impl Listing {
    pub fn from_record(record: &HostelRecord, normalizers: &Normalizers) -> Self {
        let images = normalizers
            .images
            .resolve_images(&record.images, &record.img);
        let display_image = images
            .first()
            .cloned()
            .unwrap_or_else(|| normalizers.images.placeholder().to_string());

        let pg_type = record
            .pg_type
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_else(|| "hostel".to_string());

        Self {
            id: record.id.clone(),
            name: record
                .name
                .clone()
                .unwrap_or_else(|| UNNAMED_HOSTEL.to_string()),
            area: record
                .area
                .clone()
                .unwrap_or_else(|| UNKNOWN_AREA.to_string()),
            location: record
                .area
                .as_ref()
                .or(record.city.as_ref())
                .or(record.address.as_ref())
                .cloned()
                .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
            city: record.city.clone(),
            images,
            display_image,
            rating: record
                .rating
                .filter(|rating| *rating > 0.0)
                .unwrap_or(DEFAULT_RATING),
            facilities: normalizers.facilities.normalize(&record.facilities),
            sharing: format_sharing(&record.sharing_data),
            sharing_plans: sharing_plans(&record.sharing_data),
            gender: GenderLabel::from_pg_type(&pg_type),
            pg_type,
            description: record.description.clone().unwrap_or_default(),
            price: record.price.or(record.rent),
            placeholder: normalizers.images.placeholder().to_string(),
        }
    }

    pub fn from_records(records: &[HostelRecord], normalizers: &Normalizers) -> Vec<Self> {
        records
            .iter()
            .map(|record| Self::from_record(record, normalizers))
            .collect()
    }

    /// Image at `index`, or the local fallback asset
    pub fn image_or_placeholder(&self, index: usize) -> &str {
        self.images
            .get(index)
            .map(String::as_str)
            .unwrap_or(&self.placeholder)
    }

    pub fn id_is(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }
}
