//! Owner's "upload PG" form

use common::http::MultipartBody;
use serde_json::{Map, Value, json};

use crate::error::{ApiError, ApiResult};

/// Facility flags offered by the upload form, in form order
pub const FORM_FACILITIES: [&str; 6] = ["wifi", "fan", "bed", "food", "cleaning", "bathroom"];

/// Sharing plans offered by the upload form, in form order
pub const FORM_SHARING: [&str; 4] = ["single", "double", "triple", "four"];

const WEEK: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// A picture attached to the submission
#[derive(Debug, Clone, PartialEq)]
pub struct HostelImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Breakfast, lunch and dinner for one day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayMenu {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

/// New PG submitted through `POST /hostel/addhostel`
#[derive(Debug, Clone, PartialEq)]
pub struct NewHostel {
    pub hostel_name: String,
    pub description: String,
    pub pg_type: String,
    pub address: String,
    pub area: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub rent: String,
    /// Defaults to the rent
    pub price: Option<String>,
    /// Defaults to zero
    pub advance_amount: Option<String>,
    /// Defaults to the logged-in owner
    pub owner_id: Option<String>,
    pub owner_name: Option<String>,
    pub total_rooms: u32,
    pub occupied_rooms: u32,
    /// Flags keyed by facility name; unknown names are sent as-is
    pub facilities: Vec<(String, bool)>,
    /// Price per plan; blank prices mean "not offered"
    pub sharing: Vec<(String, String)>,
    /// Monday first
    pub food_menu: [DayMenu; 7],
    pub rules: Vec<String>,
    pub images: Vec<HostelImage>,
}

impl Default for NewHostel {
    fn default() -> Self {
        Self {
            hostel_name: String::new(),
            description: String::new(),
            pg_type: "Men".to_string(),
            address: String::new(),
            area: String::new(),
            city: String::new(),
            state: String::new(),
            pincode: String::new(),
            rent: String::new(),
            price: None,
            advance_amount: None,
            owner_id: None,
            owner_name: None,
            total_rooms: 20,
            occupied_rooms: 0,
            facilities: FORM_FACILITIES
                .iter()
                .map(|name| (name.to_string(), false))
                .collect(),
            sharing: FORM_SHARING
                .iter()
                .map(|name| (name.to_string(), String::new()))
                .collect(),
            food_menu: Default::default(),
            rules: vec!["No Alcohol".to_string()],
            images: Vec::new(),
        }
    }
}

impl NewHostel {
    /// Required fields and room counts
    pub fn validate(&self) -> ApiResult<()> {
        let missing: Vec<&str> = [
            ("hostel name", &self.hostel_name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("rent", &self.rent),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(ApiError::BadRequest(format!(
                "Please fill required fields: {}",
                missing.join(", ")
            )));
        }

        if self.occupied_rooms > self.total_rooms {
            return Err(ApiError::BadRequest(
                "Occupied rooms cannot exceed total rooms".to_string(),
            ));
        }

        Ok(())
    }

    pub fn vacant_rooms(&self) -> u32 {
        self.total_rooms.saturating_sub(self.occupied_rooms)
    }

    /// Multipart form in the field layout the backend expects
    ///
    /// `owner_id` must already be resolved.
    pub fn to_multipart(&self, owner_id: &str, owner_name: &str) -> MultipartBody {
        let rent = self.rent.trim();
        let price = self
            .price
            .as_deref()
            .map(str::trim)
            .filter(|price| !price.is_empty())
            .unwrap_or(rent);
        let advance = self
            .advance_amount
            .as_deref()
            .map(str::trim)
            .filter(|advance| !advance.is_empty())
            .unwrap_or("0");

        let mut body = MultipartBody::default()
            .text("hostelName", self.hostel_name.trim())
            .text("description", self.description.trim())
            .text("pgType", self.pg_type.trim())
            .text("address", self.address.trim())
            .text("area", self.area.trim())
            .text("city", self.city.trim())
            .text("state", self.state.trim())
            .text("pincode", self.pincode.trim())
            .text("rent", rent)
            .text("price", price)
            .text("advanceAmount", advance)
            .text("ownerId", owner_id)
            .text("ownerName", owner_name)
            .text("totalRooms", self.total_rooms.to_string())
            .text("occupiedRooms", self.occupied_rooms.to_string())
            .text("vacantRooms", self.vacant_rooms().to_string())
            .text("facilities", self.facilities_json().to_string())
            .text("sharingData", self.sharing_json().to_string())
            .text("foodMenu", self.food_menu_json().to_string())
            .text("rules", self.rules_json().to_string());

        for image in &self.images {
            body = body.file("images", image.file_name.clone(), image.bytes.clone());
        }
        body
    }

    fn facilities_json(&self) -> Value {
        let flags: Map<String, Value> = self
            .facilities
            .iter()
            .map(|(name, enabled)| (name.clone(), Value::Bool(*enabled)))
            .collect();
        Value::Object(flags)
    }

    fn sharing_json(&self) -> Value {
        let plans: Map<String, Value> = self
            .sharing
            .iter()
            .map(|(plan, price)| (plan.clone(), Value::String(price.trim().to_string())))
            .collect();
        Value::Object(plans)
    }

    fn food_menu_json(&self) -> Value {
        let week: Map<String, Value> = WEEK
            .iter()
            .zip(&self.food_menu)
            .map(|(day, menu)| {
                (
                    day.to_string(),
                    json!({
                        "breakfast": menu.breakfast.trim(),
                        "lunch": menu.lunch.trim(),
                        "dinner": menu.dinner.trim(),
                    }),
                )
            })
            .collect();
        Value::Object(week)
    }

    fn rules_json(&self) -> Value {
        self.rules
            .iter()
            .map(|rule| rule.trim())
            .filter(|rule| !rule.is_empty())
            .collect()
    }
}
