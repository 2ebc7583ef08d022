//! City page and the header's city search

use crate::error::{ApiError, ApiResult};
use crate::models::Listing;
use crate::scope::ViewScope;
use crate::state::AppState;

use super::Loadable;

/// Filter value that disables a filter
pub const ALL: &str = "All";

/// Cities the header search knows about
pub const SEARCH_CITIES: [&str; 4] = ["Hyderabad", "Chennai", "Bangalore", "Mumbai"];

/// Cities whose name contains the typed text, case-insensitively
pub fn suggest_cities(input: &str) -> Vec<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return Vec::new();
    }
    SEARCH_CITIES
        .iter()
        .copied()
        .filter(|city| city.to_lowercase().contains(&input))
        .collect()
}

/// Resolve a submitted search to the lowercase city slug
pub fn resolve_city_search(input: &str) -> ApiResult<String> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return Err(ApiError::BadRequest("Please enter a city name.".to_string()));
    }

    SEARCH_CITIES
        .iter()
        .find(|city| city.to_lowercase() == input)
        .map(|_| input.clone())
        .ok_or_else(|| {
            ApiError::BadRequest(format!(
                "City not found. Please select from {}.",
                SEARCH_CITIES.join(", ")
            ))
        })
}

/// Choices offered by the area and gender filters, `All` first
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    pub areas: Vec<String>,
    pub pg_types: Vec<String>,
}

/// City page view-model
#[derive(Debug, Clone, PartialEq)]
pub struct CityView {
    pub city: String,
    pub listings: Loadable<Vec<Listing>>,
    area: String,
    pg_type: String,
}

impl CityView {
    /// Fetch the city's hostels and keep those whose city matches either way
    pub async fn load(state: &AppState, scope: &ViewScope, city: &str) -> Option<Self> {
        let city = city.trim().to_string();
        let result = scope.run(state.hostels.list(Some(&city))).await?;

        let listings = Loadable::from_list(result.map(|records| {
            let in_city: Vec<_> = records
                .into_iter()
                .filter(|record| record.in_city(&city))
                .collect();
            Listing::from_records(&in_city, &state.normalizers)
        }));

        Some(Self {
            city,
            listings,
            area: ALL.to_string(),
            pg_type: ALL.to_string(),
        })
    }

    /// `hyderabad` → `Hyderabad`
    pub fn title(&self) -> String {
        let mut chars = self.city.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
            None => "City".to_string(),
        }
    }

    pub fn filter_options(&self) -> FilterOptions {
        let listings: &[Listing] = self.listings.ready().map(Vec::as_slice).unwrap_or_default();

        FilterOptions {
            areas: options(listings.iter().map(|listing| listing.area.as_str())),
            pg_types: options(listings.iter().map(|listing| listing.pg_type.as_str())),
        }
    }

    pub fn set_area(&mut self, area: &str) {
        self.area = area.to_string();
    }

    pub fn set_pg_type(&mut self, pg_type: &str) {
        self.pg_type = pg_type.to_string();
    }

    /// Listings passing both filters
    pub fn filtered(&self) -> Vec<&Listing> {
        let listings: &[Listing] = self.listings.ready().map(Vec::as_slice).unwrap_or_default();

        listings
            .iter()
            .filter(|listing| self.area == ALL || listing.area == self.area)
            .filter(|listing| self.pg_type == ALL || listing.pg_type == self.pg_type)
            .collect()
    }
}

fn options<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut options = vec![ALL.to_string()];
    for value in values.filter(|value| !value.is_empty()) {
        if !options.iter().any(|option| option == value) {
            options.push(value.to_string());
        }
    }
    options
}
