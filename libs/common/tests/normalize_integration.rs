//! Integration tests for the normalization layer
//!
//! These tests run realistic backend payloads through every normalizer the
//! way a listing page does.

use common::{
    ClientConfig, Normalizers,
    normalize::{format_sharing, reshape_menu},
};
use serde_json::{Value, json};

fn gethostels_payload() -> Value {
    json!({
        "success": true,
        "hostels": [
            {
                "hostel_id": 17,
                "hostel_name": "Sri Sai Boys PG",
                "city": "Hyderabad",
                "images": "[\"a.jpg\", \"/uploads/b.jpg\"]",
                "facilities": "{\"wifi\":true,\"food\":true,\"bathroom\":true}",
                "sharing_data": "{\"double\":\"6500\",\"single\":9000}"
            },
            {
                "id": "18",
                "name": "Green Nest",
                "images": null,
                "img": "https://cdn.hlopg.com/green.jpg",
                "facilities": {},
                "sharing_data": null
            }
        ]
    })
}

#[test]
fn test_listing_fields_normalize_end_to_end() {
    let normalizers = Normalizers::default();
    let payload = gethostels_payload();
    let hostels = payload["hostels"].as_array().expect("hostels array");

    let first = &hostels[0];
    assert_eq!(
        normalizers
            .images
            .resolve_images(&first["images"], &first["img"]),
        vec![
            "https://www.hlopg.com/uploads/a.jpg".to_string(),
            "https://www.hlopg.com/uploads/b.jpg".to_string()
        ]
    );
    let facilities: Vec<&str> = normalizers
        .facilities
        .normalize(&first["facilities"])
        .iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(facilities, vec!["WiFi", "Food"]);
    assert_eq!(
        format_sharing(&first["sharing_data"]),
        "2-Sharing - ₹6500, 1-Sharing - ₹9000"
    );

    let second = &hostels[1];
    assert_eq!(
        normalizers
            .images
            .resolve_images(&second["images"], &second["img"]),
        vec!["https://cdn.hlopg.com/green.jpg".to_string()]
    );
    assert_eq!(normalizers.facilities.normalize(&second["facilities"]).len(), 4);
    assert_eq!(
        format_sharing(&second["sharing_data"]),
        "Multiple Sharing Options"
    );
}

#[test]
fn test_normalizers_follow_configuration() {
    let config = ClientConfig {
        asset_origin: "http://localhost:5000/".to_string(),
        placeholder_image: "/static/none.png".to_string(),
        default_facilities: false,
        ..ClientConfig::default()
    };
    let normalizers = Normalizers::from_config(&config);

    assert_eq!(
        normalizers.images.resolve(Some("x.jpg")),
        "http://localhost:5000/uploads/x.jpg"
    );
    assert_eq!(normalizers.images.resolve(None), "/static/none.png");
    assert!(normalizers.facilities.normalize(&json!("{}")).is_empty());
}

#[test]
fn test_menu_payload_from_upload_form() {
    // the owner upload form stores every day with blank meals
    let menu = json!({
        "monday": {"breakfast": "Idli", "lunch": "", "dinner": ""},
        "tuesday": {"breakfast": "", "lunch": "", "dinner": ""},
        "wednesday": {"breakfast": "", "lunch": "", "dinner": ""},
        "thursday": {"breakfast": "", "lunch": "", "dinner": ""},
        "friday": {"breakfast": "", "lunch": "", "dinner": ""},
        "saturday": {"breakfast": "", "lunch": "", "dinner": ""},
        "sunday": {"breakfast": "", "lunch": "", "dinner": "Biryani"}
    });

    let rows = reshape_menu(&Value::String(menu.to_string()));
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0].breakfast, "Idli");
    assert_eq!(rows[0].lunch, "-");
    assert_eq!(rows[6].dinner, "Biryani");
    assert_eq!(rows[6].day, "Sunday");
}
