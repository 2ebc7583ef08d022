//! End-to-end run against an in-process axum backend
//!
//! Exercises the real reqwest transport and the file-backed session store.

use api::views::{CityView, HostelView, UserPanel};
use api::{AppState, Loadable, ViewScope};
use auth::{LoginCredentials, Role};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use common::{ClientConfig, FileStorage, ReqwestHttpClient};
use serde_json::{Value, json};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

const TOKEN: &str = "fake-token";

#[derive(Clone, Default)]
struct Backend {
    liked: Arc<Mutex<BTreeSet<i64>>>,
}

fn hostels() -> Vec<Value> {
    vec![
        json!({
            "hostel_id": 1,
            "hostel_name": "Sai Residency",
            "area": "Madhapur",
            "city": "Hyderabad",
            "pg_type": "Men",
            "images": "[\"sai.jpg\", \"/uploads/sai-2.jpg\"]",
            "sharing_data": "{\"single\": 9000, \"double\": 6500}",
            "facilities": {"wifi": true, "food": 1},
            "rating": 4.2
        }),
        json!({
            "hostel_id": 2,
            "hostel_name": "Lakshmi Ladies PG",
            "area": "Kondapur",
            "city": "Hyderabad",
            "pg_type": "Women"
        }),
        json!({"hostel_id": 3, "hostel_name": "Marina Stay", "city": "Chennai"}),
    ]
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some(format!("Bearer {TOKEN}").as_str())
}

async fn list_hostels(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let hostels: Vec<Value> = match query.get("city") {
        Some(city) => hostels()
            .into_iter()
            .filter(|hostel| {
                hostel["city"]
                    .as_str()
                    .is_some_and(|name| name.eq_ignore_ascii_case(city))
            })
            .collect(),
        None => hostels(),
    };
    Json(json!({"success": true, "hostels": hostels}))
}

async fn find_hostel(Path(id): Path<i64>) -> (StatusCode, Json<Value>) {
    match hostels().into_iter().find(|hostel| hostel["hostel_id"] == id) {
        Some(hostel) => (StatusCode::OK, Json(json!({"success": true, "data": hostel}))),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": "Hostel not found"})),
        ),
    }
}

async fn food_menu(Path(_id): Path<i64>) -> Json<Value> {
    Json(json!({"success": true, "data": {
        "breakfast": {"monday": "Idli", "tuesday": "Dosa"},
        "dinner": {"monday": "Chapati"}
    }}))
}

async fn login(Path(role): Path<String>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if role != "user" || body["password"] != "secret1" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid credentials"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"success": true, "data": {
            "token": TOKEN,
            "user": {
                "id": 9,
                "name": "Asha Rao",
                "email": "asha@hlopg.com",
                "phone": "9876543210"
            }
        }})),
    )
}

async fn liked_hostels(
    State(backend): State<Backend>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"success": false})));
    }
    let liked = backend.liked.lock().unwrap().clone();
    let data: Vec<Value> = hostels()
        .into_iter()
        .filter(|hostel| {
            hostel["hostel_id"]
                .as_i64()
                .is_some_and(|id| liked.contains(&id))
        })
        .collect();
    (StatusCode::OK, Json(json!({"success": true, "data": data})))
}

async fn like_hostel(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let Some(id) = body["hostel_id"].as_i64().filter(|_| authorized(&headers)) else {
        return (StatusCode::BAD_REQUEST, Json(json!({"success": false})));
    };
    let mut liked = backend.liked.lock().unwrap();
    let now_liked = liked.insert(id) || !liked.remove(&id);
    (StatusCode::OK, Json(json!({"success": true, "liked": now_liked})))
}

async fn book(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let phone_ok = body["user_phone"].as_str().map(str::len) == Some(10);
    if !authorized(&headers) || !phone_ok || !body["hostel_id"].is_i64() {
        return (StatusCode::BAD_REQUEST, Json(json!({"success": false})));
    }
    (
        StatusCode::OK,
        Json(json!({"success": true, "message": "Booking request received"})),
    )
}

async fn my_bookings(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"success": false})));
    }
    (
        StatusCode::OK,
        Json(json!({"success": true, "data": [{
            "booking_id": 41,
            "hostel_id": 1,
            "hostel_name": "Sai Residency",
            "sharing_type": "double",
            "booking_date": "2026-11-01",
            "status": "Pending"
        }]})),
    )
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/hostel/gethostels", get(list_hostels))
        .route("/api/hostel/liked-hostels", get(liked_hostels))
        .route("/api/hostel/like-hostel", post(like_hostel))
        .route("/api/hostel/food_menu/:id", get(food_menu))
        .route("/api/hostel/:id", get(find_hostel))
        .route("/api/auth/login/:role", post(login))
        .route("/api/booking/request", post(book))
        .route("/api/booking/my-bookings", get(my_bookings))
        .with_state(Backend::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/api")
}

fn client(base_url: &str, dir: &TempDir) -> AppState {
    let config = ClientConfig {
        api_base_url: base_url.to_string(),
        retry_delay_ms: 0,
        storage_path: dir.path().join("storage.json").display().to_string(),
        ..ClientConfig::default()
    };
    let http = ReqwestHttpClient::new(Duration::from_secs(5)).unwrap();
    let storage = FileStorage::new(&config.storage_path);
    AppState::new(config, Arc::new(http), Arc::new(storage))
}

#[tokio::test]
async fn browse_like_and_book_against_the_backend() {
    let base_url = spawn_backend().await;
    let dir = TempDir::new().unwrap();
    let state = client(&base_url, &dir);
    let scope = ViewScope::new();

    // logged out: the city page still renders
    let mut city = CityView::load(&state, &scope, "hyderabad").await.unwrap();
    assert_eq!(city.title(), "Hyderabad");
    assert_eq!(city.filter_options().areas, vec!["All", "Madhapur", "Kondapur"]);
    city.set_pg_type("women");
    assert_eq!(city.filtered()[0].name, "Lakshmi Ladies PG");

    assert!(state.likes.toggle("1").await.unwrap_err().is_login_required());

    let session = state
        .auth
        .common_login(&LoginCredentials::new("asha@hlopg.com", "secret1"))
        .await
        .unwrap();
    assert_eq!(session.role, Some(Role::User));

    let mut hostel = HostelView::load(&state, &scope, "1").await.unwrap();
    let listing = hostel.hostel.ready().unwrap();
    assert_eq!(listing.images.len(), 2);
    assert!(listing.images[1].ends_with("/uploads/sai-2.jpg"));
    assert_eq!(hostel.sharing_options().len(), 2);
    assert_eq!(hostel.menu.ready().unwrap().len(), 7);
    assert_eq!(hostel.liked, Loadable::Ready(false));

    hostel.carousel.next();
    assert_eq!(hostel.current_image(), hostel.hostel.ready().unwrap().images[1]);

    assert!(hostel.toggle_like(&state).await.unwrap());
    assert_eq!(hostel.liked, Loadable::Ready(true));

    let mut request = hostel.booking_form(&state).await.unwrap();
    assert_eq!(request.user_phone, "9876543210");
    request.booking_date = "2026-11-01".to_string();
    assert_eq!(
        hostel.book(&state, &request).await.unwrap(),
        "Booking request received"
    );

    let panel = UserPanel::load(&state, &scope).await.unwrap().unwrap();
    assert_eq!(panel.greeting, "Asha Rao");
    assert_eq!(panel.liked.ready().unwrap()[0].name, "Sai Residency");
    assert_eq!(panel.bookings.ready().unwrap().len(), 1);

    // the session survives a restart
    let restarted = client(&base_url, &dir);
    assert!(restarted.session.is_logged_in().await.unwrap());
    assert_eq!(restarted.likes.cached_ids().await.unwrap(), vec!["1".to_string()]);

    restarted.auth.logout().await.unwrap();
    assert!(!restarted.session.is_logged_in().await.unwrap());
}

#[tokio::test]
async fn unknown_hostel_renders_as_empty() {
    let base_url = spawn_backend().await;
    let dir = TempDir::new().unwrap();
    let state = client(&base_url, &dir);

    let view = HostelView::load(&state, &ViewScope::new(), "99").await.unwrap();

    assert!(matches!(view.hostel, Loadable::Failed(_) | Loadable::Empty));
    assert_eq!(view.current_image(), "/assets/pg1.jpg");
}
