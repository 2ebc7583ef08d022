//! Owner dashboard figures and complaints

use common::lenient::{number, text};
use serde::Serialize;
use serde_json::{Map, Value};

/// Number of complaints shown on the dashboard
pub const RECENT_COMPLAINTS: usize = 3;

/// Scale of the revenue axis on the trend chart
pub const CHART_REVENUE_MAX: f64 = 150_000.0;

/// Scale of the bookings axis on the trend chart
pub const CHART_BOOKINGS_MAX: f64 = 30.0;

/// One month of the bookings and revenue trend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub month: String,
    pub bookings: i64,
    pub revenue: f64,
}

impl ChartPoint {
    fn sample(month: &str, bookings: i64, revenue: f64) -> Self {
        Self {
            month: month.to_string(),
            bookings,
            revenue,
        }
    }

    /// Bar height for revenue, 0.0 to 1.0
    pub fn revenue_share(&self) -> f64 {
        (self.revenue / CHART_REVENUE_MAX).clamp(0.0, 1.0)
    }

    /// Bar height for bookings, 0.0 to 1.0
    pub fn bookings_share(&self) -> f64 {
        (self.bookings as f64 / CHART_BOOKINGS_MAX).clamp(0.0, 1.0)
    }
}

/// Totals and monthly trend from `GET /dashboard/owner`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_bookings: i64,
    pub total_revenue: f64,
    pub chart: Vec<ChartPoint>,
    /// Set when the figures are the built-in sample, not backend data
    pub sample: bool,
}

impl DashboardSummary {
    pub fn from_value(value: &Value) -> Self {
        let empty = Map::new();
        let map = value.as_object().unwrap_or(&empty);
        let chart = map
            .get("bookingChart")
            .or_else(|| map.get("booking_chart"))
            .and_then(Value::as_array)
            .map(|points| {
                points
                    .iter()
                    .filter_map(|point| {
                        let point = point.as_object()?;
                        Some(ChartPoint {
                            month: text(point, &["month"])?,
                            bookings: number(point, &["bookings"]).unwrap_or_default() as i64,
                            revenue: number(point, &["revenue"]).unwrap_or_default(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            total_bookings: number(map, &["totalBookings", "total_bookings"]).unwrap_or_default()
                as i64,
            total_revenue: number(map, &["totalRevenue", "total_revenue"]).unwrap_or_default(),
            chart,
            sample: false,
        }
    }

    /// Figures shown while the dashboard endpoint is unavailable
    pub fn sample() -> Self {
        Self {
            total_bookings: 23,
            total_revenue: 125_000.0,
            chart: vec![
                ChartPoint::sample("Jan", 12, 85_000.0),
                ChartPoint::sample("Feb", 18, 95_000.0),
                ChartPoint::sample("Mar", 15, 105_000.0),
                ChartPoint::sample("Apr", 22, 115_000.0),
                ChartPoint::sample("May", 25, 125_000.0),
                ChartPoint::sample("Jun", 28, 135_000.0),
            ],
            sample: true,
        }
    }
}

/// A tenant complaint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Complaint {
    pub id: Option<String>,
    pub name: String,
    pub message: String,
    pub status: String,
}

impl Complaint {
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;

        Some(Self {
            id: text(map, &["id", "complaint_id"]),
            name: text(map, &["name", "user_name", "userName"])
                .unwrap_or_else(|| "Tenant".to_string()),
            message: text(map, &["message", "description"]).unwrap_or_default(),
            status: text(map, &["status"]).unwrap_or_else(|| "Pending".to_string()),
        })
    }

    fn sample(id: &str, name: &str, message: &str, status: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            name: name.to_string(),
            message: message.to_string(),
            status: status.to_string(),
        }
    }
}

/// The first few complaints from `GET /complaints/owner`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentComplaints {
    pub items: Vec<Complaint>,
    pub sample: bool,
}

impl RecentComplaints {
    pub fn from_value(data: &Value) -> Self {
        let items = data
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(Complaint::from_value)
                    .take(RECENT_COMPLAINTS)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            items,
            sample: false,
        }
    }

    pub fn sample() -> Self {
        Self {
            items: vec![
                Complaint::sample(
                    "1",
                    "Vikram Singh",
                    "Water heater not working in room 201",
                    "Pending",
                ),
                Complaint::sample(
                    "2",
                    "Neha Gupta",
                    "WiFi connectivity issues in common area",
                    "Resolved",
                ),
                Complaint::sample(
                    "3",
                    "Rajesh Nair",
                    "Cleaning schedule not followed this week",
                    "In Progress",
                ),
            ],
            sample: true,
        }
    }
}
