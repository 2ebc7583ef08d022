//! Marketplace models decoded from backend payloads

pub mod booking;
pub mod dashboard;
pub mod hostel;
pub mod upload;

pub use booking::{Booking, BookingRequest};
pub use dashboard::{ChartPoint, Complaint, DashboardSummary, RecentComplaints};
pub use hostel::{GenderLabel, HostelRecord, Listing};
pub use upload::{DayMenu, HostelImage, NewHostel};
