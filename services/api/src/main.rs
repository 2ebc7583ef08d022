//! HloPG CLI
//!
//! Browse hostels, manage likes and bookings, and view the owner dashboard
//! from the command line.

use anyhow::{Context, Result, bail};
use api::models::{BookingRequest, HostelImage, Listing, NewHostel};
use api::views::{CityView, HomeView, HostelView, OwnerDashboard, StarBreakdown, UserPanel};
use api::{AppState, Loadable, ViewScope};
use auth::{LoginCredentials, Role, SignupForm};
use clap::{Parser, Subcommand};
use common::ClientConfig;
use std::path::PathBuf;
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(name = "hlopg")]
#[command(about = "HloPG hostel and PG marketplace client")]
#[command(version)]
struct Args {
    /// Log level; `RUST_LOG` directives take precedence when set
    #[arg(short, long, default_value = "warn")]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List hostels, optionally for one city
    Hostels {
        #[arg(long)]
        city: Option<String>,
        /// Only hostels in this area (requires --city)
        #[arg(long)]
        area: Option<String>,
        /// Only hostels of this PG type (requires --city)
        #[arg(long)]
        pg_type: Option<String>,
    },
    /// Show one hostel
    Hostel { id: String },
    /// Show a hostel's weekly food menu
    Menu { id: String },
    /// List liked hostels
    Liked,
    /// Like or unlike a hostel
    Like { id: String },
    /// Request a booking
    Book {
        hostel_id: String,
        #[arg(long)]
        sharing: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Defaults to the cached profile
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Show booking history
    Bookings,
    /// Log in; without --role the owner login is tried first
    Login {
        identifier: String,
        password: String,
        #[arg(long)]
        role: Option<Role>,
    },
    /// Register a new user account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
    },
    /// Confirm a registration with the OTP sent by SMS
    VerifyOtp { phone: String, code: String },
    /// Log out and forget the session
    Logout,
    /// Show the logged-in profile
    Profile,
    /// Show the owner dashboard
    Dashboard,
    /// Upload a new PG (owners only)
    AddPg {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        area: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: String,
        #[arg(long)]
        pincode: String,
        #[arg(long)]
        rent: String,
        #[arg(long, default_value = "Men")]
        pg_type: String,
        #[arg(long, default_value_t = 20)]
        total_rooms: u32,
        #[arg(long, default_value_t = 0)]
        occupied_rooms: u32,
        /// Image files to attach
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let directives = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(args.log_level, directives.as_deref()))
        .init();

    let config = ClientConfig::from_env().context("Failed to load configuration")?;
    debug!("Loaded configuration: {:?}", config);

    let state = AppState::from_config(config)?;
    if !state.session.has_loaded_once().await? {
        info!("First run, initializing local storage");
        state.session.mark_loaded_once().await?;
    }

    let scope = ViewScope::new();
    run(&state, &scope, args.command).await
}

async fn run(state: &AppState, scope: &ViewScope, command: Command) -> Result<()> {
    match command {
        Command::Hostels {
            city: None,
            area,
            pg_type,
        } => {
            if area.is_some() || pg_type.is_some() {
                bail!("--area and --pg-type need --city");
            }
            let Some(home) = HomeView::load(state, scope).await else {
                return Ok(());
            };
            for city in home.featured() {
                println!("== {} ==", city.name);
                if city.listings.is_empty() {
                    println!("  No hostels found");
                }
                for listing in city.listings {
                    let liked = home.is_liked(listing.id.as_deref().unwrap_or_default());
                    print_listing(listing, liked);
                }
            }
            print_state_message(&home.hostels, "No hostels found");
        }
        Command::Hostels {
            city: Some(city),
            area,
            pg_type,
        } => {
            let city = api::views::resolve_city_search(&city)?;
            let Some(mut view) = CityView::load(state, scope, &city).await else {
                return Ok(());
            };
            if let Some(area) = area {
                view.set_area(&area);
            }
            if let Some(pg_type) = pg_type {
                view.set_pg_type(&pg_type.to_lowercase());
            }
            println!("== PGs in {} ==", view.title());
            let options = view.filter_options();
            println!("Areas: {}", options.areas.join(", "));
            println!("Types: {}", options.pg_types.join(", "));
            for listing in view.filtered() {
                print_listing(listing, false);
            }
            print_state_message(&view.listings, "No PGs found for this city");
        }
        Command::Hostel { id } => {
            let Some(view) = HostelView::load(state, scope, &id).await else {
                return Ok(());
            };
            match &view.hostel {
                Loadable::Ready(listing) => {
                    let stars = StarBreakdown::from_rating(listing.rating);
                    println!("{} ({})", listing.name, listing.gender);
                    println!("{}", listing.location);
                    println!(
                        "Rating: {}{}{} {:.1}",
                        "★".repeat(stars.full.into()),
                        if stars.half { "½" } else { "" },
                        "☆".repeat(stars.empty.into()),
                        listing.rating
                    );
                    println!("Image: {}", view.current_image());
                    if !listing.description.is_empty() {
                        println!("{}", listing.description);
                    }
                    println!("Sharing: {}", listing.sharing);
                    let facilities: Vec<_> =
                        listing.facilities.iter().map(|facility| facility.name).collect();
                    println!("Facilities: {}", facilities.join(", "));
                    if view.liked.ready().copied().unwrap_or_default() {
                        println!("♥ Liked");
                    }
                }
                Loadable::Failed(message) => bail!("{}", message),
                _ => bail!("Hostel {} not found", id),
            }
        }
        Command::Menu { id } => {
            let rows = state.menus.menu(&id).await?;
            for row in rows {
                println!(
                    "{:<10} | {} | {} | {}",
                    row.day, row.breakfast, row.lunch, row.dinner
                );
            }
        }
        Command::Liked => {
            let records = state.likes.liked_hostels().await?;
            let listings = Listing::from_records(&records, &state.normalizers);
            if listings.is_empty() {
                println!("No liked hostels yet");
            }
            for listing in &listings {
                print_listing(listing, true);
            }
        }
        Command::Like { id } => {
            if state.likes.toggle(&id).await? {
                println!("Liked hostel {}", id);
            } else {
                println!("Removed hostel {} from liked", id);
            }
        }
        Command::Book {
            hostel_id,
            sharing,
            date,
            name,
            email,
            phone,
        } => {
            let user = state.session.user().await?.unwrap_or_default();
            let request = BookingRequest {
                hostel_id,
                user_name: name.or(user.name).unwrap_or_default(),
                user_email: email.or(user.email).unwrap_or_default(),
                user_phone: phone.or(user.phone).unwrap_or_default(),
                sharing_type: sharing,
                booking_date: date,
            };
            println!("{}", state.bookings.request(&request).await?);
        }
        Command::Bookings => {
            let Some(panel) = UserPanel::load(state, scope).await? else {
                return Ok(());
            };
            println!("Hi, {}", panel.greeting);
            for booking in panel.bookings.ready().into_iter().flatten() {
                println!(
                    "{} | {} | {} | {}",
                    booking.hostel_name.as_deref().unwrap_or("Hostel"),
                    booking.sharing_type.as_deref().unwrap_or("-"),
                    booking
                        .booking_date
                        .map(|date| date.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    booking.status.as_deref().unwrap_or("Pending")
                );
            }
            print_state_message(&panel.bookings, "No bookings yet");
        }
        Command::Login {
            identifier,
            password,
            role,
        } => {
            let credentials = LoginCredentials::new(identifier, password);
            let session = match role {
                Some(role) => state.auth.login(role, &credentials).await?,
                None => state.auth.common_login(&credentials).await?,
            };
            let role = session
                .role
                .map(|role| role.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            println!("Logged in as {}", role);
        }
        Command::Register {
            name,
            email,
            phone,
            password,
        } => {
            let form = SignupForm {
                name,
                email,
                phone,
                confirm_password: password.clone(),
                password,
            };
            let phone = state.auth.register(&form).await?;
            println!("OTP sent to {}; confirm with `hlopg verify-otp`", phone);
        }
        Command::VerifyOtp { phone, code } => {
            state.auth.verify_otp(&phone, &code).await?;
            println!("Account verified, you can log in now");
        }
        Command::Logout => {
            state.auth.logout().await?;
            println!("Logged out");
        }
        Command::Profile => {
            let profile = state.auth.current_profile().await?;
            println!("Name:  {}", profile.display_name());
            println!("Email: {}", profile.email.as_deref().unwrap_or("-"));
            println!("Phone: {}", profile.phone.as_deref().unwrap_or("-"));
            println!(
                "Photo: {}",
                state
                    .normalizers
                    .images
                    .resolve(profile.profile_image.as_deref())
            );
        }
        Command::Dashboard => {
            let Some(dashboard) = OwnerDashboard::load(state, scope).await? else {
                return Ok(());
            };
            println!("Welcome back, {}", dashboard.owner_name);
            if dashboard.shows_sample() {
                println!("(showing sample data, the backend is unavailable)");
            }
            if let Some(summary) = dashboard.summary.ready() {
                println!("Total bookings: {}", summary.total_bookings);
                println!("Total revenue:  ₹{:.0}", summary.total_revenue);
                for point in &summary.chart {
                    println!(
                        "{:<4} {:<20} {}",
                        point.month,
                        "#".repeat((point.revenue_share() * 20.0).round() as usize),
                        point.bookings
                    );
                }
            }
            println!("== My PGs ==");
            for listing in dashboard.pgs.ready().into_iter().flatten() {
                print_listing(listing, false);
            }
            print_state_message(&dashboard.pgs, "No PGs listed yet");
            println!("== Recent complaints ==");
            for complaint in dashboard
                .complaints
                .ready()
                .map(|complaints| complaints.items.as_slice())
                .unwrap_or_default()
            {
                println!("{} [{}]: {}", complaint.name, complaint.status, complaint.message);
            }
        }
        Command::AddPg {
            name,
            address,
            area,
            city,
            state: region,
            pincode,
            rent,
            pg_type,
            total_rooms,
            occupied_rooms,
            images,
        } => {
            let mut attachments = Vec::with_capacity(images.len());
            for path in &images {
                let bytes = tokio::fs::read(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let file_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "image.jpg".to_string());
                attachments.push(HostelImage { file_name, bytes });
            }

            let form = NewHostel {
                hostel_name: name,
                address,
                area,
                city,
                state: region,
                pincode,
                rent,
                pg_type,
                total_rooms,
                occupied_rooms,
                images: attachments,
                ..NewHostel::default()
            };
            println!("{}", state.hostels.add_hostel(&form).await?);
        }
    }

    Ok(())
}

/// `directives` (from `RUST_LOG`) when present, else everything at `level`
fn log_filter(level: Level, directives: Option<&str>) -> EnvFilter {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::from(level).into());
    match directives.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directives) => builder.parse_lossy(directives),
        None => builder.parse_lossy(""),
    }
}

fn print_listing(listing: &Listing, liked: bool) {
    println!(
        "  {} {} [{}] {} | {} | ★ {:.1} | {}",
        if liked { "♥" } else { " " },
        listing.id.as_deref().unwrap_or("-"),
        listing.gender,
        listing.name,
        listing.location,
        listing.rating,
        listing.sharing
    );
}

fn print_state_message<T>(loadable: &Loadable<T>, empty: &str) {
    match loadable {
        Loadable::Empty => println!("{}", empty),
        Loadable::Failed(message) => println!("Could not load: {}", message),
        _ => {}
    }
}
