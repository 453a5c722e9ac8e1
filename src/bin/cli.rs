//! campus-sync CLI
//!
//! The sidebar of the original portal becomes subcommands here: bus stop
//! lookup, campus navigation, the peer exchange marketplace and the
//! timetable scheduler, all sharing one storage directory.

use std::path::{Path, PathBuf};

use campus_sync::{
    error::{AppError, Result},
    market::{self, MarketRepo},
    models::{Assignment, Config, ListingKind, NewListing, ScheduleEvent},
    schedule::{FinalizeOutcome, Scheduler, scan_schedule_text},
    services::{Geocoder, Navigator, RouteSource, Router, StopFinder},
    storage::{LocalScheduleStore, uploads},
    utils::http,
};
use clap::{Parser, Subcommand};

/// campus-sync - Campus Life Toolkit
#[derive(Parser, Debug)]
#[command(name = "campus-sync", version, about = "Integrated campus life toolkit")]
struct Cli {
    /// Path to storage directory containing config and data files
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the nearest bus stop to a free-text location
    NearestStop {
        /// Location to search from (e.g., "Vanagaram")
        location: String,

        /// Path to the stops CSV (default: {storage_dir}/bus_routes.csv)
        #[arg(long)]
        stops: Option<PathBuf>,
    },

    /// Walking route between two campus landmarks
    Route {
        /// Starting landmark
        #[arg(long, default_value = "Hut Cafe")]
        from: String,

        /// Destination landmark
        #[arg(long, default_value = "Library Block")]
        to: String,
    },

    /// Peer exchange marketplace
    Market {
        #[command(subcommand)]
        command: MarketCommand,
    },

    /// Timetable scheduler
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommand,
    },

    /// Validate configuration files
    Validate,

    /// Show storage overview and upcoming events
    Info,
}

#[derive(Subcommand, Debug)]
enum MarketCommand {
    /// Create an account
    Register { username: String, password: String },

    /// Check credentials
    Login { username: String, password: String },

    /// Create a new listing
    Add {
        /// Listing owner (your username)
        #[arg(long)]
        user: String,

        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long)]
        price: f64,

        #[arg(long, default_value = "")]
        contact: String,

        /// Listing category: item, skill or service
        #[arg(long, default_value = "item")]
        kind: ListingKind,

        /// Image file to copy into the uploads directory
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Show listings, optionally filtered by category
    List {
        #[arg(long)]
        kind: Option<ListingKind>,
    },

    /// Request to rent/book a listing
    Request {
        #[arg(long)]
        id: i64,

        /// Requesting user
        #[arg(long)]
        user: String,

        /// Borrow/start date (e.g., 2025-03-01)
        #[arg(long)]
        from: String,

        /// Return/end date
        #[arg(long)]
        to: String,
    },

    /// Approve a pending request on a listing you own
    Approve {
        #[arg(long)]
        id: i64,

        /// Acting user (must be the listing owner)
        #[arg(long)]
        user: String,
    },

    /// Show pending requests on your listings
    Pending {
        #[arg(long)]
        user: String,
    },
}

#[derive(Subcommand, Debug)]
enum ScheduleCommand {
    /// Show events and assignments for a date
    Show { date: String },

    /// Add an event to a date
    AddEvent {
        date: String,

        #[arg(long)]
        name: String,

        /// Start time (e.g., "10:00 AM")
        #[arg(long)]
        start: String,

        /// End time (e.g., "12:00 PM")
        #[arg(long)]
        end: String,
    },

    /// Delete an event by name
    DeleteEvent {
        date: String,

        #[arg(long)]
        name: String,
    },

    /// Add an assignment to a date
    AddAssignment {
        date: String,

        #[arg(long)]
        name: String,

        /// Due date (e.g., 2025-03-10)
        #[arg(long)]
        due: String,

        #[arg(long, default_value = "")]
        staff: String,
    },

    /// Delete an assignment by name
    DeleteAssignment {
        date: String,

        #[arg(long)]
        name: String,
    },

    /// Lock a date against further edits (requires a clean conflict check)
    Finalize { date: String },

    /// Delete the full schedule for a date
    Delete { date: String },

    /// Scan extracted timetable text for events and conflicts
    Scan {
        /// Text file with extracted timetable lines
        #[arg(long)]
        file: PathBuf,
    },

    /// Show up to five upcoming events
    Upcoming,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("campus-sync starting...");

    // Load configuration
    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);

    match cli.command {
        Command::NearestStop { location, stops } => {
            let stops_path = stops.unwrap_or(cli.storage_dir.join("bus_routes.csv"));
            let finder = StopFinder::load(&stops_path)?;

            let client = http::create_client(&config.http)?;
            let geocoder = Geocoder::new(client, &config.geocoder.base_url);

            let Some(user) = geocoder.resolve(&location).await? else {
                log::warn!("Could not find the location '{location}'. Please try another place.");
                return Ok(());
            };

            match finder.nearest(user) {
                Some(stop) => {
                    log::info!("Nearest bus stop: {}", stop.name);
                    log::info!("On route: {}", stop.route);
                    log::info!("Distance: {:.2} km away", stop.distance_km);
                }
                None => log::warn!("No bus stops found. Please try another location."),
            }
        }

        Command::Route { from, to } => {
            let client = http::create_client(&config.http)?;
            let router = Router::new(
                client,
                &config.router.base_url,
                config.router.timeout_secs,
                config.router.walking_speed_mps,
            );
            let navigator = Navigator::new(&config, router);

            let summary = navigator.navigate(&from, &to).await?;
            log::info!("{} -> {}", summary.from, summary.to);
            log::info!("Distance: {:.0} m", summary.plan.distance_m);
            log::info!("Walking time: {} min", summary.plan.walking_minutes());
            log::info!(
                "Direction: {} ({:.0}°)",
                summary.direction,
                summary.bearing_deg
            );

            if summary.plan.source == RouteSource::StraightLine {
                log::warn!("Routing service unavailable; showing straight-line estimate");
            }

            if summary.plan.steps.is_empty() {
                log::info!("{}", summary.straight_line_instruction());
            } else {
                for (i, step) in summary.plan.steps.iter().take(5).enumerate() {
                    log::info!(
                        "Step {}: {} - continue for {:.0} m",
                        i + 1,
                        step.instruction,
                        step.distance_m
                    );
                }
            }

            if let Some(note) = summary.proximity_note() {
                log::info!("{note}");
            }
        }

        Command::Market { command } => {
            let pool = market::connect(cli.storage_dir.join(market::DB_FILE)).await?;
            let repo = MarketRepo::new(pool);
            run_market(command, &repo, &cli.storage_dir).await?;
        }

        Command::Schedule { command } => {
            let store = LocalScheduleStore::new(&cli.storage_dir);
            let mut scheduler = Scheduler::open(store).await?;
            run_schedule(command, &mut scheduler).await?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({} landmarks defined)", config.landmarks.len());

            log::info!("All validations passed!");
        }

        Command::Info => {
            log::info!("Storage directory: {}", cli.storage_dir.display());

            let store = LocalScheduleStore::new(&cli.storage_dir);
            let scheduler = Scheduler::open(store).await?;
            let data = scheduler.data();
            log::info!(
                "Schedule: {} dates with events, {} with assignments, {} finalized",
                data.events.len(),
                data.assignments.len(),
                data.finalized_dates.len()
            );

            let db_path = cli.storage_dir.join(market::DB_FILE);
            if db_path.exists() {
                let pool = market::connect(&db_path).await?;
                let repo = MarketRepo::new(pool);
                log::info!("Listings for exchange: {}", repo.count_listings().await?);
            } else {
                log::info!("No marketplace database found yet.");
            }

            let today = chrono::Local::now().format("%Y-%m-%d").to_string();
            let upcoming = scheduler.upcoming_events(&today, 5);
            if upcoming.is_empty() {
                log::info!("No upcoming events scheduled.");
            } else {
                for event in upcoming {
                    log::info!(
                        "{}: {} ({} - {})",
                        event.date,
                        event.name,
                        event.start_time,
                        event.end_time
                    );
                }
            }
        }
    }

    log::info!("Done!");

    Ok(())
}

async fn run_market(command: MarketCommand, repo: &MarketRepo, storage_dir: &Path) -> Result<()> {
    match command {
        MarketCommand::Register { username, password } => {
            if repo.register(&username, &password).await? {
                log::info!("Account created! You can now log in.");
            } else {
                log::error!("Username already exists.");
            }
        }

        MarketCommand::Login { username, password } => {
            if repo.authenticate(&username, &password).await? {
                log::info!("Welcome, {username}!");
            } else {
                log::error!("Invalid credentials.");
            }
        }

        MarketCommand::Add {
            user,
            name,
            description,
            price,
            contact,
            kind,
            image,
        } => {
            let image_path = match image {
                Some(path) => Some(
                    uploads::store_image(storage_dir, &path)
                        .await?
                        .to_string_lossy()
                        .into_owned(),
                ),
                None => None,
            };

            let id = repo
                .add_listing(&NewListing {
                    owner: user,
                    name: name.clone(),
                    description,
                    price,
                    image_path,
                    contact,
                    kind,
                })
                .await?;
            log::info!("'{name}' added successfully (id {id})");
        }

        MarketCommand::List { kind } => {
            let listings = repo.listings(kind).await?;
            if listings.is_empty() {
                log::info!("No listings available yet.");
            }
            for listing in listings {
                let unit = listing.kind().price_unit();
                log::info!(
                    "[{}] {} (by {}) - ₹{}{}{}",
                    listing.id,
                    listing.name,
                    listing.owner,
                    listing.price,
                    if unit.is_empty() { "" } else { " " },
                    unit
                );
                if let Some(renter) = &listing.rented_by {
                    if listing.is_pending() {
                        log::info!("    {renter} requested. Waiting for approval.");
                    } else {
                        log::info!(
                            "    Booked by {renter} from {} to {}",
                            listing.borrow_date.as_deref().unwrap_or("?"),
                            listing.return_date.as_deref().unwrap_or("?")
                        );
                    }
                }
            }
        }

        MarketCommand::Request { id, user, from, to } => {
            repo.request_rental(id, &user, &from, &to).await?;
            log::info!("Request sent. Waiting for owner approval.");
        }

        MarketCommand::Approve { id, user } => {
            repo.approve_rental(id, &user).await?;
            log::info!("Request approved.");
        }

        MarketCommand::Pending { user } => {
            let pending = repo.pending_for_owner(&user).await?;
            if pending.is_empty() {
                log::info!("No pending requests.");
            }
            for listing in pending {
                log::info!(
                    "[{}] {} requested '{}' from {} to {}",
                    listing.id,
                    listing.rented_by.as_deref().unwrap_or("?"),
                    listing.name,
                    listing.borrow_date.as_deref().unwrap_or("?"),
                    listing.return_date.as_deref().unwrap_or("?")
                );
            }
        }
    }
    Ok(())
}

async fn run_schedule(
    command: ScheduleCommand,
    scheduler: &mut Scheduler<LocalScheduleStore>,
) -> Result<()> {
    match command {
        ScheduleCommand::Show { date } => {
            let events = scheduler.events_sorted(&date);
            if events.is_empty() {
                log::info!("No events scheduled for {date}.");
            }
            for event in &events {
                log::info!("{} | {} - {}", event.name, event.start_time, event.end_time);
            }

            let assignments = scheduler.data().assignments_for(&date);
            if assignments.is_empty() {
                log::info!("No assignments for {date}.");
            }
            for a in assignments {
                log::info!(
                    "{} | Due: {} | Assigned to: {}",
                    a.name,
                    a.due_date,
                    a.assigned_staff
                );
            }

            if scheduler.data().is_finalized(&date) {
                log::info!("Timetable for {date} is finalized.");
            }
        }

        ScheduleCommand::AddEvent {
            date,
            name,
            start,
            end,
        } => {
            scheduler
                .add_event(&date, ScheduleEvent::new(name, start, end))
                .await?;
            log::info!("Event added successfully!");
        }

        ScheduleCommand::DeleteEvent { date, name } => {
            scheduler.delete_event(&date, &name).await?;
            log::info!("Deleted event: {name}");
        }

        ScheduleCommand::AddAssignment {
            date,
            name,
            due,
            staff,
        } => {
            scheduler
                .add_assignment(&date, Assignment::new(name, due, &staff))
                .await?;
            log::info!("Assignment added successfully!");
        }

        ScheduleCommand::DeleteAssignment { date, name } => {
            scheduler.delete_assignment(&date, &name).await?;
            log::info!("Deleted assignment: {name}");
        }

        ScheduleCommand::Finalize { date } => match scheduler.finalize(&date).await? {
            FinalizeOutcome::Finalized => log::info!("Timetable finalized!"),
            FinalizeOutcome::AlreadyFinalized => log::info!("{date} is already finalized."),
            FinalizeOutcome::Conflicts(conflicts) => {
                for conflict in &conflicts {
                    log::error!("{conflict}");
                }
                return Err(AppError::validation(format!(
                    "{date} has {} conflict(s); resolve them before finalizing",
                    conflicts.len()
                )));
            }
        },

        ScheduleCommand::Delete { date } => {
            scheduler.delete_schedule(&date).await?;
            log::info!("Deleted full schedule for {date}");
        }

        ScheduleCommand::Scan { file } => {
            let text = tokio::fs::read_to_string(&file).await?;
            let scan = scan_schedule_text(&text);

            if scan.events.is_empty() {
                log::info!("No schedule detected.");
            }
            for event in &scan.events {
                log::info!("{} | {} - {}", event.name, event.start_time, event.end_time);
            }

            if scan.conflicts.is_empty() {
                log::info!("No conflicts detected!");
            }
            for conflict in &scan.conflicts {
                log::warn!("{conflict}");
            }
        }

        ScheduleCommand::Upcoming => {
            let today = chrono::Local::now().format("%Y-%m-%d").to_string();
            let upcoming = scheduler.upcoming_events(&today, 5);
            if upcoming.is_empty() {
                log::info!("No upcoming events scheduled.");
            }
            for event in upcoming {
                log::info!(
                    "{}: {} ({} - {})",
                    event.date,
                    event.name,
                    event.start_time,
                    event.end_time
                );
            }
        }
    }
    Ok(())
}
