use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use railbook_api::{ApiClient, Config, FileTokenStore, RetryPolicy, Session, SessionProvider};
use railbook_booking::BookingFlow;
use railbook_search::{SearchFlow, SearchQuery};
use railbook_shared::format::{format_departure, format_duration, format_price};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "railbook=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    let store = Arc::new(FileTokenStore::new(config.storage.path.clone()));
    let client = Arc::new(ApiClient::new(&config.api, store.clone())?);
    let retry = RetryPolicy::from_settings(&config.retry);
    let session = SessionProvider::new(client.clone(), store);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("help");

    match command {
        "stations" => {
            let stations = client.list_stations().await?;
            for s in stations {
                println!("{:>4}  {}  {} ({})", s.id, s.code, s.name, s.city);
            }
        }
        "search" => {
            let [origin, destination, date] = &args[1..] else {
                bail!("usage: railbook search <origin-id> <destination-id> <YYYY-MM-DD>");
            };
            let query = SearchQuery {
                origin_id: origin.parse().context("origin id")?,
                destination_id: destination.parse().context("destination id")?,
                date: parse_date(date)?,
            };
            let mut flow = SearchFlow::new(client.clone(), retry, 10);
            flow.run(&query).await?;
            for trip in flow.page_items() {
                println!(
                    "{:>4}  {}  {}  {}  {}",
                    trip.id,
                    trip.train.number,
                    format_departure(&trip.departure),
                    format_duration(trip.duration_minutes),
                    format_price(trip.base_price),
                );
            }
            println!(
                "page {}/{} of {} trips",
                flow.current_page(),
                flow.page_count(),
                flow.filtered_len()
            );
        }
        "trip" => {
            let [id, date] = &args[1..] else {
                bail!("usage: railbook trip <trip-id> <YYYY-MM-DD>");
            };
            let trip = client.get_trip(id.parse().context("trip id")?).await?;
            println!(
                "{} {} -> {}  {}  {}",
                trip.train.name,
                trip.route.origin.name,
                trip.route.destination.name,
                format_departure(&trip.departure),
                format_price(trip.base_price),
            );
            let mut flow = BookingFlow::new(client.clone(), retry, trip, parse_date(date)?, 1);
            flow.load_availability().await?;
            for class in flow.available_classes() {
                println!("  class {class}");
            }
            for warning in flow.take_warnings() {
                println!("  ! {warning}");
            }
        }
        "login" => {
            let [email, password] = &args[1..] else {
                bail!("usage: railbook login <email> <password>");
            };
            let profile = session.login(email, password).await?;
            println!("logged in as {} {}", profile.first_name, profile.last_name);
        }
        "whoami" => match session.session().await {
            Session::LoggedIn(profile) => println!("{}", profile.email),
            Session::LoggedOut => println!("not logged in"),
        },
        "orders" => {
            let orders = client.list_orders().await?;
            for order in orders {
                println!(
                    "{:>5}  {:?}  {} tickets  {}",
                    order.id,
                    order.status,
                    order.tickets.len(),
                    format_price(order.total_price),
                );
            }
        }
        "logout" => {
            session.logout().await?;
            println!("logged out");
        }
        _ => {
            eprintln!("commands: stations | search | trip | login | whoami | orders | logout");
        }
    }

    Ok(())
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("invalid date: {raw}"))
}
