#![deny(missing_docs)]
//! Hangar command-line interface.
//!
//! Lists, filters and edits ships through the Hangar HTTP API, and computes
//! ratings locally.

mod client;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use client::{DEFAULT_SERVER_URL, HangarClient};
use hangar_core::{
    DEFAULT_CURRENT_YEAR, NewShip, RatingConfig, Ship, ShipOrder, ShipType, ShipUpdate,
};
use std::fmt::Write;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "hangar", version, about = "Hangar ship registry CLI")]
struct Cli {
    /// Base URL of the Hangar server.
    #[arg(long, global = true, env = "HANGAR_API_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum ShipTypeArg {
    Transport,
    Military,
    Merchant,
}

impl From<ShipTypeArg> for ShipType {
    fn from(value: ShipTypeArg) -> Self {
        match value {
            ShipTypeArg::Transport => ShipType::Transport,
            ShipTypeArg::Military => ShipType::Military,
            ShipTypeArg::Merchant => ShipType::Merchant,
        }
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OrderArg {
    Id,
    Speed,
    Date,
    Rating,
}

impl From<OrderArg> for ShipOrder {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::Id => ShipOrder::Id,
            OrderArg::Speed => ShipOrder::Speed,
            OrderArg::Date => ShipOrder::Date,
            OrderArg::Rating => ShipOrder::Rating,
        }
    }
}

#[derive(Args, Clone, Debug, Default)]
struct FilterArgs {
    /// Substring of the ship name.
    #[arg(long)]
    name: Option<String>,
    /// Substring of the planet.
    #[arg(long)]
    planet: Option<String>,
    /// Exact ship type.
    #[arg(long = "type", value_enum)]
    ship_type: Option<ShipTypeArg>,
    /// Earliest production date (YYYY-MM-DD).
    #[arg(long)]
    after: Option<NaiveDate>,
    /// Latest production date (YYYY-MM-DD).
    #[arg(long)]
    before: Option<NaiveDate>,
    /// Only used (`true`) or new (`false`) ships.
    #[arg(long)]
    used: Option<bool>,
    /// Minimum speed.
    #[arg(long)]
    min_speed: Option<f64>,
    /// Maximum speed.
    #[arg(long)]
    max_speed: Option<f64>,
    /// Minimum crew size.
    #[arg(long)]
    min_crew_size: Option<i32>,
    /// Maximum crew size.
    #[arg(long)]
    max_crew_size: Option<i32>,
    /// Minimum rating.
    #[arg(long)]
    min_rating: Option<f64>,
    /// Maximum rating.
    #[arg(long)]
    max_rating: Option<f64>,
}

impl FilterArgs {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push(&mut pairs, "name", self.name.clone());
        push(&mut pairs, "planet", self.planet.clone());
        push(
            &mut pairs,
            "shipType",
            self.ship_type.map(|kind| ShipType::from(kind).as_str()),
        );
        push(&mut pairs, "after", self.after.map(to_millis));
        push(&mut pairs, "before", self.before.map(to_millis));
        push(&mut pairs, "isUsed", self.used);
        push(&mut pairs, "minSpeed", self.min_speed);
        push(&mut pairs, "maxSpeed", self.max_speed);
        push(&mut pairs, "minCrewSize", self.min_crew_size);
        push(&mut pairs, "maxCrewSize", self.max_crew_size);
        push(&mut pairs, "minRating", self.min_rating);
        push(&mut pairs, "maxRating", self.max_rating);
        pairs
    }
}

#[derive(Args, Clone, Debug, Default)]
struct PageArgs {
    /// Sort key.
    #[arg(long, value_enum)]
    order: Option<OrderArg>,
    /// Zero-based page index.
    #[arg(long)]
    page_number: Option<u32>,
    /// Ships per page.
    #[arg(long)]
    page_size: Option<u32>,
}

impl PageArgs {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push(
            &mut pairs,
            "order",
            self.order.map(|order| ShipOrder::from(order).as_str()),
        );
        push(&mut pairs, "pageNumber", self.page_number);
        push(&mut pairs, "pageSize", self.page_size);
        pairs
    }
}

#[derive(Args, Clone, Debug, Default)]
struct ShipFieldArgs {
    /// Ship name.
    #[arg(long)]
    name: Option<String>,
    /// Planet of manufacture.
    #[arg(long)]
    planet: Option<String>,
    /// Ship type.
    #[arg(long = "type", value_enum)]
    ship_type: Option<ShipTypeArg>,
    /// Production date (YYYY-MM-DD).
    #[arg(long)]
    prod_date: Option<NaiveDate>,
    /// Whether the ship is used.
    #[arg(long)]
    used: Option<bool>,
    /// Speed in [0.01, 0.99].
    #[arg(long)]
    speed: Option<f64>,
    /// Crew size in [1, 9999].
    #[arg(long)]
    crew_size: Option<i32>,
}

impl ShipFieldArgs {
    fn new_ship(&self) -> NewShip {
        NewShip {
            name: self.name.clone(),
            planet: self.planet.clone(),
            ship_type: self.ship_type.map(ShipType::from),
            prod_date: self.prod_date.map(start_of_day),
            is_used: self.used,
            speed: self.speed,
            crew_size: self.crew_size,
        }
    }

    fn update(&self) -> ShipUpdate {
        ShipUpdate {
            name: self.name.clone(),
            planet: self.planet.clone(),
            ship_type: self.ship_type.map(ShipType::from),
            prod_date: self.prod_date.map(start_of_day),
            is_used: self.used,
            speed: self.speed,
            crew_size: self.crew_size,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of ships matching the filters.
    List {
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Count ships matching the filters.
    Count {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show a single ship.
    Get {
        /// Ship id.
        id: i64,
    },
    /// Register a new ship.
    Create {
        #[command(flatten)]
        fields: ShipFieldArgs,
    },
    /// Change fields of an existing ship.
    Update {
        /// Ship id.
        id: i64,
        #[command(flatten)]
        fields: ShipFieldArgs,
    },
    /// Remove a ship.
    Delete {
        /// Ship id.
        id: i64,
    },
    /// Compute a rating locally without contacting the server.
    Rating {
        /// Speed in [0.01, 0.99].
        #[arg(long)]
        speed: f64,
        /// Production year.
        #[arg(long)]
        prod_year: i32,
        /// Treat the ship as used.
        #[arg(long)]
        used: bool,
        /// Year ratings are measured against.
        #[arg(long, env = "HANGAR_CURRENT_YEAR", default_value_t = DEFAULT_CURRENT_YEAR)]
        current_year: i32,
    },
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    let output = run(cli).await?;
    println!("{output}");
    Ok(())
}

#[cfg(test)]
fn main() {}

async fn run(cli: Cli) -> CliResult<String> {
    let Cli {
        server_url,
        format,
        command,
    } = cli;
    match command {
        Commands::List { filter, page } => {
            let mut query = filter.query_pairs();
            query.extend(page.query_pairs());
            let ships = HangarClient::new(&server_url)?.list_ships(&query).await?;
            render_ships(&ships, format)
        }
        Commands::Count { filter } => {
            let count = HangarClient::new(&server_url)?
                .count_ships(&filter.query_pairs())
                .await?;
            Ok(count.to_string())
        }
        Commands::Get { id } => {
            let ship = HangarClient::new(&server_url)?.get_ship(id).await?;
            render_ship(&ship, format)
        }
        Commands::Create { fields } => {
            let ship = HangarClient::new(&server_url)?
                .create_ship(&fields.new_ship())
                .await?;
            render_ship(&ship, format)
        }
        Commands::Update { id, fields } => {
            let ship = HangarClient::new(&server_url)?
                .update_ship(id, &fields.update())
                .await?;
            render_ship(&ship, format)
        }
        Commands::Delete { id } => {
            HangarClient::new(&server_url)?.delete_ship(id).await?;
            Ok(match format {
                OutputFormat::Text => format!("deleted ship {id}"),
                OutputFormat::Json => serde_json::json!({ "deleted": id }).to_string(),
            })
        }
        Commands::Rating {
            speed,
            prod_year,
            used,
            current_year,
        } => {
            let rating = local_rating(speed, prod_year, used, current_year)?;
            Ok(match format {
                OutputFormat::Text => format!("{rating:.2}"),
                OutputFormat::Json => serde_json::json!({ "rating": rating }).to_string(),
            })
        }
    }
}

fn local_rating(speed: f64, prod_year: i32, used: bool, current_year: i32) -> CliResult<f64> {
    let prod_date = Utc
        .with_ymd_and_hms(prod_year, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| format!("invalid production year: {prod_year}"))?;
    Ok(RatingConfig::new(current_year).rate(speed, used, prod_date))
}

fn push<T: ToString>(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<T>) {
    if let Some(value) = value {
        pairs.push((key, value.to_string()));
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

fn to_millis(date: NaiveDate) -> i64 {
    start_of_day(date).timestamp_millis()
}

fn render_ships(ships: &[Ship], format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(ships)?),
        OutputFormat::Text => Ok(render_ships_text(ships)),
    }
}

fn render_ship(ship: &Ship, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(ship)?),
        OutputFormat::Text => Ok(render_ship_text(ship)),
    }
}

fn render_ships_text(ships: &[Ship]) -> String {
    if ships.is_empty() {
        return "No ships found.".to_string();
    }
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{:>6}  {:<20}  {:<12}  {:<9}  {:>4}  {:>4}  {:>5}  {:>4}  {:>6}",
        "ID", "NAME", "PLANET", "TYPE", "YEAR", "USED", "SPEED", "CREW", "RATING"
    );
    for ship in ships {
        let _ = writeln!(
            output,
            "{:>6}  {:<20}  {:<12}  {:<9}  {:>4}  {:>4}  {:>5.2}  {:>4}  {:>6.2}",
            ship.id,
            ship.name,
            ship.planet,
            ship.ship_type,
            ship.prod_date.format("%Y"),
            if ship.is_used { "yes" } else { "no" },
            ship.speed,
            ship.crew_size,
            ship.rating
        );
    }
    output.trim_end().to_string()
}

fn render_ship_text(ship: &Ship) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Ship {}: {}", ship.id, ship.name);
    let _ = writeln!(output, "  planet:   {}", ship.planet);
    let _ = writeln!(output, "  type:     {}", ship.ship_type);
    let _ = writeln!(
        output,
        "  built:    {}",
        ship.prod_date.format("%Y-%m-%d")
    );
    let _ = writeln!(output, "  used:     {}", ship.is_used);
    let _ = writeln!(output, "  speed:    {:.2}", ship.speed);
    let _ = writeln!(output, "  crew:     {}", ship.crew_size);
    let _ = write!(output, "  rating:   {:.2}", ship.rating);
    output
}

#[cfg(test)]
mod tests {
    use super::{
        Cli, Commands, FilterArgs, OrderArg, OutputFormat, PageArgs, ShipFieldArgs, ShipTypeArg,
        local_rating, render_ship_text, render_ships_text, run, to_millis,
    };
    use chrono::{NaiveDate, TimeZone, Utc};
    use clap::Parser;
    use hangar_core::{Ship, ShipType};
    use httpmock::Method::{DELETE, GET, POST};
    use httpmock::MockServer;
    use serde_json::json;

    fn ship() -> Ship {
        Ship {
            id: 12,
            name: "Rocinante".to_string(),
            planet: "Mars".to_string(),
            ship_type: ShipType::Military,
            prod_date: Utc.with_ymd_and_hms(3010, 5, 17, 0, 0, 0).unwrap(),
            is_used: true,
            speed: 0.83,
            crew_size: 4,
            rating: 0.92,
        }
    }

    fn cli(server_url: &str, format: OutputFormat, command: Commands) -> Cli {
        Cli {
            server_url: server_url.to_string(),
            format,
            command,
        }
    }

    #[test]
    fn parses_list_arguments() {
        let cli = Cli::try_parse_from([
            "hangar",
            "--server-url",
            "http://fleet:9000",
            "list",
            "--name",
            "Ro",
            "--type",
            "military",
            "--after",
            "3000-01-01",
            "--used",
            "true",
            "--order",
            "rating",
            "--page-size",
            "10",
        ])
        .expect("parse");

        assert_eq!(cli.server_url, "http://fleet:9000");
        assert_eq!(cli.format, OutputFormat::Text);
        match cli.command {
            Commands::List { filter, page } => {
                assert_eq!(filter.name.as_deref(), Some("Ro"));
                assert_eq!(filter.ship_type, Some(ShipTypeArg::Military));
                assert_eq!(filter.used, Some(true));
                assert_eq!(page.order, Some(OrderArg::Rating));
                assert_eq!(page.page_size, Some(10));
                assert_eq!(page.page_number, None);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn rejects_unknown_ship_type() {
        assert!(Cli::try_parse_from(["hangar", "count", "--type", "yacht"]).is_err());
    }

    #[test]
    fn filter_query_uses_wire_names() {
        let filter = FilterArgs {
            ship_type: Some(ShipTypeArg::Merchant),
            before: NaiveDate::from_ymd_opt(3001, 1, 1),
            min_crew_size: Some(5),
            max_rating: Some(2.5),
            ..FilterArgs::default()
        };
        let page = PageArgs {
            order: Some(OrderArg::Date),
            page_number: Some(2),
            page_size: None,
        };

        let before = Utc
            .with_ymd_and_hms(3001, 1, 1, 0, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("shipType", "MERCHANT".to_string()),
                ("before", before.to_string()),
                ("minCrewSize", "5".to_string()),
                ("maxRating", "2.5".to_string()),
            ]
        );
        assert_eq!(
            page.query_pairs(),
            vec![("order", "DATE".to_string()), ("pageNumber", "2".to_string())]
        );
    }

    #[test]
    fn field_args_map_to_payloads() {
        let fields = ShipFieldArgs {
            name: Some("Canterbury".to_string()),
            prod_date: NaiveDate::from_ymd_opt(2990, 7, 4),
            speed: Some(0.2),
            ..ShipFieldArgs::default()
        };

        let new_ship = fields.new_ship();
        assert_eq!(new_ship.name.as_deref(), Some("Canterbury"));
        assert_eq!(new_ship.is_used, None);
        assert_eq!(
            new_ship.prod_date.map(|date| date.timestamp_millis()),
            NaiveDate::from_ymd_opt(2990, 7, 4).map(to_millis)
        );

        let update = fields.update();
        assert_eq!(update.speed, Some(0.2));
        assert_eq!(update.planet, None);
    }

    #[test]
    fn local_rating_matches_core_formula() {
        assert_eq!(local_rating(0.5, 3019, false, 3019).expect("rating"), 40.0);
        assert_eq!(local_rating(0.5, 3019, true, 3019).expect("rating"), 20.0);
        assert_eq!(local_rating(0.99, 2800, false, 3019).expect("rating"), 0.36);
    }

    #[test]
    fn text_rendering() {
        assert_eq!(render_ships_text(&[]), "No ships found.");

        let table = render_ships_text(&[ship()]);
        let mut lines = table.lines();
        assert!(lines.next().expect("header").contains("RATING"));
        let row = lines.next().expect("row");
        assert!(row.contains("Rocinante"));
        assert!(row.contains("MILITARY"));
        assert!(row.contains("3010"));
        assert!(row.contains("0.92"));

        let detail = render_ship_text(&ship());
        assert!(detail.starts_with("Ship 12: Rocinante"));
        assert!(detail.contains("built:    3010-05-17"));
        assert!(detail.ends_with("rating:   0.92"));
    }

    #[tokio::test]
    async fn rating_runs_without_server() {
        let output = run(cli(
            "not a url",
            OutputFormat::Json,
            Commands::Rating {
                speed: 0.5,
                prod_year: 3018,
                used: false,
                current_year: 3019,
            },
        ))
        .await
        .expect("rating");
        assert_eq!(output, r#"{"rating":20.0}"#);
    }

    #[tokio::test]
    async fn list_renders_server_response() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/ships")
                    .query_param("planet", "Mars")
                    .query_param("pageNumber", "1");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!([ship()]));
            })
            .await;

        let output = run(cli(
            &server.base_url(),
            OutputFormat::Text,
            Commands::List {
                filter: FilterArgs {
                    planet: Some("Mars".to_string()),
                    ..FilterArgs::default()
                },
                page: PageArgs {
                    page_number: Some(1),
                    ..PageArgs::default()
                },
            },
        ))
        .await
        .expect("list");

        mock.assert_async().await;
        assert!(output.contains("Rocinante"));
    }

    #[tokio::test]
    async fn create_update_delete_flow() {
        let crewed = Ship {
            crew_size: 6,
            ..ship()
        };
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/ships")
                    .json_body_partial(r#"{"name":"Rocinante","shipType":"MILITARY"}"#);
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!(ship()));
            })
            .await;
        let update = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/ships/12")
                    .json_body_partial(r#"{"crewSize":6}"#);
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!(crewed));
            })
            .await;
        let delete = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/rest/ships/12");
                then.status(200);
            })
            .await;

        let created = run(cli(
            &server.base_url(),
            OutputFormat::Json,
            Commands::Create {
                fields: ShipFieldArgs {
                    name: Some("Rocinante".to_string()),
                    ship_type: Some(ShipTypeArg::Military),
                    ..ShipFieldArgs::default()
                },
            },
        ))
        .await
        .expect("create");
        assert!(created.contains("\"crewSize\": 4"));

        let updated = run(cli(
            &server.base_url(),
            OutputFormat::Text,
            Commands::Update {
                id: 12,
                fields: ShipFieldArgs {
                    crew_size: Some(6),
                    ..ShipFieldArgs::default()
                },
            },
        ))
        .await
        .expect("update");
        assert!(updated.contains("crew:     6"));

        let deleted = run(cli(
            &server.base_url(),
            OutputFormat::Text,
            Commands::Delete { id: 12 },
        ))
        .await
        .expect("delete");
        assert_eq!(deleted, "deleted ship 12");

        create.assert_async().await;
        update.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn invalid_server_url_is_reported() {
        let err = run(cli("fleet:9000", OutputFormat::Text, Commands::Get { id: 1 }))
            .await
            .expect_err("bad url");
        assert!(err.to_string().contains("http://"));
    }
}
