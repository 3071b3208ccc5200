use std::path::PathBuf;
use std::process::exit;

use carline_lane::adapters::snapshot_source::{
    FileSnapshotSource, SnapshotSource, StdinSnapshotSource,
};
use carline_lane::config::LaneConfig;
use carline_lane::handlers::placard::{handle_placard_decode, handle_placard_encode};
use carline_lane::handlers::queue::{handle_position_event, handle_queue_event};
use carline_lane::handlers::HandlerError;
use carline_lane::logging::log_error;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(
    name = "carline",
    about = "Order a pickup lane and issue placard tokens",
    long_about = "Reads pending ride-request snapshots and prints the lane order,\n\
                  or encodes/decodes the placard tokens shown to staff."
)]
struct Cli {
    /// Lane used when a snapshot does not name one; overrides CARLINE_LANE_ID
    #[arg(long, global = true)]
    lane_id: Option<String>,
    /// Default placard lifetime in seconds; overrides CARLINE_PLACARD_TTL_SEC
    #[arg(long, global = true, allow_negative_numbers = true)]
    placard_ttl_sec: Option<i64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the ordered lane for a snapshot
    Queue {
        /// Snapshot JSON file; stdin when omitted
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Print one ride's place in line
    Position {
        #[arg(long)]
        ride_id: String,
        /// Snapshot JSON file; stdin when omitted
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Encode or decode placard tokens
    Placard {
        #[command(subcommand)]
        action: PlacardAction,
    },
}

#[derive(Subcommand)]
enum PlacardAction {
    /// Build a token from its fields
    Encode {
        #[arg(long)]
        placard_code: String,
        #[arg(long)]
        ride_id: String,
        /// Overrides the configured lifetime
        #[arg(long, allow_negative_numbers = true)]
        ttl_sec: Option<i64>,
    },
    /// Split a token back into its fields
    Decode { token: String },
}

/// Env first, then command-line overrides.
fn load_config(lane_id: Option<&str>, placard_ttl_sec: Option<i64>) -> LaneConfig {
    let mut config = match LaneConfig::from_env() {
        Ok(value) => value,
        Err(error) => fail_config(error.message()),
    };
    if let Some(lane_id) = lane_id.map(str::trim) {
        if !lane_id.is_empty() {
            config.lane_id = lane_id.to_string();
        }
    }
    if let Some(ttl) = placard_ttl_sec {
        if ttl <= 0 {
            fail_config(&format!("--placard-ttl-sec must be > 0, got {ttl}"));
        }
        config.placard_ttl_sec = ttl;
    }
    config
}

fn load_snapshot(path: Option<&PathBuf>) -> Value {
    let result = match path {
        Some(path) => FileSnapshotSource::new(path).load_snapshot(),
        None => StdinSnapshotSource.load_snapshot(),
    };
    match result {
        Ok(value) => value,
        Err(message) => {
            log_error("carline", "snapshot_unavailable", json!({"message": message}));
            exit(1);
        }
    }
}

fn fail_config(message: &str) -> ! {
    log_error("carline", "invalid_config", json!({"message": message}));
    exit(1);
}

fn print_json(value: &impl Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(error) => {
            log_error(
                "carline",
                "serialization_error",
                json!({"message": error.to_string()}),
            );
            exit(1);
        }
    }
}

fn finish<T: Serialize>(result: Result<T, HandlerError>) {
    match result {
        Ok(value) => print_json(&value),
        Err(error) => {
            print_json(&error);
            exit(2);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let config = || load_config(cli.lane_id.as_deref(), cli.placard_ttl_sec);

    match cli.command {
        Commands::Queue { snapshot } => {
            let event = load_snapshot(snapshot.as_ref());
            finish(handle_queue_event(event, &config()));
        }
        Commands::Position { ride_id, snapshot } => {
            let event = load_snapshot(snapshot.as_ref());
            finish(handle_position_event(event, &ride_id, &config()));
        }
        Commands::Placard { action } => match action {
            PlacardAction::Encode {
                placard_code,
                ride_id,
                ttl_sec,
            } => finish(handle_placard_encode(
                &placard_code,
                &ride_id,
                ttl_sec,
                &config(),
            )),
            PlacardAction::Decode { token } => finish(handle_placard_decode(&token)),
        },
    }
}
