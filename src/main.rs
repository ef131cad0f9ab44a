use std::path::PathBuf;

use clap::{Parser, Subcommand};

use softball_lineup::display::{
    print_batting_order, print_candidate_scores, print_game_table, print_lineup, print_lineup_details,
    print_stat_table, write_lineup_to_file,
};
use softball_lineup::form::{export_lineup_to_csv, GuestPlayer};
use softball_lineup::lineup::{plan_lineup, SearchLimits, DEFAULT_MAX_NODES};
use softball_lineup::roster::RosterConfig;
use softball_lineup::stats::{batting_order, game_totals, load_game_records, player_games, season_totals};
use softball_lineup::web;

#[derive(Parser)]
#[command(name = "softball-lineup", about = "Fielding lineups, batting stats and batting orders for a rec softball team")]
struct Cli {
    /// Team roster JSON; the built-in Freebasers roster is used when omitted
    #[arg(long, global = true)]
    roster: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build tonight's fielding lineup
    Lineup {
        /// Players who are out, comma separated
        #[arg(long, value_delimiter = ',')]
        unavailable: Vec<String>,

        /// Guest as NAME[:PREFS[:ATHLETICISM]], e.g. "Sam:1B,OF:7"; repeatable
        #[arg(long = "guest")]
        guests: Vec<GuestPlayer>,

        /// Stop the exhaustive search after this many nodes
        #[arg(long, default_value_t = DEFAULT_MAX_NODES)]
        max_nodes: u64,

        /// Show athleticism and preferences for each starter
        #[arg(long)]
        details: bool,

        /// Show every candidate's score at every position
        #[arg(long)]
        scores: bool,

        /// Also write the lineup as text to this file
        #[arg(long)]
        out: Option<PathBuf>,

        /// Also write the lineup as CSV to this file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Season batting stats
    Stats {
        #[arg(long, default_value = "data/game_stats.csv")]
        games: PathBuf,

        #[arg(long, default_value = "Fall2025")]
        season: String,

        /// Show one player's game log instead of the team tables
        #[arg(long)]
        player: Option<String>,
    },

    /// Recommend a batting order from season stats
    BattingOrder {
        #[arg(long, default_value = "data/game_stats.csv")]
        games: PathBuf,

        #[arg(long, default_value = "Fall2025")]
        season: String,

        /// Players sitting out, comma separated
        #[arg(long, value_delimiter = ',')]
        omit: Vec<String>,
    },

    /// Run the web interface
    Web {
        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,

        #[arg(long, default_value = "data/game_stats.csv")]
        games: PathBuf,
    },
}

fn load_roster(path: Option<&PathBuf>) -> Result<RosterConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            log::info!("Loading roster from {}", path.display());
            Ok(RosterConfig::load(path)?)
        }
        None => Ok(RosterConfig::freebasers()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let roster = load_roster(cli.roster.as_ref())?;

    match cli.command {
        Command::Lineup { unavailable, guests, max_nodes, details, scores, out, csv } => {
            let mut request = roster.lineup_request(&unavailable, &guests)?;
            request.limits = SearchLimits { max_nodes: Some(max_nodes) };

            println!("Available players: {}", request.available.len());
            println!("Using {} positions: {}", request.positions.len(), request.positions.names().join(", "));

            if scores {
                print_candidate_scores(&request, &request.players()?);
            }

            let lineup = plan_lineup(&request)?;
            print_lineup(&roster.team, &lineup);
            if details {
                print_lineup_details(&request, &lineup);
            }

            if let Some(out) = out {
                write_lineup_to_file(&roster.team, &lineup, &out.to_string_lossy())?;
                println!("\nLineup saved to {}", out.display());
            }
            if let Some(csv) = csv {
                export_lineup_to_csv(&lineup, &request, &csv)?;
                println!("Lineup CSV saved to {}", csv.display());
            }
        }

        Command::Stats { games, season, player } => {
            let records = load_game_records(&games)?;
            log::info!("Loaded {} game lines from {}", records.len(), games.display());

            match player {
                Some(player) => {
                    let log = player_games(&records, &season, &player)?;
                    if log.is_empty() {
                        println!("No games recorded for {} in {}", player, season);
                    } else {
                        print_game_table(&format!("{} - {} Game Log", player, season), &log);
                    }
                }
                None => {
                    let team = season_totals(&records, &roster.team, &season)?;
                    let totals = team.totals().row();
                    print_stat_table(&format!("{} {} Season Totals", team.team, season), &team.rows(), Some(&totals));
                    print_stat_table("Ranked by AVG", &team.rows_by_avg(), None);
                    print_game_table("Per-Game Team Totals", &game_totals(&records, &season)?);
                }
            }
        }

        Command::BattingOrder { games, season, omit } => {
            let records = load_game_records(&games)?;
            let team = season_totals(&records, &roster.team, &season)?;
            let order = batting_order(&team, &omit)?;
            print_batting_order(&order);
        }

        Command::Web { port, games } => {
            println!("Starting web server on port {}...", port);
            println!("Access the site at http://localhost:{}", port);
            web::start_server(port, roster, games).await?;
        }
    }

    Ok(())
}
