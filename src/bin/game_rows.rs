use anyhow::{Context, Result};

use tpl_stats::config::{Config, load_dotenv};
use tpl_stats::logging::init_logger;
use tpl_stats::pipeline;
use tpl_stats::source::HttpSource;

fn main() -> Result<()> {
    load_dotenv();
    init_logger();
    let config = Config::from_env();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let game_id = parse_id_arg(&args, "game").context("missing --game <id>")?;
    let team_id = parse_id_arg(&args, "team").context("missing --team <id>")?;

    let source = HttpSource::from_config(&config);
    let summary = pipeline::game_report(&source, game_id, team_id, config.aggregate)?;

    println!("Game {game_id}, team {team_id}: {} players", summary.len());
    for row in summary.rows() {
        println!(
            " - {} (#{}) G{} A{} 2A{} D{} TA{} Drop{} P{} pickup{}",
            row.name,
            row.player_id,
            row.goals,
            row.assists,
            row.second_assists,
            row.blocks,
            row.throwaways,
            row.drops,
            row.other_passes,
            row.pickup
        );
    }
    Ok(())
}

fn parse_id_arg(args: &[String], name: &str) -> Option<u64> {
    let flag = format!("--{name}");
    let prefix = format!("--{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            if let Ok(id) = value.trim().parse() {
                return Some(id);
            }
        }
        if *arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if let Ok(id) = next.trim().parse() {
                return Some(id);
            }
        }
    }
    None
}
