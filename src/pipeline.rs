use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::aggregate::{AggregateOptions, StatsSummary, aggregate_with, count_out_of_order};
use crate::config::Config;
use crate::model::{GameEvent, GameId, TeamId, TeamLeagues};
use crate::sink::OutputBatch;
use crate::source::DataSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub events: usize,
    pub rows: usize,
    pub games: Option<usize>,
    pub written: Vec<PathBuf>,
}

/// Nothing is written unless every fetch, the aggregation and every staged
/// output succeeded.
pub fn run(config: &Config, source: &dyn DataSource) -> Result<RunReport> {
    let events = source.game_events().context("fetch game events")?;
    log::info!("fetched {} game events", events.len());
    let leagues = source.team_leagues().context("fetch teams")?;
    log::info!("fetched {} team league mappings", leagues.len());
    let games = if config.write_games {
        let games = source.games().context("fetch games")?;
        log::info!("fetched {} games", games.len());
        Some(games)
    } else {
        None
    };

    let summary = summarize(&events, &leagues, config.aggregate)?;

    let mut batch = OutputBatch::new();
    if config.write_json {
        batch.rows_json(&config.stats_json_path(), summary.rows())?;
    }
    if config.write_csv {
        batch.rows_csv(&config.stats_csv_path(), summary.rows())?;
    }
    if let Some(games) = games.as_deref() {
        batch.games_json(&config.games_json_path(), games)?;
    }
    let written = batch.commit()?;

    Ok(RunReport {
        events: events.len(),
        rows: summary.len(),
        games: games.map(|g| g.len()),
        written,
    })
}

pub fn game_report(
    source: &dyn DataSource,
    game_id: GameId,
    team_id: TeamId,
    options: AggregateOptions,
) -> Result<StatsSummary> {
    let events = source
        .game_events_for(game_id, team_id)
        .with_context(|| format!("fetch events for game {game_id}, team {team_id}"))?;
    let leagues = source.team_leagues().context("fetch teams")?;
    summarize(&events, &leagues, options)
}

fn summarize(
    events: &[GameEvent],
    leagues: &TeamLeagues,
    options: AggregateOptions,
) -> Result<StatsSummary> {
    let out_of_order = count_out_of_order(events);
    if out_of_order > 0 {
        log::warn!("{out_of_order} events arrived out of sequence order; aggregating as received");
    }
    let summary = aggregate_with(events, leagues, options)
        .context("aggregate game events")?;
    log::info!(
        "aggregated {} events into {} player rows",
        events.len(),
        summary.len()
    );
    Ok(summary)
}
