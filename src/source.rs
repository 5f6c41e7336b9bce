use std::time::Duration;

use serde_json::Value;

use crate::config::Config;
use crate::error::StatsError;
use crate::http_client::http_client;
use crate::model::{Game, GameEvent, GameId, Player, TeamId, TeamLeagues, team_league_from_value};

pub const PLAYERS_PATH: &str = "players";
pub const GAMES_PATH: &str = "games";
pub const TEAMS_PATH: &str = "teams";
pub const GAME_EVENTS_PATH: &str = "gameEvents";

pub trait DataSource {
    fn players(&self) -> Result<Vec<Player>, StatsError>;
    fn games(&self) -> Result<Vec<Game>, StatsError>;
    fn team_leagues(&self) -> Result<TeamLeagues, StatsError>;
    fn game_events(&self) -> Result<Vec<GameEvent>, StatsError>;
    fn game_events_for(
        &self,
        game_id: GameId,
        team_id: TeamId,
    ) -> Result<Vec<GameEvent>, StatsError>;
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        Self {
            base_url: format!("{trimmed}/"),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.server_url, config.http_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn fetch_body(&self, url: &str) -> Result<String, StatsError> {
        let client = http_client(self.timeout)?;
        log::debug!("GET {url}");
        let resp = client
            .get(url)
            .send()
            .map_err(|err| StatsError::unavailable(url, format!("request failed: {err}")))?;
        let status = resp.status();
        let body = resp
            .text()
            .map_err(|err| StatsError::unavailable(url, format!("failed reading body: {err}")))?;
        if !status.is_success() {
            return Err(StatsError::unavailable(url, format!("http {status}")));
        }
        Ok(body)
    }
}

impl DataSource for HttpSource {
    fn players(&self) -> Result<Vec<Player>, StatsError> {
        let url = self.url(PLAYERS_PATH);
        decode_list(&self.fetch_body(&url)?, &url, Player::from_value)
    }

    fn games(&self) -> Result<Vec<Game>, StatsError> {
        let url = self.url(GAMES_PATH);
        decode_list(&self.fetch_body(&url)?, &url, Game::from_value)
    }

    fn team_leagues(&self) -> Result<TeamLeagues, StatsError> {
        let url = self.url(TEAMS_PATH);
        let pairs = decode_list(&self.fetch_body(&url)?, &url, team_league_from_value)?;
        Ok(pairs.into_iter().collect())
    }

    fn game_events(&self) -> Result<Vec<GameEvent>, StatsError> {
        let url = self.url(GAME_EVENTS_PATH);
        decode_list(&self.fetch_body(&url)?, &url, GameEvent::from_value)
    }

    fn game_events_for(
        &self,
        game_id: GameId,
        team_id: TeamId,
    ) -> Result<Vec<GameEvent>, StatsError> {
        let url = self.url(&game_events_path(game_id, team_id));
        decode_list(&self.fetch_body(&url)?, &url, GameEvent::from_value)
    }
}

pub fn game_events_path(game_id: GameId, team_id: TeamId) -> String {
    format!("{GAME_EVENTS_PATH}/{game_id}/{team_id}")
}

pub fn parse_players_json(raw: &str) -> Result<Vec<Player>, StatsError> {
    decode_list(raw, PLAYERS_PATH, Player::from_value)
}

pub fn parse_games_json(raw: &str) -> Result<Vec<Game>, StatsError> {
    decode_list(raw, GAMES_PATH, Game::from_value)
}

pub fn parse_game_events_json(raw: &str) -> Result<Vec<GameEvent>, StatsError> {
    decode_list(raw, GAME_EVENTS_PATH, GameEvent::from_value)
}

// Later duplicates of a team id replace earlier ones.
pub fn parse_teams_json(raw: &str) -> Result<TeamLeagues, StatsError> {
    let pairs = decode_list(raw, TEAMS_PATH, team_league_from_value)?;
    Ok(pairs.into_iter().collect())
}

fn decode_list<T>(
    raw: &str,
    origin: &str,
    decode: impl Fn(&Value) -> Result<T, StatsError>,
) -> Result<Vec<T>, StatsError> {
    let trimmed = raw.trim();
    if trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed)
        .map_err(|err| StatsError::unavailable(origin, format!("invalid json: {err}")))?;
    let Some(items) = root.as_array() else {
        return Err(StatsError::unavailable(origin, "expected a json array"));
    };
    items.iter().map(decode).collect()
}
