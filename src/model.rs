use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::StatsError;

pub type GameId = u64;
pub type TeamId = u64;
pub type PlayerId = u64;
pub type LeagueId = u64;

pub type TeamLeagues = HashMap<TeamId, LeagueId>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: GameId,
    pub league_id: LeagueId,
    pub away_team_id: TeamId,
    pub home_team_id: TeamId,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub location: String,
    pub time: String,
    pub date: String,
}

impl Game {
    pub fn from_value(v: &Value) -> Result<Self, StatsError> {
        const ENTITY: &str = "game";
        Ok(Self {
            id: require_id(v, "id", ENTITY)?,
            league_id: require_id(v, "leagueId", ENTITY)?,
            away_team_id: require_id(v, "awayTeamId", ENTITY)?,
            home_team_id: require_id(v, "homeTeamId", ENTITY)?,
            home_team: pick_string(v, &["homeTeam"]),
            away_team: pick_string(v, &["awayTeam"]),
            location: require_string(v, "location", ENTITY)?,
            time: require_string(v, "time", ENTITY)?,
            date: require_string(v, "date", ENTITY)?,
        })
    }
}

/// One atomic occurrence within a game. `event_type` is kept raw so the
/// aggregator decides how to treat values outside the known vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEvent {
    pub id: String,
    pub game_id: GameId,
    pub team_id: TeamId,
    pub player_id: PlayerId,
    pub player_name: String,
    pub player_gender: Option<String>,
    pub event_type: String,
    pub timestamp: String,
    pub sequence: i64,
}

impl GameEvent {
    pub fn from_value(v: &Value) -> Result<Self, StatsError> {
        const ENTITY: &str = "game event";
        let id = pick_id_string(v, &["_id", "id"])
            .ok_or_else(|| StatsError::malformed(ENTITY, "_id"))?;
        let player = v
            .get("player")
            .filter(|p| p.is_object())
            .ok_or_else(|| StatsError::malformed(ENTITY, "player"))?;
        let sequence = v
            .get("sequence")
            .and_then(as_i64_lenient)
            .ok_or_else(|| StatsError::malformed(ENTITY, "sequence"))?;

        Ok(Self {
            id,
            game_id: require_id(v, "gameId", ENTITY)?,
            team_id: require_id(v, "teamId", ENTITY)?,
            player_id: require_id(player, "id", ENTITY)?,
            player_name: require_string(player, "playerName", ENTITY)?,
            player_gender: pick_string(player, &["gender"]),
            event_type: require_string(v, "eventType", ENTITY)?,
            timestamp: require_string(v, "timestamp", ENTITY)?,
            sequence,
        })
    }

    pub fn key(&self) -> RowKey {
        RowKey {
            game_id: self.game_id,
            player_id: self.player_id,
        }
    }

    pub fn kind(&self) -> Option<EventType> {
        EventType::from_raw(&self.event_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: Option<String>,
    pub gender: Option<String>,
}

impl Player {
    pub fn from_value(v: &Value) -> Result<Self, StatsError> {
        Ok(Self {
            id: require_id(v, "id", "player")?,
            name: pick_string(v, &["playerName", "name"]),
            gender: pick_string(v, &["gender"]),
        })
    }
}

pub fn team_league_from_value(v: &Value) -> Result<(TeamId, LeagueId), StatsError> {
    Ok((
        require_id(v, "id", "team")?,
        require_id(v, "leagueId", "team")?,
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Goal,
    Assist,
    SecondAssist,
    Block,
    Throwaway,
    Drop,
    /// Recorded with an empty type string: a completed pass with no other outcome.
    OtherPass,
}

impl EventType {
    pub const ALL: [EventType; 7] = [
        EventType::Goal,
        EventType::Assist,
        EventType::SecondAssist,
        EventType::Block,
        EventType::Throwaway,
        EventType::Drop,
        EventType::OtherPass,
    ];

    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "Goal" => Some(EventType::Goal),
            "Assist" => Some(EventType::Assist),
            "2nd Assist" => Some(EventType::SecondAssist),
            "D" => Some(EventType::Block),
            "TA" => Some(EventType::Throwaway),
            "Drop" => Some(EventType::Drop),
            "" => Some(EventType::OtherPass),
            _ => None,
        }
    }

    pub fn as_raw(self) -> &'static str {
        match self {
            EventType::Goal => "Goal",
            EventType::Assist => "Assist",
            EventType::SecondAssist => "2nd Assist",
            EventType::Block => "D",
            EventType::Throwaway => "TA",
            EventType::Drop => "Drop",
            EventType::OtherPass => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey {
    pub game_id: GameId,
    pub player_id: PlayerId,
}

/// Per-player, per-game summary. Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub name: String,
    #[serde(rename = "gameId")]
    pub game_id: GameId,
    #[serde(rename = "playerId")]
    pub player_id: PlayerId,
    pub gender: Option<String>,
    #[serde(rename = "teamId")]
    pub team_id: TeamId,
    #[serde(rename = "leagueId")]
    pub league_id: LeagueId,
    pub goals: u32,
    pub assists: u32,
    pub second_assists: u32,
    pub blocks: u32,
    pub throwaways: u32,
    pub drops: u32,
    pub other_passes: u32,
    pub pickup: u32,
}

impl Row {
    pub fn new(event: &GameEvent, league_id: LeagueId) -> Self {
        Self {
            name: event.player_name.clone(),
            game_id: event.game_id,
            player_id: event.player_id,
            gender: event.player_gender.clone(),
            team_id: event.team_id,
            league_id,
            goals: 0,
            assists: 0,
            second_assists: 0,
            blocks: 0,
            throwaways: 0,
            drops: 0,
            other_passes: 0,
            pickup: 0,
        }
    }

    pub fn key(&self) -> RowKey {
        RowKey {
            game_id: self.game_id,
            player_id: self.player_id,
        }
    }

    pub fn counter(&self, kind: EventType) -> u32 {
        match kind {
            EventType::Goal => self.goals,
            EventType::Assist => self.assists,
            EventType::SecondAssist => self.second_assists,
            EventType::Block => self.blocks,
            EventType::Throwaway => self.throwaways,
            EventType::Drop => self.drops,
            EventType::OtherPass => self.other_passes,
        }
    }

    pub fn record(&mut self, kind: EventType) {
        let slot = match kind {
            EventType::Goal => &mut self.goals,
            EventType::Assist => &mut self.assists,
            EventType::SecondAssist => &mut self.second_assists,
            EventType::Block => &mut self.blocks,
            EventType::Throwaway => &mut self.throwaways,
            EventType::Drop => &mut self.drops,
            EventType::OtherPass => &mut self.other_passes,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn record_pickup(&mut self) {
        self.pickup = self.pickup.saturating_add(1);
    }
}

fn require_id(v: &Value, field: &'static str, entity: &'static str) -> Result<u64, StatsError> {
    v.get(field)
        .and_then(as_u64_lenient)
        .ok_or_else(|| StatsError::malformed(entity, field))
}

fn require_string(
    v: &Value,
    field: &'static str,
    entity: &'static str,
) -> Result<String, StatsError> {
    v.get(field)
        .and_then(|x| x.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| StatsError::malformed(entity, field))
}

fn pick_string(v: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| v.get(*k).and_then(|x| x.as_str()))
        .map(|s| s.to_string())
}

fn pick_id_string(v: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match v.get(*k)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

// The API is not consistent about numbers vs numeric strings for ids.
fn as_u64_lenient(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_i64_lenient(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
