use thiserror::Error;

use crate::model::{GameId, PlayerId, TeamId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("source unavailable at {url}: {reason}")]
    SourceUnavailable { url: String, reason: String },

    #[error("malformed {entity} record: missing field `{field}`")]
    MalformedRecord {
        entity: &'static str,
        field: &'static str,
    },

    #[error("event {event_id} references team {team_id} with no league")]
    UnknownTeam { team_id: TeamId, event_id: String },

    #[error("event {event_id} (game {game_id}, player {player_id}) has unknown type {raw:?}")]
    UnknownEventType {
        raw: String,
        event_id: String,
        game_id: GameId,
        player_id: PlayerId,
    },
}

impl StatsError {
    pub(crate) fn unavailable(url: &str, reason: impl ToString) -> Self {
        StatsError::SourceUnavailable {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn malformed(entity: &'static str, field: &'static str) -> Self {
        StatsError::MalformedRecord { entity, field }
    }
}
