use std::collections::HashMap;

use crate::error::StatsError;
use crate::model::{GameEvent, GameId, Row, RowKey, TeamLeagues};
use crate::pickup::PickupPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventTypePolicy {
    #[default]
    Strict,
    // Row is still created, no counter moves.
    Lenient,
}

impl EventTypePolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(EventTypePolicy::Strict),
            "lenient" | "ignore" => Some(EventTypePolicy::Lenient),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AggregateOptions {
    pub event_types: EventTypePolicy,
    pub pickup: PickupPolicy,
}

/// Rows keyed by (game, player), kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSummary {
    rows: Vec<Row>,
    index: HashMap<RowKey, usize>,
}

impl StatsSummary {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, key: RowKey) -> Option<&Row> {
        self.index.get(&key).map(|&idx| &self.rows[idx])
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = (RowKey, &Row)> {
        self.rows.iter().map(|row| (row.key(), row))
    }

    fn row_for(
        &mut self,
        event: &GameEvent,
        leagues: &TeamLeagues,
    ) -> Result<&mut Row, StatsError> {
        let key = event.key();
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let Some(&league_id) = leagues.get(&event.team_id) else {
                    return Err(StatsError::UnknownTeam {
                        team_id: event.team_id,
                        event_id: event.id.clone(),
                    });
                };
                self.rows.push(Row::new(event, league_id));
                self.index.insert(key, self.rows.len() - 1);
                self.rows.len() - 1
            }
        };
        Ok(&mut self.rows[idx])
    }
}

pub fn aggregate(events: &[GameEvent], leagues: &TeamLeagues) -> Result<StatsSummary, StatsError> {
    aggregate_with(events, leagues, AggregateOptions::default())
}

/// Folds `events` in the order given; nothing here sorts them.
pub fn aggregate_with(
    events: &[GameEvent],
    leagues: &TeamLeagues,
    options: AggregateOptions,
) -> Result<StatsSummary, StatsError> {
    let mut summary = StatsSummary::default();
    let mut previous: Option<&GameEvent> = None;

    for event in events {
        let pickup = options.pickup.triggers(previous, event);
        let row = summary.row_for(event, leagues)?;

        match (event.kind(), options.event_types) {
            (Some(kind), _) => row.record(kind),
            (None, EventTypePolicy::Lenient) => {
                log::debug!(
                    "skipping unknown event type {:?} on event {}",
                    event.event_type,
                    event.id
                );
            }
            (None, EventTypePolicy::Strict) => {
                return Err(StatsError::UnknownEventType {
                    raw: event.event_type.clone(),
                    event_id: event.id.clone(),
                    game_id: event.game_id,
                    player_id: event.player_id,
                });
            }
        }

        if pickup {
            row.record_pickup();
        }
        previous = Some(event);
    }

    Ok(summary)
}

pub fn count_out_of_order(events: &[GameEvent]) -> usize {
    let mut last_seq: HashMap<GameId, i64> = HashMap::new();
    let mut out_of_order = 0usize;
    for event in events {
        if let Some(prev) = last_seq.insert(event.game_id, event.sequence) {
            if event.sequence < prev {
                out_of_order += 1;
            }
        }
    }
    out_of_order
}
