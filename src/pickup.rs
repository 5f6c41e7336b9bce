use crate::model::{EventType, GameEvent};

/// How the synthetic `pickup` counter is inferred from event adjacency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickupPolicy {
    Off,
    /// Look at the event processed immediately before, whatever game it belongs to.
    #[default]
    GlobalSequence,
    /// Like `GlobalSequence`, but the predecessor must be from the same game.
    SameGame,
}

impl PickupPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "off" | "none" | "disabled" => Some(PickupPolicy::Off),
            "global" | "global-sequence" => Some(PickupPolicy::GlobalSequence),
            "per-game" | "same-game" | "game" => Some(PickupPolicy::SameGame),
            _ => None,
        }
    }

    pub fn triggers(self, previous: Option<&GameEvent>, current: &GameEvent) -> bool {
        let Some(previous) = previous else {
            return false;
        };
        match self {
            PickupPolicy::Off => false,
            PickupPolicy::GlobalSequence => ends_possession(&previous.event_type),
            PickupPolicy::SameGame => {
                previous.game_id == current.game_id && ends_possession(&previous.event_type)
            }
        }
    }
}

/// Goals, blocks, throwaways and drops all hand the disc to someone who has
/// to pick it up next.
pub fn ends_possession(raw_event_type: &str) -> bool {
    matches!(
        EventType::from_raw(raw_event_type),
        Some(EventType::Goal | EventType::Block | EventType::Throwaway | EventType::Drop)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(game_id: u64, event_type: &str) -> GameEvent {
        GameEvent {
            id: format!("{game_id}-{event_type}"),
            game_id,
            team_id: 1,
            player_id: 1,
            player_name: "P".to_string(),
            player_gender: None,
            event_type: event_type.to_string(),
            timestamp: String::new(),
            sequence: 0,
        }
    }

    #[test]
    fn trigger_set() {
        for raw in ["Goal", "D", "TA", "Drop"] {
            assert!(ends_possession(raw), "{raw}");
        }
        for raw in ["Assist", "2nd Assist", "", "unknown"] {
            assert!(!ends_possession(raw), "{raw}");
        }
    }

    #[test]
    fn no_predecessor_never_triggers() {
        let current = event(1, "");
        for policy in [
            PickupPolicy::Off,
            PickupPolicy::GlobalSequence,
            PickupPolicy::SameGame,
        ] {
            assert!(!policy.triggers(None, &current));
        }
    }

    #[test]
    fn same_game_ignores_cross_game_predecessor() {
        let previous = event(1, "Goal");
        let current = event(2, "");
        let global = PickupPolicy::GlobalSequence;
        assert!(global.triggers(Some(&previous), &current));
        assert!(!PickupPolicy::SameGame.triggers(Some(&previous), &current));
        assert!(!PickupPolicy::Off.triggers(Some(&previous), &current));
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(
            PickupPolicy::parse(" Global "),
            Some(PickupPolicy::GlobalSequence)
        );
        assert_eq!(PickupPolicy::parse("per-game"), Some(PickupPolicy::SameGame));
        assert_eq!(PickupPolicy::parse("off"), Some(PickupPolicy::Off));
        assert_eq!(PickupPolicy::parse("sometimes"), None);
    }
}
