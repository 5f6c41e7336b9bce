use std::fs;
use std::path::PathBuf;

use tpl_stats::StatsError;
use tpl_stats::source::{
    parse_game_events_json, parse_games_json, parse_players_json, parse_teams_json,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_game_events_fixture() {
    let raw = read_fixture("game_events.json");
    let events = parse_game_events_json(&raw).expect("fixture should parse");
    assert_eq!(events.len(), 5);

    assert_eq!(events[0].id, "665f1c2a9b1e4a0012ab0001");
    assert_eq!(events[0].game_id, 7);
    assert_eq!(events[0].player_id, 101);
    assert_eq!(events[0].player_name, "Avery Chen");
    assert_eq!(events[0].player_gender.as_deref(), Some("F"));
    assert_eq!(events[0].event_type, "");
    assert_eq!(events[0].sequence, 1);

    assert_eq!(events[3].player_gender, None);
    assert_eq!(events[3].event_type, "TA");
}

#[test]
fn game_event_ids_and_numbers_may_be_strings() {
    let raw = read_fixture("game_events.json");
    let events = parse_game_events_json(&raw).expect("fixture should parse");
    let last = &events[4];
    assert_eq!(last.id, "5");
    assert_eq!(last.game_id, 7);
    assert_eq!(last.team_id, 21);
    assert_eq!(last.player_id, 102);
    assert_eq!(last.player_gender, None);
    assert_eq!(last.sequence, 5);
}

#[test]
fn parses_games_fixture_with_optional_names() {
    let raw = read_fixture("games.json");
    let games = parse_games_json(&raw).expect("fixture should parse");
    assert_eq!(games.len(), 2);
    assert_eq!(games[0].home_team.as_deref(), Some("Disc Jockeys"));
    assert_eq!(games[0].away_team_id, 22);
    assert_eq!(games[1].home_team, None);
    assert_eq!(games[1].location, "Christie Pits");
}

#[test]
fn parses_teams_into_league_lookup() {
    let raw = read_fixture("teams.json");
    let leagues = parse_teams_json(&raw).expect("fixture should parse");
    assert_eq!(leagues.len(), 3);
    assert_eq!(leagues.get(&21), Some(&3));
    assert_eq!(leagues.get(&23), Some(&4));
}

#[test]
fn parses_players_fixture() {
    let raw = read_fixture("players.json");
    let players = parse_players_json(&raw).expect("fixture should parse");
    assert_eq!(players.len(), 3);
    assert_eq!(players[0].name.as_deref(), Some("Avery Chen"));
    assert_eq!(players[1].name.as_deref(), Some("Jordan Park"));
    assert_eq!(players[2].name, None);
}

#[test]
fn missing_field_is_malformed_record() {
    let raw = r#"[{ "_id": "x", "gameId": 1, "teamId": 2,
        "player": { "id": 3 }, "eventType": "Goal", "timestamp": "t", "sequence": 1 }]"#;
    assert_eq!(
        parse_game_events_json(raw),
        Err(StatsError::MalformedRecord {
            entity: "game event",
            field: "playerName",
        })
    );

    let raw = r#"[{ "id": 1, "leagueId": 2, "awayTeamId": 3, "homeTeamId": 4,
        "location": "Field", "time": "19:00" }]"#;
    assert_eq!(
        parse_games_json(raw),
        Err(StatsError::MalformedRecord {
            entity: "game",
            field: "date",
        })
    );
}

#[test]
fn event_without_player_object_is_malformed() {
    let raw = r#"[{ "_id": "x", "gameId": 1, "teamId": 2, "player": 3,
        "eventType": "Goal", "timestamp": "t", "sequence": 1 }]"#;
    assert_eq!(
        parse_game_events_json(raw),
        Err(StatsError::MalformedRecord {
            entity: "game event",
            field: "player",
        })
    );
}

#[test]
fn null_body_is_empty() {
    let events = parse_game_events_json("null").expect("null should parse");
    assert!(events.is_empty());
    let teams = parse_teams_json(" null ").expect("null should parse");
    assert!(teams.is_empty());
}

#[test]
fn non_array_body_is_source_unavailable() {
    let err = parse_games_json(r#"{"error":"asleep"}"#).unwrap_err();
    assert!(matches!(err, StatsError::SourceUnavailable { .. }));

    let err = parse_games_json("<html>502</html>").unwrap_err();
    assert!(matches!(err, StatsError::SourceUnavailable { .. }));
}
