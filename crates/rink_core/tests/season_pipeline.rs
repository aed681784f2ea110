use rink_core::analysis::events::RushKind;
use rink_core::analysis::metrics::Trend;
use rink_core::config::{AnalyticsConfig, RollingConfig};
use rink_core::error::SourceError;
use rink_core::models::{EventType, GameFeed, GameId, PlayEvent, Subject, Zone};
use rink_core::pipeline::{run_season, CancellationToken, GameSource, MemorySource, SeasonOutcome, SeasonRequest};
use rink_core::analyze_game;

const HOME: u32 = 6;
const AWAY: u32 = 8;

fn shot(id: u64, t: f64, event_type: EventType, team: u32) -> PlayEvent {
    let mut e = PlayEvent::new(id, 1, t, event_type);
    e.team_id = Some(team);
    e.player_id = Some(team as u64 * 100 + id % 5);
    e.x = Some(if team == HOME { 65.0 } else { -65.0 });
    e.y = Some(-8.0);
    e.zone = Some(Zone::Offensive);
    e
}

/// Ten shots on goal each way, one of them a goal.
fn game(game_id: GameId) -> GameFeed {
    let mut events = Vec::new();
    for i in 0..10u64 {
        let home_type = if i == 4 { EventType::Goal } else { EventType::ShotOnGoal };
        let away_type = if i == 7 { EventType::Goal } else { EventType::ShotOnGoal };
        events.push(shot(i * 2 + 1, 60.0 + i as f64 * 90.0, home_type, HOME));
        events.push(shot(i * 2 + 2, 100.0 + i as f64 * 90.0, away_type, AWAY));
    }
    GameFeed {
        game_id,
        game_date: None,
        home_team: HOME,
        away_team: AWAY,
        events,
    }
}

fn request(game_ids: Vec<GameId>, window: usize) -> SeasonRequest {
    SeasonRequest {
        subject: Subject::Team { team_id: HOME },
        game_ids,
        config: AnalyticsConfig {
            rolling: RollingConfig { window },
            ..AnalyticsConfig::default()
        },
    }
}

struct FlakySource {
    inner: MemorySource,
    broken: GameId,
}

impl GameSource for FlakySource {
    fn fetch_game(&self, game_id: GameId) -> Result<GameFeed, SourceError> {
        if game_id == self.broken {
            return Err(SourceError::Unavailable {
                game_id,
                reason: "upstream returned 503".to_string(),
            });
        }
        self.inner.fetch_game(game_id)
    }
}

#[test]
fn test_pdo_of_average_games_is_exactly_100() {
    let source: MemorySource = (1..=5).map(game).collect();
    let outcome = run_season(&source, &request((1..=5).collect(), 5), &CancellationToken::new()).unwrap();
    let report = outcome.into_report().unwrap();

    assert_eq!(report.games_used, 5);
    assert_eq!(report.rolling.len(), 1);
    assert_eq!(report.rolling[0].pdo, Some(100.0));
    assert_eq!(report.rolling[0].corsi_pct, Some(50.0));
}

#[test]
fn test_one_failing_game_is_skipped() {
    let source = FlakySource {
        inner: (1..=6).map(game).collect(),
        broken: 3,
    };
    let outcome = run_season(&source, &request((1..=6).collect(), 2), &CancellationToken::new()).unwrap();
    let report = outcome.into_report().unwrap();

    assert_eq!(report.games_used, 5);
    assert_eq!(report.skipped_games.len(), 1);
    assert_eq!(report.skipped_games[0].game_id, 3);
    assert!(report.skipped_games[0].reason.contains("503"));
    assert_eq!(report.rolling.len(), 4);
    assert!(report.game_metrics.iter().all(|m| m.game_id != 3));
}

#[test]
fn test_window_longer_than_season_is_empty() {
    let source: MemorySource = (1..=5).map(game).collect();
    let outcome = run_season(&source, &request((1..=5).collect(), 10), &CancellationToken::new()).unwrap();
    let report = outcome.into_report().unwrap();

    assert!(report.rolling.is_empty());
    assert!(report.trends.iter().all(|t| t.trend == Trend::InsufficientData));
}

#[test]
fn test_cancelled_season_publishes_nothing() {
    let source: MemorySource = (1..=5).map(game).collect();
    let token = CancellationToken::new();
    token.cancel();
    let outcome = run_season(&source, &request((1..=5).collect(), 2), &token).unwrap();
    assert_eq!(outcome, SeasonOutcome::Cancelled { games_processed: 0 });
}

#[test]
fn test_breakaway_after_own_zone_takeaway() {
    let mut takeaway = PlayEvent::new(1, 2, 500.0, EventType::Takeaway);
    takeaway.team_id = Some(HOME);
    takeaway.player_id = Some(91);
    takeaway.zone = Some(Zone::Defensive);

    let mut attempt = shot(2, 503.0, EventType::ShotOnGoal, HOME);
    attempt.period = 2;
    attempt.player_id = Some(91);
    attempt.defenders_between = Some(0);

    let feed = GameFeed {
        game_id: 42,
        game_date: None,
        home_team: HOME,
        away_team: AWAY,
        events: vec![takeaway, attempt],
    };
    let analysis = analyze_game(&feed, &Subject::Team { team_id: HOME }, &AnalyticsConfig::default()).unwrap();
    assert_eq!(analysis.rush_attacks.len(), 1);
    assert_eq!(analysis.rush_attacks[0].kind, RushKind::Breakaway);
    assert_eq!(analysis.rush.breakaways, 1);
}
