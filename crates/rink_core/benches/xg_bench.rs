use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rink_core::analysis::metrics::aggregate_game;
use rink_core::config::AnalyticsConfig;
use rink_core::models::{EventType, GameFeed, PlayEvent, Subject, Zone};
use rink_core::{analyze_game, XgScorer};

/// A busy game: ~60 attempts each way interleaved with possession events.
fn synthetic_game() -> GameFeed {
    let mut events = Vec::new();
    let mut id = 0u64;
    for period in 1..=3u8 {
        for i in 0..40u32 {
            let team = if i % 2 == 0 { 1 } else { 2 };
            let sign = if team == 1 { 1.0 } else { -1.0 };
            let t = i as f64 * 29.0;

            id += 1;
            let mut carry = PlayEvent::new(id, period, t, EventType::Possession);
            carry.team_id = Some(team);
            carry.player_id = Some(team as u64 * 10 + (i % 5) as u64);
            carry.x = Some(sign * 40.0);
            carry.y = Some(if i % 3 == 0 { 18.0 } else { -12.0 });
            carry.zone = Some(if i % 4 == 0 { Zone::Neutral } else { Zone::Offensive });
            events.push(carry);

            id += 1;
            let event_type = match i % 5 {
                0 => EventType::BlockedShot,
                1 => EventType::MissedShot,
                4 if i % 10 == 4 => EventType::Goal,
                _ => EventType::ShotOnGoal,
            };
            let mut shot = PlayEvent::new(id, period, t + 2.0, event_type);
            shot.team_id = Some(team);
            shot.player_id = Some(team as u64 * 10 + ((i + 1) % 5) as u64);
            shot.x = Some(sign * (55.0 + (i % 30) as f64));
            shot.y = Some(((i % 7) as f64 - 3.0) * 5.0);
            shot.zone = Some(Zone::Offensive);
            events.push(shot);
        }
    }
    GameFeed {
        game_id: 2024020999,
        game_date: None,
        home_team: 1,
        away_team: 2,
        events,
    }
}

fn bench_score_all(c: &mut Criterion) {
    let feed = synthetic_game();
    let scorer = XgScorer::default();
    c.bench_function("xg_score_all", |b| b.iter(|| scorer.score_all(black_box(&feed.events))));
}

fn bench_aggregate(c: &mut Criterion) {
    let feed = synthetic_game();
    let scorer = XgScorer::default();
    let subject = Subject::Team { team_id: 1 };
    c.bench_function("aggregate_game", |b| {
        b.iter(|| aggregate_game(black_box(&feed), black_box(&subject), &scorer))
    });
}

fn bench_full_analysis(c: &mut Criterion) {
    let feed = synthetic_game();
    let config = AnalyticsConfig::default();
    let subject = Subject::Team { team_id: 1 };
    c.bench_function("analyze_game", |b| {
        b.iter(|| analyze_game(black_box(&feed), black_box(&subject), &config))
    });
}

criterion_group!(benches, bench_score_all, bench_aggregate, bench_full_analysis);
criterion_main!(benches);
