//! Lottery, wishes, bingo and achievements through the tracker

mod common;

use common::{daily, tracker_on, tracker_with};
use lifequest::Error;
use lifequest::config::Config;
use lifequest::domain::{Difficulty, DrawSource, Prize, PrizeKind, WishStatus};
use lifequest::engine::achievements::AchievementId;
use lifequest::tracker::{GamificationEvent, Tracker};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

fn config_with_pool(pool: Vec<Prize>) -> Config {
    Config {
        prize: pool,
        ..Config::default()
    }
}

fn unlocked(events: &[GamificationEvent], id: AchievementId) -> bool {
    events
        .iter()
        .any(|e| matches!(e, GamificationEvent::AchievementUnlocked(a) if a.id == id))
}

/// Complete one hard task for 33 points
fn earn_points(tracker: &Tracker) {
    let task = tracker.add_task(daily("Gym", Difficulty::Hard)).unwrap();
    tracker.toggle_task(&task.id).unwrap();
}

#[test]
fn test_spin_without_points_is_rejected() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker_on(&dir, "2024-03-04");
    let mut rng = StdRng::seed_from_u64(7);

    let err = tracker.spin_with(&mut rng).unwrap_err();
    assert_eq!(
        err.downcast_ref::<Error>(),
        Some(&Error::InsufficientPoints {
            required: 20,
            available: 0
        })
    );
    assert!(tracker.lottery_history().unwrap().is_empty());
}

#[test]
fn test_spin_spends_points_and_records_result() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker_on(&dir, "2024-03-04");
    earn_points(&tracker);

    let mut rng = StdRng::seed_from_u64(7);
    let outcome = tracker.spin_with(&mut rng).unwrap();
    assert_eq!(outcome.points, 13);
    assert_eq!(outcome.record.source, DrawSource::Points);
    assert!(!outcome.record.used);
    assert!(unlocked(&outcome.events, AchievementId::FirstSpin));

    let history = tracker.lottery_history().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, outcome.record.id);
    assert_eq!(tracker.status().unwrap().points, 13);
}

#[test]
fn test_bingo_line_grants_a_free_spin() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker_on(&dir, "2024-03-04");
    earn_points(&tracker);

    for index in 0..4 {
        assert_eq!(tracker.mark_cell(index).unwrap().granted, 0);
    }
    let outcome = tracker.mark_cell(4).unwrap();
    assert_eq!(outcome.granted, 1);
    assert_eq!(outcome.board.extra_draws, 1);
    assert!(outcome.events.contains(&GamificationEvent::BingoLines {
        granted: 1,
        total_lines: 1
    }));
    assert!(unlocked(&outcome.events, AchievementId::FirstLine));

    let mut rng = StdRng::seed_from_u64(1);
    let spin = tracker.spin_with(&mut rng).unwrap();
    assert_eq!(spin.record.source, DrawSource::BonusDraw);
    assert_eq!(spin.points, 33);
    assert_eq!(spin.extra_draws, 0);
}

#[test]
fn test_remarking_a_line_cell_grants_no_extra_draw() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker_on(&dir, "2024-03-04");
    for index in 0..5 {
        tracker.mark_cell(index).unwrap();
    }

    // Un-marking keeps the unspent draw
    let outcome = tracker.mark_cell(4).unwrap();
    assert_eq!(outcome.board.lines_completed, 0);
    assert_eq!(outcome.board.extra_draws, 1);

    let outcome = tracker.mark_cell(4).unwrap();
    assert_eq!(outcome.granted, 0);
    assert_eq!(outcome.board.lines_completed, 1);
    assert_eq!(outcome.board.extra_draws, 1);

    // Spend the one draw, then cycling the cell still earns nothing
    let mut rng = StdRng::seed_from_u64(9);
    tracker.spin_with(&mut rng).unwrap();
    for _ in 0..3 {
        tracker.mark_cell(4).unwrap();
        assert_eq!(tracker.mark_cell(4).unwrap().granted, 0);
    }

    let tracker = tracker_on(&dir, "2024-03-05");
    assert_eq!(tracker.board().unwrap().extra_draws, 0);
    let err = tracker.spin_with(&mut rng).unwrap_err();
    assert_eq!(
        err.downcast_ref::<Error>(),
        Some(&Error::InsufficientPoints {
            required: 20,
            available: 0
        })
    );
}

#[test]
fn test_empty_prize_pool_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker_with(&dir, "2024-03-04", config_with_pool(Vec::new()));
    earn_points(&tracker);

    let mut rng = StdRng::seed_from_u64(3);
    let err = tracker.spin_with(&mut rng).unwrap_err();
    assert_eq!(err.downcast_ref::<Error>(), Some(&Error::EmptyPrizePool));
    assert_eq!(tracker.status().unwrap().points, 33);
    assert!(tracker.lottery_history().unwrap().is_empty());
}

#[test]
fn test_wish_ticket_can_be_used_once() {
    let dir = TempDir::new().unwrap();
    let pool = vec![Prize::wish_ticket("Wish ticket", 1)];
    let tracker = tracker_with(&dir, "2024-03-04", config_with_pool(pool));
    earn_points(&tracker);

    let mut rng = StdRng::seed_from_u64(11);
    let record = tracker.spin_with(&mut rng).unwrap().record;
    assert_eq!(record.kind, PrizeKind::WishTicket);

    let used = tracker.use_ticket(&record.id[..8]).unwrap();
    assert!(used.used);
    assert!(tracker.lottery_history().unwrap()[0].used);

    let err = tracker.use_ticket(&record.id).unwrap_err();
    assert_eq!(
        err.downcast_ref::<Error>(),
        Some(&Error::TicketAlreadyUsed(record.id.clone()))
    );
}

#[test]
fn test_item_prize_is_not_a_ticket() {
    let dir = TempDir::new().unwrap();
    let pool = vec![Prize::new("Movie night", 1)];
    let tracker = tracker_with(&dir, "2024-03-04", config_with_pool(pool));
    earn_points(&tracker);

    let mut rng = StdRng::seed_from_u64(5);
    let record = tracker.spin_with(&mut rng).unwrap().record;
    assert_eq!(record.prize, "Movie night");

    let err = tracker.use_ticket(&record.id).unwrap_err();
    assert_eq!(
        err.downcast_ref::<Error>(),
        Some(&Error::NotAWishTicket(record.id.clone()))
    );
    assert!(tracker.use_ticket("missing").is_err());
}

#[test]
fn test_wish_lifecycle() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker_on(&dir, "2024-03-04");

    let wish = tracker.add_wish("  Visit Kyoto ").unwrap();
    assert_eq!(wish.title, "Visit Kyoto");
    assert_eq!(wish.status, WishStatus::Pending);

    let (wish, events) = tracker
        .set_wish_status(&wish.id, WishStatus::InProgress)
        .unwrap();
    assert_eq!(wish.status, WishStatus::InProgress);
    assert!(events.is_empty());

    let (wish, events) = tracker
        .set_wish_status(&wish.id, WishStatus::Completed)
        .unwrap();
    assert_eq!(wish.status, WishStatus::Completed);
    assert!(unlocked(&events, AchievementId::DreamComeTrue));

    tracker.delete_wish(&wish.id).unwrap();
    assert!(tracker.wishes().unwrap().is_empty());

    let err = tracker.delete_wish(&wish.id).unwrap_err();
    assert_eq!(
        err.downcast_ref::<Error>(),
        Some(&Error::WishNotFound(wish.id.clone()))
    );
    assert!(tracker.add_wish("   ").is_err());
}

#[test]
fn test_bingo_rolls_over_with_the_month() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker_on(&dir, "2024-03-31");
    let labels: Vec<String> = (1..=25).map(|i| format!("Goal {i}")).collect();
    tracker.set_bingo_labels(labels.clone()).unwrap();
    tracker.mark_cell(12).unwrap();

    let mut april = tracker_on(&dir, "2024-04-01");
    let events = april.take_startup_events();
    assert!(events.contains(&GamificationEvent::BingoRollover {
        month: "2024-04".to_string()
    }));

    let board = april.board().unwrap();
    assert_eq!(board.month, "2024-04");
    assert_eq!(board.completed_cells(), 0);
    assert_eq!(board.labels, labels);
}

#[test]
fn test_mark_cell_out_of_range() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker_on(&dir, "2024-03-04");
    let err = tracker.mark_cell(25).unwrap_err();
    assert_eq!(err.downcast_ref::<Error>(), Some(&Error::CellOutOfRange(25)));
}

#[test]
fn test_achievement_unlocks_only_once() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker_on(&dir, "2024-03-04");
    let task = tracker.add_task(daily("Read", Difficulty::Easy)).unwrap();

    let first = tracker.toggle_task(&task.id).unwrap();
    assert!(unlocked(&first.events, AchievementId::FirstTask));

    tracker.toggle_task(&task.id).unwrap();
    let again = tracker.toggle_task(&task.id).unwrap();
    assert!(!unlocked(&again.events, AchievementId::FirstTask));

    let statuses = tracker.achievements().unwrap();
    let first_task = statuses
        .iter()
        .find(|s| s.achievement.id == AchievementId::FirstTask)
        .unwrap();
    assert!(first_task.unlocked_at.is_some());
    assert_eq!(tracker.status().unwrap().achievements_unlocked, 1);
}
