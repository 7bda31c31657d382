use pacman_core::map::MapCategory;
use pacman_core::score::{MemoryHighScoreStore, Score, ScoreLedger};
use speculoos::prelude::*;

mod common;

#[test]
fn test_arcade_awards_one_extra_life_in_practice() {
    let mut ledger = common::create_ledger();
    ledger.use_category(MapCategory::Arcade);
    assert_that(&ledger.extra_life_scores().to_vec()).is_equal_to(vec![10_000, 970_000, 980_000, 990_000]);

    assert_that(&ledger.score_points(9_999)).is_equal_to(0);
    assert_that(&ledger.score_points(1)).is_equal_to(1);
    assert_that(&ledger.score_points(500_000)).is_equal_to(0);
}

#[test]
fn test_other_categories_extra_lives() {
    for category in [MapCategory::Mini, MapCategory::Big, MapCategory::Strange] {
        let mut ledger = common::create_ledger();
        ledger.use_category(category);
        assert_that(&ledger.extra_life_scores().to_vec()).is_equal_to(vec![10_000, 50_000, 100_000, 300_000]);
        assert_that(&ledger.score_points(300_000)).is_equal_to(4);
    }
}

#[test]
fn test_high_score_round_trip_through_store() {
    let store = MemoryHighScoreStore::with_score(Score {
        points: 2_500,
        level_number: 4,
    });
    let mut ledger = ScoreLedger::new(Box::new(store));
    ledger.load_high_score();
    assert_that(&ledger.high_score().points).is_equal_to(2_500);

    ledger.set_level_number(6);
    ledger.score_points(3_000);
    assert_that(&ledger.high_score()).is_equal_to(Score {
        points: 3_000,
        level_number: 6,
    });
    assert_that(&ledger.update_high_score().is_ok()).is_true();
}
