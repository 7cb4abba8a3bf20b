use crush_core::{Promotion, Swap, TileMask, Token, TokenKind};
use crush_engine::{detect_chains, Level, LevelLayout, Outcome, Phase};

const LEVEL_1: &str = include_str!("../../../levels/level_1.json");

fn snapshot(level: &Level) -> Vec<(usize, usize, TokenKind, Promotion)> {
    level
        .tokens()
        .iter()
        .map(|(c, r, t)| (c, r, t.kind, t.promotion))
        .collect()
}

fn first_swap_sorted(level: &Level) -> Swap {
    let mut swaps: Vec<Swap> = level.legal_swaps().iter().copied().collect();
    swaps.sort_by_key(|s| (s.a.column, s.a.row, s.b.column, s.b.row));
    swaps[0]
}

mod dealing {
    use super::*;

    #[test]
    fn test_level_file_deals_a_playable_board() {
        let layout = LevelLayout::from_json(LEVEL_1).expect("bundled level parses");
        let mut level = Level::with_seed(layout, 4);
        let created = level.shuffle();
        // 81 cells minus the four masked corners
        assert_eq!(created.len(), 77);
        assert!(level.token_at(1, 0).is_some());
        assert!(level.token_at(0, 0).is_none());
        assert!(level.token_at(0, 8).is_none());
        assert!(!level.legal_swaps().is_empty());
        assert!(detect_chains(level.tokens(), level.mask()).is_empty());
    }

    #[test]
    fn test_every_dealt_board_is_match_free_and_playable() {
        for seed in 0..50 {
            let layout = LevelLayout::new(TileMask::full(9, 9), 1000, 15).expect("layout");
            let mut level = Level::with_seed(layout, seed);
            level.shuffle();
            assert!(
                detect_chains(level.tokens(), level.mask()).is_empty(),
                "seed {} dealt an immediate match",
                seed
            );
            assert!(
                !level.legal_swaps().is_empty(),
                "seed {} dealt an unplayable board",
                seed
            );
        }
    }
}

mod turns {
    use super::*;

    #[test]
    fn test_full_turn_leaves_a_settled_full_board() {
        let layout = LevelLayout::from_json(LEVEL_1).expect("bundled level parses");
        let mut level = Level::with_seed(layout, 21);
        level.shuffle();
        let report = level.play(&first_swap_sorted(&level)).expect("legal swap");

        assert!(!report.steps.is_empty());
        assert!(report.score_gained >= 60);
        assert_eq!(report.score, level.score());
        assert_eq!(report.moves_left, 14);
        assert_eq!(level.phase(), Phase::AwaitingInput);

        // cascade settled: no chains remain, every playable cell is occupied
        assert!(detect_chains(level.tokens(), level.mask()).is_empty());
        for row in 0..level.height() {
            for column in 0..level.width() {
                assert_eq!(
                    level.token_at(column, row).is_some(),
                    level.is_playable(column, row)
                );
            }
        }
    }

    #[test]
    fn test_cascade_steps_report_consistent_scores() {
        let layout = LevelLayout::new(TileMask::full(9, 9), 1_000_000, 15).expect("layout");
        let mut level = Level::with_seed(layout, 8);
        level.shuffle();
        let report = level.play(&first_swap_sorted(&level)).expect("legal swap");
        let total: u32 = report
            .steps
            .iter()
            .flat_map(|step| step.chains.iter())
            .map(|chain| chain.score)
            .sum();
        assert_eq!(total, report.score_gained);
    }

    #[test]
    fn test_rejected_swap_changes_nothing() {
        let layout = LevelLayout::new(TileMask::full(9, 9), 1000, 15).expect("layout");
        let mut level = Level::with_seed(layout, 12);
        level.shuffle();
        let before = snapshot(&level);
        let a = *level.token_at(0, 0).expect("token");
        let b = *level.token_at(8, 8).expect("token");
        let err = level.play(&Swap::new(a, b)).expect_err("not adjacent");
        assert_eq!(err.0, Swap::new(a, b));
        assert_eq!(snapshot(&level), before);
        assert_eq!(level.moves_left(), 15);
    }

    #[test]
    fn test_identical_seeds_replay_identically() {
        let play_three_turns = || {
            let layout = LevelLayout::new(TileMask::full(9, 9), 1_000_000, 15).expect("layout");
            let mut level = Level::with_seed(layout, 77);
            level.shuffle();
            let mut scores = Vec::new();
            for _ in 0..3 {
                let report = level.play(&first_swap_sorted(&level)).expect("legal swap");
                scores.push(report.score);
            }
            (scores, snapshot(&level))
        };
        assert_eq!(play_three_turns(), play_three_turns());
    }

    #[test]
    fn test_moves_run_out() {
        let layout = LevelLayout::new(TileMask::full(9, 9), 1_000_000, 2).expect("layout");
        let mut level = Level::with_seed(layout, 31);
        level.shuffle();
        let report = level.play(&first_swap_sorted(&level)).expect("legal swap");
        assert_eq!(report.outcome, None);
        let report = level.play(&first_swap_sorted(&level)).expect("legal swap");
        assert_eq!(report.outcome, Some(Outcome::OutOfMoves));
        assert_eq!(level.moves_left(), 0);
    }
}

mod specials {
    use super::*;

    #[test]
    fn test_swapping_a_super_clears_its_partner_kind() {
        let layout = LevelLayout::new(TileMask::full(6, 6), 1_000_000, 10).expect("layout");
        let mut level = Level::with_seed(layout, 2);
        // checkerboard of three kinds, then drop in a super
        let kinds = [TokenKind::Croissant, TokenKind::Danish, TokenKind::Macaroon];
        for row in 0..6 {
            for column in 0..6 {
                level.place(column, row, kinds[(column + 2 * row) % 3], Promotion::None);
            }
        }
        level.place(2, 2, TokenKind::Donut, Promotion::Super);
        level.recompute_legal_moves();

        let partner = *level.token_at(2, 1).expect("partner");
        let super_token = *level.token_at(2, 2).expect("super");
        let swap = Swap::new(super_token, partner);
        assert!(level.is_legal(&swap), "a super paired with anything is legal");

        let report = level.play(&swap).expect("legal swap");
        assert!(!report.steps.is_empty());
        let sweep_scored = report
            .steps
            .iter()
            .flat_map(|step| step.chains.iter())
            .any(|chain| chain.tokens().iter().any(Token::is_super));
        assert!(sweep_scored, "the super token detonated");
    }
}
