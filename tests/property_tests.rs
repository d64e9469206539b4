//! Property-based tests for game-wide invariants.
//!
//! Random move sequences, most of them illegal, are thrown at a seeded game.
//! After every step the 52 cards must still be accounted for, foundation
//! piles must stay ordered, and a rejected move must leave no trace. At the
//! end, undoing everything has to land back on the initial deal, whether
//! the log was kept in memory or went through export and import.

use proptest::prelude::*;

use rust_klondike::{
    ActionRecord, Klondike, Piles, ScoringConfig, Suit, UndoLog, TABLEAU_COLUMNS,
};

#[derive(Clone, Debug)]
enum Move {
    Deal,
    Tableau(Option<isize>, Option<isize>, Option<isize>),
    Waste(Option<isize>),
    Foundation(Suit, Option<isize>),
}

fn column() -> impl Strategy<Value = isize> {
    -1isize..=TABLEAU_COLUMNS as isize
}

fn move_strategy() -> impl Strategy<Value = Move> {
    prop_oneof![
        3 => Just(Move::Deal),
        4 => (
            proptest::option::of(column()),
            proptest::option::of(-8isize..8),
            proptest::option::of(column()),
        )
            .prop_map(|(pile, card, destination)| Move::Tableau(pile, card, destination)),
        2 => proptest::option::of(column()).prop_map(Move::Waste),
        1 => (0usize..4, proptest::option::of(column()))
            .prop_map(|(suit, destination)| Move::Foundation(Suit::ALL[suit], destination)),
    ]
}

fn apply(game: &mut Klondike, mv: &Move) -> bool {
    let result = match *mv {
        Move::Deal => game.deal(),
        Move::Tableau(pile, card, destination) => game.select_tableau(pile, card, destination),
        Move::Waste(destination) => game.select_waste(destination),
        Move::Foundation(suit, destination) => game.select_foundation(suit, destination),
    };
    result.is_ok()
}

fn foundation_ordered(piles: &Piles) -> bool {
    Suit::ALL.iter().all(|&suit| {
        piles
            .foundation
            .pile(suit)
            .iter()
            .enumerate()
            .all(|(i, card)| card.suit == suit && card.face_up && card.rank.value() as usize == i + 1)
    })
}

fn quiet_game(seed: u64) -> Klondike {
    Klondike::builder()
        .scoring(ScoringConfig::disabled())
        .build(seed)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: every accepted move keeps the deck intact, every rejected
    /// move changes nothing.
    #[test]
    fn prop_moves_conserve_cards(
        seed in any::<u64>(),
        moves in prop::collection::vec(move_strategy(), 0..150),
    ) {
        let mut game = quiet_game(seed);

        for mv in &moves {
            let before = game.piles().clone();
            let turns = game.undo_log().len();

            if apply(&mut game, mv) {
                prop_assert_eq!(game.undo_log().len(), turns + 1, "{:?}", mv);
            } else {
                prop_assert!(game.piles().same_layout(&before), "{:?} left a trace", mv);
                prop_assert_eq!(game.undo_log().len(), turns);
            }

            prop_assert!(game.verify_conservation().is_ok(), "{:?}", mv);
            prop_assert!(foundation_ordered(game.piles()), "{:?}", mv);
        }
    }

    /// Property: undoing every turn restores the initial deal exactly.
    #[test]
    fn prop_undo_all_restores_deal(
        seed in any::<u64>(),
        moves in prop::collection::vec(move_strategy(), 0..150),
    ) {
        let mut game = quiet_game(seed);
        let initial = game.piles().clone();

        for mv in &moves {
            apply(&mut game, mv);
        }
        let turns = game.undo_log().len();

        for _ in 0..turns {
            prop_assert!(game.undo().unwrap());
        }
        prop_assert!(!game.undo().unwrap());
        prop_assert!(game.piles().same_layout(&initial));
        prop_assert_eq!(game.score(), 0);
    }

    /// Property: an exported log, taken through JSON and imported, undoes
    /// the same way the in-memory log does.
    #[test]
    fn prop_exported_log_is_equivalent(
        seed in any::<u64>(),
        moves in prop::collection::vec(move_strategy(), 0..150),
    ) {
        let mut game = quiet_game(seed);
        let initial = game.piles().clone();

        for mv in &moves {
            apply(&mut game, mv);
        }

        let json = serde_json::to_string(&game.export_undo_log()).unwrap();
        let records: Vec<Vec<ActionRecord>> = serde_json::from_str(&json).unwrap();

        let mut restored = game.clone();
        restored.replace_undo_log(UndoLog::new());
        restored.import_undo_log(&records).unwrap();
        prop_assert_eq!(restored.undo_log(), game.undo_log());

        loop {
            let a = game.undo().unwrap();
            let b = restored.undo().unwrap();
            prop_assert_eq!(a, b);
            prop_assert!(game.piles().same_layout(restored.piles()));
            if !a {
                break;
            }
        }
        prop_assert!(restored.piles().same_layout(&initial));
    }
}
