//! Property tests over random seeds and random legal-move sequences.

use proptest::prelude::*;
use rustc_hash::FxHashSet;

use freecell_rules::cards::{create_standard_deck, Card, Deck, Suit, DECK_SIZE};
use freecell_rules::core::{FreeCellConfig, GameRng};
use freecell_rules::rules::{can_place_on_foundation, can_place_on_tableau, is_movable_run, RulesEngine, StandardRules};
use freecell_rules::state::GameState;

fn any_card() -> impl Strategy<Value = Card> {
    (0..4usize, 1..=13u8, any::<bool>()).prop_map(|(suit, rank, face_up)| Card {
        suit: Suit::ALL[suit],
        rank,
        face_up,
    })
}

proptest! {
    #[test]
    fn deck_deals_each_card_once(seed in any::<u64>()) {
        let mut deck = Deck::shuffled(&mut GameRng::new(seed));
        let mut seen = FxHashSet::default();
        let mut last_remaining = deck.remaining();

        while let Some(card) = deck.deal_next() {
            prop_assert!(seen.insert((card.suit, card.rank)));
            prop_assert_eq!(deck.remaining(), last_remaining - 1);
            last_remaining = deck.remaining();
        }

        prop_assert_eq!(seen.len(), DECK_SIZE);
        prop_assert_eq!(deck.remaining(), 0);
        prop_assert!(deck.deal_next().is_none());

        let canonical: FxHashSet<_> = create_standard_deck().iter().map(|c| (c.suit, c.rank)).collect();
        prop_assert_eq!(seen, canonical);
    }

    #[test]
    fn tableau_placement_matches_definition(card in any_card(), tail in any_card()) {
        let expected = tail.color() != card.color() && tail.rank == card.rank + 1;
        prop_assert_eq!(can_place_on_tableau(card, &[tail]), expected);
    }

    #[test]
    fn foundation_placement_matches_definition(card in any_card(), top in any_card()) {
        let expected = top.suit == card.suit && card.rank == top.rank + 1;
        prop_assert_eq!(can_place_on_foundation(card, &[top]), expected);
        prop_assert_eq!(can_place_on_foundation(card, &[]), card.rank == 1);
    }

    #[test]
    fn run_suffix_of_run_is_run(cards in prop::collection::vec(any_card(), 1..8), start in 0usize..8) {
        if is_movable_run(&cards, start) {
            for later in start..cards.len() {
                if cards[later].face_up {
                    prop_assert!(is_movable_run(&cards, later));
                }
            }
        }
    }

    #[test]
    fn random_play_conserves_and_undoes(seed in any::<u64>(), choices in prop::collection::vec(any::<prop::sample::Index>(), 0..40)) {
        let rules = StandardRules::new();
        let mut state = GameState::deal(FreeCellConfig::default(), seed);
        let initial = state.clone();

        for choice in &choices {
            let moves = rules.legal_moves(&state);
            if moves.is_empty() {
                break;
            }
            let mv = *choice.get(&moves);
            prop_assert!(state.play(&rules, &mv).is_ok());
            prop_assert!(state.check_conservation().is_ok());
        }

        while state.undo().is_some() {}
        prop_assert_eq!(state, initial);
    }
}
