use holdem_rs::cards::{parse_cards, Card};
use holdem_rs::deck::{Deck, DeckError, DECK_SIZE};
use std::collections::HashSet;

#[test]
fn fifty_two_distinct_then_exhausted() {
    let mut deck = Deck::shuffled(2024);
    let mut seen: HashSet<Card> = HashSet::new();
    for _ in 0..DECK_SIZE {
        assert!(seen.insert(deck.draw().unwrap()));
    }
    assert_eq!(seen.len(), 52);
    assert!(deck.is_empty());
    assert_eq!(deck.draw(), Err(DeckError::Exhausted));
    assert_eq!(deck.draw_n(1), Err(DeckError::Exhausted));
}

#[test]
fn stacked_deck_deals_in_the_given_order() {
    let top = parse_cards("As Kd 2c").unwrap();
    let mut deck = Deck::stacked(&top).unwrap();
    assert_eq!(deck.len(), 52);
    assert_eq!(deck.draw_n(3).unwrap(), top);
}

#[test]
fn explicit_decks_are_validated() {
    let mut cards: Vec<Card> = {
        let mut d = Deck::standard();
        (0..52).map(|_| d.draw().unwrap()).collect()
    };
    assert!(Deck::from_cards(cards.clone()).is_ok());
    cards[0] = cards[1];
    assert!(matches!(Deck::from_cards(cards.clone()), Err(DeckError::InvalidDeck(_))));
    cards.pop();
    assert!(matches!(Deck::from_cards(cards), Err(DeckError::InvalidDeck(_))));
    assert!(Deck::stacked(&parse_cards("As As").unwrap()).is_err());
}
