use holdem_rs::betting::{
    Action, ActionError, BettingRound, BettingStatus, HandCompleteReason, IllegalAction, Street,
};
use holdem_rs::seat::Seat;

fn seats(stacks: &[u64]) -> Vec<Seat> {
    stacks.iter().enumerate().map(|(i, &s)| Seat::new(i, format!("P{i}"), s)).collect()
}

#[test]
fn raise_reopens_action_for_everyone_else() {
    let mut s = seats(&[1000, 1000, 1000]);
    let mut pot = 0;
    let mut round = BettingRound::open(Street::Flop, &s, 0, 50);
    assert_eq!(round.status(), BettingStatus::AwaitingAction(0));

    round.submit(&mut s, &mut pot, 0, Action::Check).unwrap();
    round.submit(&mut s, &mut pot, 1, Action::Raise(100)).unwrap();
    assert_eq!(round.state().to_act, vec![0, 2]);
    assert_eq!(round.state().last_raiser, Some(1));
    round.submit(&mut s, &mut pot, 2, Action::Call).unwrap();

    // seat 0 checked earlier but now owes 100, so the street cannot close
    assert_eq!(round.status(), BettingStatus::AwaitingAction(0));
    assert_eq!(round.to_call(&s[0]), 100);

    let status = round.submit(&mut s, &mut pot, 0, Action::Call).unwrap();
    assert_eq!(status, BettingStatus::StreetComplete);
    assert_eq!(pot, 300);
    assert!(s.iter().all(|seat| seat.street_contribution() == round.table_bet()));
}

#[test]
fn reraise_reopens_the_first_raiser() {
    let mut s = seats(&[1000, 1000]);
    let mut pot = 0;
    let mut round = BettingRound::open(Street::Preflop, &s, 0, 50);
    round.submit(&mut s, &mut pot, 0, Action::Raise(50)).unwrap();
    round.submit(&mut s, &mut pot, 1, Action::Raise(100)).unwrap();
    assert_eq!(round.to_act(), Some(0));
    assert_eq!(round.min_raise_to(), 200);
    assert_eq!(round.to_call(&s[0]), 50);
    round.submit(&mut s, &mut pot, 0, Action::Call).unwrap();
    assert_eq!(round.status(), BettingStatus::StreetComplete);
    assert_eq!(pot, 200);
    assert_eq!(s[0].stack() + s[1].stack() + pot, 2000);
}

#[test]
fn refused_moves_change_nothing() {
    let mut s = seats(&[1000, 80, 1000]);
    let mut pot = 0;
    let mut round = BettingRound::open(Street::Turn, &s, 0, 50);
    round.submit(&mut s, &mut pot, 0, Action::Raise(60)).unwrap();

    let before_seats = s.clone();
    let before_state = round.state();
    let before_pot = pot;

    let cases = [
        (2, Action::Call, ActionError::Illegal(IllegalAction::NotYourTurn { expected: Some(1), got: 2 })),
        (1, Action::Check, ActionError::Illegal(IllegalAction::CannotCheck { to_call: 60 })),
        (1, Action::Raise(100), ActionError::Illegal(IllegalAction::RaiseTooSmall { min: 120, got: 100 })),
        (1, Action::Raise(200), ActionError::InsufficientChips { needed: 200, stack: 80 }),
    ];
    for (seat, action, expected) in cases {
        assert_eq!(round.submit(&mut s, &mut pot, seat, action), Err(expected));
        assert_eq!(s, before_seats);
        assert_eq!(round.state(), before_state);
        assert_eq!(pot, before_pot);
    }
}

#[test]
fn call_needs_something_to_call() {
    let mut s = seats(&[1000, 1000]);
    let mut pot = 0;
    let mut round = BettingRound::open(Street::River, &s, 0, 50);
    assert_eq!(
        round.submit(&mut s, &mut pot, 0, Action::Call),
        Err(ActionError::Illegal(IllegalAction::NothingToCall))
    );
    assert_eq!(
        round.submit(&mut s, &mut pot, 0, Action::Raise(49)),
        Err(ActionError::Illegal(IllegalAction::RaiseTooSmall { min: 50, got: 49 }))
    );
}

#[test]
fn short_stack_calls_all_in() {
    let mut s = seats(&[1000, 80]);
    let mut pot = 0;
    let mut round = BettingRound::open(Street::Preflop, &s, 0, 50);
    round.submit(&mut s, &mut pot, 0, Action::Raise(200)).unwrap();
    let status = round.submit(&mut s, &mut pot, 1, Action::Call).unwrap();
    assert_eq!(status, BettingStatus::StreetComplete);
    assert!(s[1].is_all_in());
    assert_eq!(pot, 280);
}

#[test]
fn last_fold_completes_the_hand() {
    let mut s = seats(&[1000, 1000, 1000]);
    let mut pot = 0;
    let mut round = BettingRound::open(Street::Flop, &s, 1, 50);
    assert_eq!(round.to_act(), Some(1));
    round.submit(&mut s, &mut pot, 1, Action::Raise(50)).unwrap();
    round.submit(&mut s, &mut pot, 2, Action::Fold).unwrap();
    let status = round.submit(&mut s, &mut pot, 0, Action::Fold).unwrap();
    assert_eq!(status, BettingStatus::HandComplete(HandCompleteReason::AllButOneFolded));
    assert_eq!(
        round.submit(&mut s, &mut pot, 1, Action::Check),
        Err(ActionError::Illegal(IllegalAction::BettingClosed))
    );
}

#[test]
fn street_with_one_actor_completes_at_once() {
    let s = seats(&[0, 500]);
    let round = BettingRound::open(Street::Turn, &s, 0, 50);
    assert_eq!(round.status(), BettingStatus::StreetComplete);
}

#[test]
fn folded_seats_are_skipped_on_later_streets() {
    let mut s = seats(&[500, 500, 500]);
    let mut pot = 0;
    let mut round = BettingRound::open(Street::Preflop, &s, 0, 50);
    round.submit(&mut s, &mut pot, 0, Action::Fold).unwrap();
    round.submit(&mut s, &mut pot, 1, Action::Check).unwrap();
    round.submit(&mut s, &mut pot, 2, Action::Check).unwrap();
    assert_eq!(round.status(), BettingStatus::StreetComplete);

    let round = BettingRound::open(Street::Flop, &s, 0, 50);
    assert_eq!(round.status(), BettingStatus::AwaitingAction(1));
    assert_eq!(round.state().to_act, vec![1, 2]);
}
