use holdem_rs::history::HandEvent;
use holdem_rs::policy::{DecisionProvider, Difficulty, HeuristicPolicy, RandomPolicy};
use holdem_rs::table::{SeatSpec, Step, Table, TableConfig};
use proptest::prelude::*;

fn mixed_table(seed: u64, seats: usize, stack: u64) -> Table {
    let roster = (0..seats)
        .map(|i| {
            let provider_seed = Some(seed.wrapping_mul(31).wrapping_add(i as u64));
            let provider: Box<dyn DecisionProvider> = match i % 3 {
                0 => Box::new(RandomPolicy::new(provider_seed)),
                1 => Box::new(HeuristicPolicy::new(Difficulty::Easy, provider_seed)),
                _ => Box::new(HeuristicPolicy::new(Difficulty::Hard, provider_seed)),
            };
            SeatSpec { name: format!("S{i}"), stack, provider }
        })
        .collect();
    Table::new(TableConfig::default().with_seed(seed), roster)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn chips_are_conserved_at_every_step(seed in any::<u64>(), seats in 2usize..=6, stack in 60u64..2000) {
        let mut t = mixed_table(seed, seats, stack);
        let total = stack * seats as u64;
        for _ in 0..8 {
            if t.is_game_over() {
                break;
            }
            t.start_hand().unwrap();
            loop {
                let step = t.step().unwrap();
                prop_assert_eq!(t.chips_in_play(), total);
                if t.phase().in_hand() {
                    let committed: u64 = t.seats().iter().map(|s| s.hand_contribution()).sum();
                    prop_assert_eq!(t.pot(), committed);
                }
                prop_assert!(!matches!(step, Step::Awaiting(_)));
                if let Step::Settled(s) = step {
                    prop_assert_eq!(s.total_paid(), s.pot);
                    prop_assert!(s.remainder < s.winners.len() as u64);
                    break;
                }
            }
            let rejected = t.events().iter().any(|e| matches!(e, HandEvent::Rejected { .. }));
            prop_assert!(!rejected, "an AI move was refused");
        }
    }

    #[test]
    fn same_seed_same_game(seed in any::<u64>()) {
        let mut a = mixed_table(seed, 4, 500);
        let mut b = mixed_table(seed, 4, 500);
        for _ in 0..3 {
            if a.is_game_over() {
                break;
            }
            let sa = a.play_hand().unwrap();
            let sb = b.play_hand().unwrap();
            prop_assert_eq!(sa, sb);
        }
        let stacks_a: Vec<u64> = a.seats().iter().map(|s| s.stack()).collect();
        let stacks_b: Vec<u64> = b.seats().iter().map(|s| s.stack()).collect();
        prop_assert_eq!(stacks_a, stacks_b);
    }
}
