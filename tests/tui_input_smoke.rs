use holdem_rs::table::Phase;
use holdem_rs::tui::app::{AppState, InputAction, Scene};

fn setup_table_app() -> AppState {
    let mut app = AppState::default();
    app.cfg_seed = Some(5);
    app.apply_menu();
    app
}

#[test]
fn menu_navigation_and_apply() {
    let mut app = AppState::default();
    assert!(matches!(app.scene, Scene::Menu));
    let start = app.menu_index;
    let _ = app.handle_input(InputAction::MenuNext);
    assert_ne!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuPrev);
    assert_eq!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuApply);
    assert!(matches!(app.scene, Scene::Table));
}

#[test]
fn menu_edits_shape_the_new_table() {
    let mut app = AppState::default();
    let opponents = app.cfg_opponents;
    let _ = app.handle_input(InputAction::MenuInc);
    let _ = app.handle_input(InputAction::MenuApply);
    assert_eq!(app.table.seats().len(), opponents + 2);

    app.open_menu();
    assert_eq!(app.cfg_opponents, opponents + 1);
    for _ in 0..20 {
        let _ = app.handle_input(InputAction::MenuDec);
    }
    assert_eq!(app.cfg_opponents, 1);
    let _ = app.handle_input(InputAction::MenuApply);
    assert_eq!(app.table.seats().len(), 2);
}

#[test]
fn help_and_history_toggle() {
    let mut app = setup_table_app();
    let _ = app.handle_input(InputAction::ToggleHelp);
    assert!(app.help_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.help_open());
    assert!(app.history_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.history_open());
}

#[test]
fn amount_entry_edit_and_cancel() {
    let mut app = setup_table_app();
    assert!(app.handle_input(InputAction::NewHand));
    let expected = app.table.config().min_raise.to_string();

    assert!(app.handle_input(InputAction::AmountOpen));
    assert!(app.amount_entry_active());
    assert_eq!(app.amount_entry_text(), Some(expected.as_str()));

    let _ = app.handle_input(InputAction::AmountDigit(5));
    let appended = format!("{expected}5");
    assert_eq!(app.amount_entry_text(), Some(appended.as_str()));

    let _ = app.handle_input(InputAction::AmountBackspace);
    assert_eq!(app.amount_entry_text(), Some(expected.as_str()));

    let _ = app.handle_input(InputAction::AmountCancel);
    assert!(!app.amount_entry_active());
}

#[test]
fn amount_entry_rejects_out_of_range_raises() {
    let mut app = setup_table_app();
    app.handle_input(InputAction::NewHand);
    app.handle_input(InputAction::AmountOpen);
    app.handle_input(InputAction::AmountBackspace);
    app.handle_input(InputAction::AmountBackspace);
    app.handle_input(InputAction::AmountDigit(1));
    assert!(!app.handle_input(InputAction::AmountSubmit));
    assert!(app.amount_entry_error().is_some());
    assert!(app.amount_entry_active());

    for d in [9, 9, 9, 9] {
        app.handle_input(InputAction::AmountDigit(d));
    }
    assert!(!app.handle_input(InputAction::AmountSubmit));
    assert!(app.human_to_act());

    app.handle_input(InputAction::AmountCancel);
    app.handle_input(InputAction::AmountOpen);
    app.handle_input(InputAction::AmountInc);
    assert!(app.handle_input(InputAction::AmountSubmit));
    assert!(!app.amount_entry_active());
    assert_eq!(app.table.seats()[AppState::HUMAN_SEAT].street_contribution(), 100);
}

#[test]
fn human_moves_then_ticks_finish_the_hand() {
    let mut app = setup_table_app();
    assert!(app.handle_input(InputAction::NewHand));
    assert!(!app.handle_input(InputAction::NewHand));
    for _ in 0..500 {
        if !app.table.phase().in_hand() {
            break;
        }
        if app.human_to_act() {
            assert!(app.handle_input(InputAction::CheckCall));
        } else {
            app.on_tick();
        }
    }
    assert_eq!(app.table.phase(), Phase::Settled);
    assert!(app.history_len() > 0);
    assert!(app.handle_input(InputAction::NewHand));
    assert_eq!(app.table.hand_number(), 2);
}
