use crate::betting::{HandCompleteReason, Street};
use crate::cards::Card;
use crate::policy::SeatKind;
use crate::seat::Seat;
use crate::table::Phase;
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let header_height: u16 = 2 + 2;
    let status_height: u16 = 3 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(status_height),
        ])
        .split(size);

    draw_header(f, app, chunks[0]);
    draw_board(f, app, chunks[1]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[2]);
    draw_seats(f, app, middle[0]);
    draw_events(f, app, middle[1]);
    draw_status(f, app, chunks[3]);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    } else if app.amount_entry_active() {
        draw_amount_entry(f, app);
    } else if app.game_over() {
        draw_game_over(f, app);
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "Waiting",
        Phase::Dealing => "Dealing",
        Phase::Preflop => "Preflop",
        Phase::Flop => "Flop",
        Phase::Turn => "Turn",
        Phase::River => "River",
        Phase::Showdown => "Showdown",
        Phase::Settled => "Settled",
    }
}

fn draw_header(f: &mut Frame, app: &AppState, area: Rect) {
    let table = &app.table;
    let mut lines = vec![Line::from(format!(
        "Hand #{}   {}   Pot: ${}   Min raise: {}",
        table.hand_number(),
        phase_label(table.phase()),
        table.pot(),
        table.config().min_raise,
    ))];
    let bet_line = match (table.betting(), table.turn_context(AppState::HUMAN_SEAT)) {
        (Some(b), Ok(ctx)) => format!(
            "Bet: {}   Raise to: {}+   You call: {}",
            b.table_bet, b.min_raise_to, ctx.to_call
        ),
        (Some(b), Err(_)) => format!("Bet: {}   Raise to: {}+", b.table_bet, b.min_raise_to),
        (None, _) => String::from("No betting open"),
    };
    lines.push(Line::from(bet_line));
    let header = Paragraph::new(lines).block(Block::default().title("holdem-rs").borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_board(f: &mut Frame, app: &AppState, area: Rect) {
    let street = match app.table.phase() {
        Phase::Preflop => Some(Street::Preflop),
        Phase::Flop => Some(Street::Flop),
        Phase::Turn => Some(Street::Turn),
        Phase::River => Some(Street::River),
        _ => None,
    };
    let board_block = Block::default().title(format!("Board: {}", phase_label(app.table.phase()))).borders(Borders::ALL);
    let board_inner = inner(area);
    let card_width = board_inner.width.saturating_sub(2) / 5;
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(card_width); 5])
        .split(board_inner);
    f.render_widget(board_block, area);
    let board = app.table.board().as_slice();
    for (i, slot) in slots.iter().enumerate() {
        // newest street's cards stand out
        let fresh = match street {
            Some(Street::Flop) => i < 3,
            Some(Street::Turn) => i == 3,
            Some(Street::River) => i == 4,
            _ => false,
        };
        render_card_widget(f, *slot, board.get(i).copied(), fresh.then_some(Color::Yellow));
    }
}

/// Seats in two rows: left to right along the top, then right to left along the bottom.
fn draw_seats(f: &mut Frame, app: &AppState, area: Rect) {
    let seats = app.table.seats();
    let total = seats.len();
    let top_cols = total.div_ceil(2) as u16;
    let bottom_cols = (total as u16).saturating_sub(top_cols);
    let row_height = area.height / 2;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(row_height), Constraint::Length(row_height)])
        .split(area);
    for (r, cols) in [top_cols, bottom_cols].into_iter().enumerate() {
        if cols == 0 {
            continue;
        }
        let col_width = area.width / cols;
        let col_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints((0..cols).map(|_| Constraint::Length(col_width)).collect::<Vec<_>>())
            .split(rows[r]);
        for c in 0..cols as usize {
            let idx = if r == 0 { c } else { total - 1 - c };
            if let Some(seat) = seats.get(idx) {
                render_seat(f, col_chunks[c], app, seat);
            }
        }
    }
}

fn render_seat(f: &mut Frame, area: Rect, app: &AppState, seat: &Seat) {
    let idx = seat.index();
    let table = &app.table;
    let settled = table.phase() == Phase::Settled;
    let settlement = table.last_settlement().filter(|_| settled);
    let to_act = table.to_act() == Some(idx);

    let mut title = format!("P{} {}", idx + 1, seat.name());
    if let Some(SeatKind::Ai) = table.seat_kind(idx) {
        title.push_str(&format!(" [AI:{}]", app.difficulty));
    }
    if seat.is_all_in() && table.phase().in_hand() {
        title.push_str(" [ALL-IN]");
    }
    if to_act {
        title.push_str(" [Act]");
    }

    let status = if seat.is_sitting_out() {
        "Out"
    } else if seat.is_folded() {
        "Folded"
    } else if seat.is_all_in() {
        "All-in"
    } else {
        "Active"
    };
    let dim = Style::default().add_modifier(Modifier::DIM);
    let make_line = |label: &str, value: Option<String>| -> Line {
        match value {
            Some(v) => Line::from(format!("{label}{v}")),
            None => Line::from(vec![Span::raw(label.to_string()), Span::styled("--", dim)]),
        }
    };
    let shown = settlement.and_then(|s| s.showdown.iter().find(|(i, _)| *i == idx)).map(|(_, score)| score);
    let won = settlement.and_then(|s| s.payouts.iter().find(|p| p.seat == idx)).map(|p| p.amount);

    let lines = vec![
        Line::from(format!("Stack: ${}", seat.stack())),
        Line::from(format!("Bet: {}", seat.street_contribution())),
        Line::from(format!("Status: {status}")),
        make_line("Last: ", seat.last_action().map(|a| a.to_string())),
        make_line("Hand: ", shown.map(|s| s.category.to_string())),
        make_line("Won: ", won.map(|w| format!("${w}"))),
    ];

    let mut block = Block::default().title(title).borders(Borders::ALL);
    if seat.is_folded() || seat.is_sitting_out() {
        block = block.border_style(Style::default().fg(Color::DarkGray));
    } else if won.is_some() {
        block = block.border_style(Style::default().fg(Color::Green));
    } else if to_act {
        block = block.border_style(Style::default().fg(Color::Yellow));
    } else if idx == AppState::HUMAN_SEAT {
        block = block.border_style(Style::default().fg(Color::Cyan));
    }
    f.render_widget(block, area);

    let reveal = idx == AppState::HUMAN_SEAT
        || settlement.is_some_and(|s| s.reason == HandCompleteReason::ShowdownReached && seat.is_live());
    let seat_inner = inner(area);
    let mut text_area = seat_inner;
    let mut cards_area = None;
    if reveal && seat.hole().is_some() && seat_inner.height > 3 {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(seat_inner);
        text_area = split[0];
        cards_area = Some(split[1]);
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), text_area);
    if let (Some(h), Some(area)) = (seat.hole(), cards_area) {
        let cw = area.width.saturating_sub(2) / 2;
        let card_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(cw), Constraint::Length(cw)])
            .split(area);
        render_card_widget(f, card_chunks[0], Some(h.first()), Some(Color::Cyan));
        render_card_widget(f, card_chunks[1], Some(h.second()), Some(Color::Cyan));
    }
}

fn draw_events(f: &mut Frame, app: &AppState, area: Rect) {
    let rows = inner(area).height as usize;
    let lines: Vec<Line> =
        app.history_recent_offset(rows, 0).iter().map(|e| Line::from(e.to_string())).collect();
    let para = Paragraph::new(lines).block(Block::default().title("Log").borders(Borders::ALL));
    f.render_widget(para, area);
}

fn draw_status(f: &mut Frame, app: &AppState, area: Rect) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(inner(area));

    let phase = app.table.phase();
    let mut left: Vec<Line> = if app.game_over() {
        vec![Line::from("Game over. M for a new table, Q to quit.")]
    } else if !phase.in_hand() {
        vec![Line::from("Press Space to deal the next hand.")]
    } else if app.human_to_act() {
        vec![Line::from(Span::styled("Your move.", Style::default().fg(Color::Yellow)))]
    } else {
        let waiting = app.table.to_act().map(|i| format!("P{}", i + 1)).unwrap_or_else(|| "dealer".to_string());
        vec![Line::from(format!("Waiting on {waiting}..."))]
    };

    if let Ok(score) = app.table.evaluate(AppState::HUMAN_SEAT) {
        left.push(Line::from(format!("Your hand: {score}")));
    }

    if let Some(err) = app.action_error() {
        left.push(Line::from(Span::styled(format!("Error: {err}"), Style::default().fg(Color::Red))));
    } else if app.human_to_act() {
        let ctx = app.table.turn_context(AppState::HUMAN_SEAT).ok();
        let to_call = ctx.as_ref().map_or(0, |c| c.to_call);
        let can_raise = ctx.as_ref().is_some_and(|c| c.can_raise());
        let style = |enabled: bool| {
            if enabled {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            }
        };
        let call_label = if to_call == 0 { "C check".to_string() } else { format!("C call {to_call}") };
        left.push(Line::from(vec![
            Span::styled("F fold", style(true)),
            Span::raw(" • "),
            Span::styled(call_label, style(true)),
            Span::raw(" • "),
            Span::styled("R min raise", style(can_raise)),
            Span::raw(" • "),
            Span::styled("A amount", style(can_raise)),
        ]));
    }

    let right = vec![Line::from(""), Line::from("? help • H history • M menu • Q quit")];
    f.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(Paragraph::new(right).wrap(Wrap { trim: true }).alignment(Alignment::Right), cols[1]);
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("History").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries = app.history_recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset());
    if entries.is_empty() {
        lines.push(Line::from("No history yet."));
    } else {
        lines.extend(entries.iter().map(|e| Line::from(e.to_string())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Table:", bold)),
        Line::from("- Space / N: deal next hand"),
        Line::from("- F: fold"),
        Line::from("- C: check / call"),
        Line::from("- R: raise to the minimum"),
        Line::from("- A: type a raise amount"),
        Line::from("- H: history"),
        Line::from(""),
        Line::from(Span::styled("Amount Entry:", bold)),
        Line::from("- 0-9: edit amount"),
        Line::from("- Backspace: delete digit"),
        Line::from("- + / -: adjust by min raise"),
        Line::from("- Enter: submit"),
        Line::from("- Esc: cancel"),
        Line::from(""),
        Line::from(Span::styled("Menu:", bold)),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down: move selection"),
        Line::from("- + / -: adjust value"),
        Line::from("- Enter: start a new table"),
        Line::from("- Q: quit"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_amount_entry(f: &mut Frame, app: &AppState) {
    let area = centered_rect(50, 30, f.area());
    let (min, max) = app
        .table
        .turn_context(AppState::HUMAN_SEAT)
        .map(|ctx| (ctx.min_raise_to, ctx.max_raise_to()))
        .unwrap_or((0, 0));
    let current = app.amount_entry_text().unwrap_or("");
    let lines = vec![
        Line::from(format!("Raise to: {current}")),
        Line::from(format!("Min: {min}   Max: {max}")),
        Line::from("Digits to edit, Backspace to delete"),
        Line::from("+/- by min raise, Enter submit, Esc cancel"),
    ];
    let block = Block::default().title("Raise Amount").borders(Borders::ALL);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner(area));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[0]);
    let error = app.amount_entry_error().unwrap_or("");
    let error_line = Line::from(Span::styled(error, Style::default().fg(Color::Red)));
    f.render_widget(Paragraph::new(error_line).alignment(Alignment::Center), chunks[1]);
}

fn draw_game_over(f: &mut Frame, app: &AppState) {
    let area = centered_rect(50, 50, f.area());
    let block = Block::default()
        .title("Game Over")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let mut lines = vec![
        Line::from(Span::styled("Final standings", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
    ];
    for (place, seat) in app.table.standings().into_iter().enumerate() {
        lines.push(Line::from(format!("{}. {:<8} ${}", place + 1, seat.name(), seat.stack())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "M new table • Q quit",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner(area));
}

fn render_card_widget(f: &mut Frame, area: Rect, card: Option<Card>, border: Option<Color>) {
    let mut block = Block::default().borders(Borders::ALL);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    let inner = inner(area);
    f.render_widget(block, area);
    let content = match card {
        Some(c) => {
            let color = if c.suit().is_red() { Color::Red } else { Color::White };
            Line::from(Span::styled(c.symbolic().to_string(), Style::default().fg(color)))
        }
        None => Line::from("[  ]"),
    };
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner);
}
