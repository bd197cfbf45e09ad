use ratatui::layout::Constraint;
use ratatui::prelude::{Direction, Layout, Rect};

/// Area inside a one-cell border.
pub(super) fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

pub(super) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(split_percent(percent_y))
        .split(r);
    Layout::default().direction(Direction::Horizontal).constraints(split_percent(percent_x)).split(rows[1])[1]
}

fn split_percent(middle: u16) -> [Constraint; 3] {
    let side = (100 - middle.min(100)) / 2;
    [Constraint::Percentage(side), Constraint::Percentage(middle), Constraint::Percentage(side)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_never_underflows() {
        let r = inner(Rect::new(0, 0, 1, 1));
        assert_eq!((r.width, r.height), (0, 0));
    }

    #[test]
    fn centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let c = centered_rect(50, 50, outer);
        assert_eq!(c.width, 50);
        assert!(c.x >= 20 && c.y >= 10);
    }
}
