use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

/// A `width` x `height` rectangle centered in `area`, clipped to it.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// The centered column the sign-in form lives in.
pub fn form_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.saturating_sub(2).min(max_width).max(1);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(area);
    columns[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_clipped_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered_rect(area, 40, 4);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 4);
        assert_eq!(rect.y, 3);
    }

    #[test]
    fn form_column_is_centered() {
        let rect = form_column(Rect::new(0, 0, 100, 20), 50);
        assert_eq!(rect.width, 50);
        assert_eq!(rect.x, 25);
    }
}
