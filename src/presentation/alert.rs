use ratatui::{
    Frame,
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use textwrap::wrap;

use crate::form::Alert;

use super::{
    input::{ACCENT, DANGER},
    layout::centered_rect,
};

const MAX_WIDTH: u16 = 60;

pub fn render_alert(frame: &mut Frame<'_>, alert: &Alert) {
    let area = frame.area();
    let width = area.width.saturating_sub(4).clamp(1, MAX_WIDTH);
    let text_width = width.saturating_sub(4).max(1) as usize;

    let mut lines: Vec<Line<'static>> = wrap(&alert.message, text_width)
        .into_iter()
        .map(|line| Line::from(line.into_owned()))
        .collect();
    lines.push(Line::default());
    lines.push(
        Line::from(Span::styled(
            "[ OK ]",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
    );

    let height = (lines.len() as u16).saturating_add(2);
    let popup = centered_rect(area, width, height);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DANGER))
        .title(Span::styled(
            format!(" {} ", alert.title),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, popup);
}
