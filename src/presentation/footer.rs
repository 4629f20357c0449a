use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::{ScreenView, UiContext};

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let actions = ctx.help.unwrap_or(" ");
    let actions_widget = Paragraph::new(format!("Actions: {actions}"))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(actions_widget, rows[0]);

    let mut status = ctx.status_message.to_string();
    let mut error_count = 0;
    if let ScreenView::SignIn(screen) = &ctx.screen {
        let registry = screen.registry();
        error_count = registry.error_count();
        if let Some(field) = screen.focused_field() {
            status.push_str(" • focus: ");
            status.push_str(field.name());
        }
        if let Some(extra) = registry.unclaimed_errors().first() {
            status.push_str(" • ");
            status.push_str(extra);
        }
    }
    if status.trim().is_empty() {
        status = "Ready".to_string();
    }

    let badge = if error_count > 0 {
        Span::styled(
            format!("[! {error_count}]"),
            Style::default().fg(Color::Red).bg(Color::Black),
        )
    } else {
        Span::styled("[ok]", Style::default().fg(Color::Green))
    };

    let status_widget = Paragraph::new(Line::from(vec![
        Span::raw("Status: "),
        Span::raw(status),
        Span::raw(" "),
        badge,
    ]));
    frame.render_widget(status_widget, rows[1]);
}
