use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::field::{TextField, Tone};

pub const ACCENT: Color = Color::Rgb(0xff, 0x90, 0x00);
pub const MUTED: Color = Color::Rgb(0x66, 0x63, 0x60);
pub const DANGER: Color = Color::Rgb(0xc5, 0x30, 0x30);

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Muted => MUTED,
        Tone::Accent => ACCENT,
        Tone::Error => DANGER,
    }
}

fn icon_glyph(icon: &str) -> String {
    match icon {
        "mail" => "✉".to_string(),
        "lock" => "✱".to_string(),
        "log-in" => "→".to_string(),
        other => other
            .chars()
            .next()
            .map(|ch| ch.to_uppercase().to_string())
            .unwrap_or_else(|| " ".to_string()),
    }
}

pub(crate) fn field_line(field: &TextField) -> Line<'static> {
    let visual = field.visual();
    let icon = Span::styled(
        format!("{} ", icon_glyph(field.icon())),
        Style::default().fg(tone_color(visual.icon)),
    );
    let text = field.display_text();
    let body = if text.is_empty() {
        Span::styled(
            field.props().placeholder.to_string(),
            Style::default().fg(MUTED),
        )
    } else {
        Span::styled(text, Style::default().fg(Color::White))
    };
    Line::from(vec![icon, body])
}

/// Draws a bordered input. Returns where the terminal cursor belongs when the
/// field has focus.
pub fn render_text_field(frame: &mut Frame<'_>, area: Rect, field: &TextField) -> Option<(u16, u16)> {
    let visual = field.visual();
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(tone_color(visual.border)));
    if let Some(message) = field.error_message() {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(DANGER).add_modifier(Modifier::BOLD),
        )));
    }
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(field_line(field)).block(block), area);

    if !field.is_focused() || inner.width == 0 || inner.height == 0 {
        return None;
    }
    let icon_width = format!("{} ", icon_glyph(field.icon())).width() as u16;
    let before_cursor: String = field.display_text().chars().take(field.cursor()).collect();
    let x = inner
        .x
        .saturating_add(icon_width)
        .saturating_add(before_cursor.width() as u16)
        .min(inner.right().saturating_sub(1));
    Some((x, inner.y))
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::{
        field::InputProps,
        registry::{ErrorMap, FieldRegistry},
    };

    #[test]
    fn placeholder_is_muted_until_text_arrives() {
        let registry = FieldRegistry::new();
        let props = InputProps::new().with_placeholder("E-mail");
        let mut field = TextField::mount(&registry, "email", "mail", props);
        let line = field_line(&field);
        assert_eq!(line.spans[1].content, "E-mail");
        assert_eq!(line.spans[1].style.fg, Some(MUTED));

        field.handle_key(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        let line = field_line(&field);
        assert_eq!(line.spans[1].content, "a");
    }

    #[test]
    fn icon_follows_focus() {
        let registry = FieldRegistry::new();
        let field = TextField::mount(&registry, "email", "mail", InputProps::new());
        assert_eq!(field_line(&field).spans[0].style.fg, Some(MUTED));
        field.focus();
        assert_eq!(field_line(&field).spans[0].style.fg, Some(ACCENT));
    }

    #[test]
    fn errors_turn_the_border_red() {
        let registry = FieldRegistry::new();
        let field = TextField::mount(&registry, "email", "mail", InputProps::new());
        registry.set_errors(ErrorMap::from_iter([("email", "Digite seu email")]));
        assert_eq!(tone_color(field.visual().border), DANGER);
    }
}
