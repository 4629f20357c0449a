use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::screens::{DashboardScreen, SIGN_IN_TITLE, SignInFocus, SignInScreen};

use super::{
    input::{ACCENT, MUTED, render_text_field},
    layout::{centered_rect, form_column},
};

const FORM_WIDTH: u16 = 48;
const BRAND: &str = "FormBridge";

fn button(label: &str, focused: bool) -> Paragraph<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT)
    };
    Paragraph::new(label.to_string())
        .alignment(Alignment::Center)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT)),
        )
}

fn link(label: &str, focused: bool) -> Paragraph<'static> {
    let mut style = Style::default().fg(Color::Gray);
    if focused {
        style = style.fg(ACCENT).add_modifier(Modifier::UNDERLINED);
    }
    Paragraph::new(label.to_string())
        .alignment(Alignment::Center)
        .style(style)
}

pub fn render_sign_in(
    frame: &mut Frame<'_>,
    area: Rect,
    title: Option<&str>,
    screen: &SignInScreen,
    cursor_enabled: bool,
) {
    let column = form_column(area, FORM_WIDTH);
    let [brand, heading, email, password, submit, forgot, _, create] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(column);

    let brand_line = Line::from(Span::styled(
        title.unwrap_or(BRAND).to_string(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(
        Paragraph::new(brand_line).alignment(Alignment::Center),
        brand,
    );
    frame.render_widget(
        Paragraph::new(SIGN_IN_TITLE)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        heading,
    );

    let email_cursor = render_text_field(frame, email, screen.email());
    let password_cursor = render_text_field(frame, password, screen.password());

    let focus = screen.focus();
    frame.render_widget(button("Entrar", focus == SignInFocus::Submit), submit);
    frame.render_widget(
        link("Esqueci minha senha", focus == SignInFocus::ForgotPassword),
        forgot,
    );
    frame.render_widget(
        link("→ Criar uma conta", focus == SignInFocus::CreateAccount),
        create,
    );

    if cursor_enabled && let Some(position) = email_cursor.or(password_cursor) {
        frame.set_cursor_position(position);
    }
}

pub fn render_sign_up(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Criar uma conta",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Cadastro indisponível nesta versão.",
            Style::default().fg(MUTED),
        )),
        Line::from(Span::styled(
            "Pressione Esc para voltar ao logon.",
            Style::default().fg(MUTED),
        )),
    ];
    let rect = centered_rect(area, FORM_WIDTH, lines.len() as u16 + 2);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        rect,
    );
}

pub fn render_dashboard(frame: &mut Frame<'_>, area: Rect, screen: &DashboardScreen) {
    let column = form_column(area, FORM_WIDTH);
    let [greeting, email, _, sign_out] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(column);

    frame.render_widget(
        Paragraph::new(screen.greeting())
            .alignment(Alignment::Center)
            .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        greeting,
    );
    frame.render_widget(
        Paragraph::new(screen.user().email.clone())
            .alignment(Alignment::Center)
            .style(Style::default().fg(MUTED)),
        email,
    );
    frame.render_widget(button("Sair", true), sign_out);
}
