mod alert;
mod footer;
mod input;
mod layout;
mod screens;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{
    form::Alert,
    screens::{DashboardScreen, SignInScreen},
};

pub enum ScreenView<'a> {
    SignIn(&'a SignInScreen),
    SignUp,
    Dashboard(&'a DashboardScreen),
}

pub struct UiContext<'a> {
    pub title: Option<&'a str>,
    pub screen: ScreenView<'a>,
    pub status_message: &'a str,
    pub help: Option<&'a str>,
    pub alert: Option<&'a Alert>,
}

pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(2)])
        .split(frame.area());

    let cursor_enabled = ctx.alert.is_none();
    match &ctx.screen {
        ScreenView::SignIn(screen) => {
            screens::render_sign_in(frame, chunks[0], ctx.title, screen, cursor_enabled)
        }
        ScreenView::SignUp => screens::render_sign_up(frame, chunks[0]),
        ScreenView::Dashboard(screen) => screens::render_dashboard(frame, chunks[0], screen),
    }
    footer::render_footer(frame, chunks[1], &ctx);

    if let Some(alert) = ctx.alert {
        alert::render_alert(frame, alert);
    }
}
