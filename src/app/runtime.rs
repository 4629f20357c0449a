use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::{
    auth::{Session, User},
    form::Alert,
    presentation::{self, ScreenView, UiContext},
    screens::{DashboardScreen, Route, ScreenAction, SignInScreen},
};

use super::{
    input::{KeyCommand, classify},
    options::UiOptions,
    status::StatusLine,
    terminal::TerminalGuard,
};

const SIGN_IN_HELP: &str = "Tab/Shift+Tab move • Enter confirm • Ctrl+U clear field • Ctrl+Q quit";
const DASHBOARD_HELP: &str = "Enter sign out • Ctrl+Q quit";
const SIGN_UP_HELP: &str = "Esc/Enter back to sign in • Ctrl+Q quit";
const ALERT_HELP: &str = "Enter/Esc dismiss";

pub(crate) struct App {
    options: UiOptions,
    title: Option<String>,
    session: Session,
    route: Route,
    sign_in: SignInScreen,
    dashboard: Option<DashboardScreen>,
    alert: Option<Alert>,
    status: StatusLine,
    exit_armed: bool,
    should_quit: bool,
}

impl App {
    pub fn new(session: Session, options: UiOptions, title: Option<String>) -> Result<Self> {
        Ok(Self {
            options,
            title,
            session,
            route: Route::SignIn,
            sign_in: SignInScreen::new()?,
            dashboard: None,
            alert: None,
            status: StatusLine::new(),
            exit_armed: false,
            should_quit: false,
        })
    }

    pub fn run(&mut self) -> Result<Option<User>> {
        let mut terminal = TerminalGuard::enter()?;
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if !event::poll(self.options.tick_rate)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Paste(text) => self.handle_paste(&text)?,
                Event::Resize(width, height) => {
                    terminal.resize(Rect::new(0, 0, width, height))?;
                }
                Event::Mouse(_) | Event::FocusGained | Event::FocusLost => {}
            }
        }
        Ok(self.session.user().cloned())
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let view = match (self.route, &self.dashboard) {
            (Route::Dashboard, Some(dashboard)) => ScreenView::Dashboard(dashboard),
            (Route::SignUp, _) => ScreenView::SignUp,
            _ => ScreenView::SignIn(&self.sign_in),
        };
        presentation::draw(
            frame,
            UiContext {
                title: self.title.as_deref(),
                screen: view,
                status_message: self.status.message(),
                help: self.current_help(),
                alert: self.alert.as_ref(),
            },
        );
    }

    fn current_help(&self) -> Option<&'static str> {
        if !self.options.show_help {
            return None;
        }
        if self.alert.is_some() {
            return Some(ALERT_HELP);
        }
        Some(match self.route {
            Route::SignIn => SIGN_IN_HELP,
            Route::SignUp => SIGN_UP_HELP,
            Route::Dashboard => DASHBOARD_HELP,
        })
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alert = None;
                self.status.ready();
            }
            return Ok(());
        }

        match classify(&key) {
            KeyCommand::Quit => self.on_exit(),
            KeyCommand::FocusNext => {
                self.exit_armed = false;
                if self.route == Route::SignIn {
                    self.sign_in.focus_next();
                }
            }
            KeyCommand::FocusPrev => {
                self.exit_armed = false;
                if self.route == Route::SignIn {
                    self.sign_in.focus_prev();
                }
            }
            KeyCommand::Dismiss => {
                self.exit_armed = false;
                if self.route == Route::SignUp {
                    self.navigate(Route::SignIn)?;
                } else {
                    self.status.ready();
                }
            }
            KeyCommand::Forward(event) => {
                self.exit_armed = false;
                let action = self.forward(&event);
                self.apply(action)?;
            }
            KeyCommand::None => {}
        }
        Ok(())
    }

    fn handle_paste(&mut self, text: &str) -> Result<()> {
        if self.alert.is_some() || self.route != Route::SignIn {
            return Ok(());
        }
        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let event = KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE);
            let action = self.sign_in.handle_key(&event, &mut self.session);
            self.apply(action)?;
        }
        Ok(())
    }

    fn forward(&mut self, key: &KeyEvent) -> ScreenAction {
        match self.route {
            Route::SignIn => self.sign_in.handle_key(key, &mut self.session),
            Route::Dashboard => match &mut self.dashboard {
                Some(dashboard) => dashboard.handle_key(key),
                None => ScreenAction::None,
            },
            Route::SignUp if key.code == KeyCode::Enter => ScreenAction::Navigate(Route::SignIn),
            Route::SignUp => ScreenAction::None,
        }
    }

    fn apply(&mut self, action: ScreenAction) -> Result<()> {
        match action {
            ScreenAction::None => {}
            ScreenAction::Edited(field) => self.status.editing(&field),
            ScreenAction::Status(message) => self.status.set_raw(message),
            ScreenAction::Invalid(count) => self.status.issues_remaining(count),
            ScreenAction::Alert(alert) => {
                self.status.set_raw(alert.title.clone());
                self.alert = Some(alert);
            }
            ScreenAction::Navigate(route) => self.navigate(route)?,
            ScreenAction::SignedIn(user) => {
                self.status.signed_in(&user.name);
                self.dashboard = Some(DashboardScreen::new(user));
                self.route = Route::Dashboard;
            }
            ScreenAction::SignOut => {
                self.session.sign_out();
                self.status.signed_out();
                self.navigate(Route::SignIn)?;
            }
        }
        Ok(())
    }

    fn navigate(&mut self, route: Route) -> Result<()> {
        debug!(from = ?self.route, to = ?route, "navigating");
        if route == Route::SignIn && self.route == Route::Dashboard {
            // A fresh form: the old widgets unregister as they drop.
            self.sign_in = SignInScreen::new()?;
            self.dashboard = None;
        }
        self.route = route;
        Ok(())
    }

    fn on_exit(&mut self) {
        if self.options.confirm_exit && self.session.is_signed_in() && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        info!("leaving application");
        self.should_quit = true;
    }
}
