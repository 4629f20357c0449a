mod config;
mod input;
mod options;
mod runtime;
mod status;
mod terminal;

use anyhow::Result;

use crate::auth::{Authenticator, Session, User};

pub use config::{AppConfig, ConfigError, UiSection};
pub use options::UiOptions;

use runtime::App;

/// Entry point: the sign-in screen, then the dashboard once signed in.
pub struct FormBridge {
    session: Session,
    title: Option<String>,
    options: UiOptions,
}

impl FormBridge {
    pub fn new(authenticator: impl Authenticator + 'static) -> Self {
        Self {
            session: Session::new(authenticator),
            title: None,
            options: UiOptions::default(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.authenticator()).with_options(config.ui_options())
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs until the user quits and returns whoever was signed in at that
    /// point.
    pub fn run(self) -> Result<Option<User>> {
        let FormBridge {
            session,
            title,
            options,
        } = self;
        let mut app = App::new(session, options, title)?;
        app.run()
    }
}
