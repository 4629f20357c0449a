use crossterm::event::{KeyCode, KeyEvent};

use crate::auth::User;

use super::ScreenAction;

#[derive(Debug, Clone)]
pub struct DashboardScreen {
    user: User,
}

impl DashboardScreen {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn greeting(&self) -> String {
        format!("Olá, {}", self.user.name)
    }

    /// The only control is the "Sair" button.
    pub fn handle_key(&mut self, key: &KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Enter => ScreenAction::SignOut,
            _ => ScreenAction::None,
        }
    }
}
