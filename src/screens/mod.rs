mod dashboard;
mod sign_in;

pub use dashboard::DashboardScreen;
pub use sign_in::{
    AUTH_ERROR_MESSAGE, AUTH_ERROR_TITLE, SIGN_IN_TITLE, SignInFocus, SignInScreen,
    sign_in_messages, sign_in_schema,
};

use crate::{auth::User, form::Alert};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SignIn,
    SignUp,
    Dashboard,
}

/// What a screen asks the shell to do after handling a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    None,
    Edited(String),
    Status(String),
    Invalid(usize),
    Alert(Alert),
    Navigate(Route),
    SignedIn(User),
    SignOut,
}
