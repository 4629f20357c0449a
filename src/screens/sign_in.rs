use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use serde_json::{Value, json};

use crate::{
    auth::{Credentials, Session},
    field::{FieldHandle, FieldKeyOutcome, InputProps, KeyboardType, ReturnKey, TextField},
    form::{Alert, Form, MessageCatalog, SchemaValidator, SubmitError, SubmitOutcome},
    registry::FieldRegistry,
};

use super::{Route, ScreenAction};

pub const SIGN_IN_TITLE: &str = "Faça seu logon";
pub const AUTH_ERROR_TITLE: &str = "Erro na autenticação";
pub const AUTH_ERROR_MESSAGE: &str = "Ocorreu um erro ao fazer login, cheque as credenciais";
const FORGOT_PASSWORD_NOTICE: &str = "Recuperação de senha ainda não disponível";

pub fn sign_in_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Sign in",
        "type": "object",
        "required": ["email", "password"],
        "properties": {
            "email": {"type": "string", "minLength": 1, "format": "email"},
            "password": {"type": "string", "minLength": 1}
        }
    })
}

pub fn sign_in_messages() -> MessageCatalog {
    MessageCatalog::new()
        .with("email", "minLength", "Digite seu email")
        .with("email", "format", "Digite um email válido")
        .with("password", "minLength", "Digite sua senha")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInFocus {
    Email,
    Password,
    Submit,
    ForgotPassword,
    CreateAccount,
}

const FOCUS_ORDER: [SignInFocus; 5] = [
    SignInFocus::Email,
    SignInFocus::Password,
    SignInFocus::Submit,
    SignInFocus::ForgotPassword,
    SignInFocus::CreateAccount,
];

#[derive(Debug)]
pub struct SignInScreen {
    form: Form,
    email: TextField,
    password: TextField,
    password_input: FieldHandle,
    focus: SignInFocus,
}

impl SignInScreen {
    pub fn new() -> Result<Self> {
        let validator = SchemaValidator::new(&sign_in_schema(), sign_in_messages())?;
        let form = Form::new(validator)
            .with_failure_alert(Alert::new(AUTH_ERROR_TITLE, AUTH_ERROR_MESSAGE));
        let email = TextField::mount(
            form.registry(),
            "email",
            "mail",
            InputProps::new()
                .with_placeholder("E-mail")
                .with_keyboard(KeyboardType::Email)
                .with_auto_correct(false)
                .with_return_key(ReturnKey::Next),
        );
        let password = TextField::mount(
            form.registry(),
            "password",
            "lock",
            InputProps::new()
                .with_placeholder("Senha")
                .with_secure_entry(true)
                .with_return_key(ReturnKey::Send),
        );
        let password_input = password.handle();
        email.focus();
        Ok(Self {
            form,
            email,
            password,
            password_input,
            focus: SignInFocus::Email,
        })
    }

    pub fn email(&self) -> &TextField {
        &self.email
    }

    pub fn password(&self) -> &TextField {
        &self.password
    }

    pub fn registry(&self) -> &FieldRegistry {
        self.form.registry()
    }

    pub fn focus(&self) -> SignInFocus {
        self.focus
    }

    pub fn focused_field(&self) -> Option<&TextField> {
        match self.focus {
            SignInFocus::Email => Some(&self.email),
            SignInFocus::Password => Some(&self.password),
            _ => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.step_focus(-1);
    }

    fn step_focus(&mut self, delta: i32) {
        let len = FOCUS_ORDER.len() as i32;
        let current = FOCUS_ORDER
            .iter()
            .position(|focus| *focus == self.focus)
            .unwrap_or(0) as i32;
        let next = ((current + delta) % len + len) % len;
        self.set_focus(FOCUS_ORDER[next as usize]);
    }

    pub fn set_focus(&mut self, target: SignInFocus) {
        if target == self.focus {
            return;
        }
        if let Some(field) = self.focused_field() {
            field.blur();
        }
        self.focus = target;
        if let Some(field) = self.focused_field() {
            field.focus();
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent, session: &mut Session) -> ScreenAction {
        match self.focus {
            SignInFocus::Email => match self.email.handle_key(key) {
                FieldKeyOutcome::Return(_) => {
                    self.email.blur();
                    self.password_input.focus();
                    self.focus = SignInFocus::Password;
                    ScreenAction::None
                }
                FieldKeyOutcome::Edited => ScreenAction::Edited(self.email.name().to_string()),
                FieldKeyOutcome::CursorMoved | FieldKeyOutcome::Ignored => ScreenAction::None,
            },
            SignInFocus::Password => match self.password.handle_key(key) {
                FieldKeyOutcome::Return(_) => self.submit(session),
                FieldKeyOutcome::Edited => {
                    ScreenAction::Edited(self.password.name().to_string())
                }
                FieldKeyOutcome::CursorMoved | FieldKeyOutcome::Ignored => ScreenAction::None,
            },
            SignInFocus::Submit if key.code == KeyCode::Enter => self.submit(session),
            SignInFocus::ForgotPassword if key.code == KeyCode::Enter => {
                ScreenAction::Status(FORGOT_PASSWORD_NOTICE.to_string())
            }
            SignInFocus::CreateAccount if key.code == KeyCode::Enter => {
                ScreenAction::Navigate(Route::SignUp)
            }
            _ => ScreenAction::None,
        }
    }

    pub fn submit(&mut self, session: &mut Session) -> ScreenAction {
        let outcome = self
            .form
            .submit(&mut |payload: Value| -> Result<(), SubmitError> {
                let credentials: Credentials = serde_json::from_value(payload)?;
                session.sign_in(&credentials)?;
                Ok(())
            });
        match outcome {
            SubmitOutcome::Submitted => match session.user() {
                Some(user) => ScreenAction::SignedIn(user.clone()),
                None => ScreenAction::None,
            },
            SubmitOutcome::Invalid(errors) => ScreenAction::Invalid(errors.len()),
            SubmitOutcome::Failed { alert, .. } => ScreenAction::Alert(alert),
            SubmitOutcome::Busy => ScreenAction::None,
        }
    }
}
