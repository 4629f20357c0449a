#![deny(rust_2018_idioms)]

mod app;
pub mod auth;
pub mod field;
pub mod form;
mod presentation;
pub mod registry;
pub mod screens;

pub use app::{AppConfig, ConfigError, FormBridge, UiOptions, UiSection};

pub mod prelude {
    pub use super::{
        AppConfig, FormBridge, UiOptions,
        auth::{Authenticator, Credentials, Session, StaticAuthenticator, User},
        field::{FieldHandle, InputProps, TextField},
        form::{Form, SchemaValidator, SubmitOutcome},
        registry::{FieldDescriptor, FieldRegistry},
    };
}
