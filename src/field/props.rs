use std::borrow::Cow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyboardType {
    #[default]
    Default,
    /// Rejects whitespace.
    Email,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReturnKey {
    #[default]
    Done,
    Next,
    Send,
}

/// Native input configuration passed straight through to the text editor and
/// the renderer.
#[derive(Debug, Clone)]
pub struct InputProps {
    pub placeholder: Cow<'static, str>,
    pub keyboard: KeyboardType,
    pub secure_entry: bool,
    /// On by default, like a platform text input.
    pub auto_correct: bool,
    pub auto_capitalize: bool,
    pub return_key: ReturnKey,
    pub default_value: Option<String>,
    pub max_length: Option<usize>,
}

impl Default for InputProps {
    fn default() -> Self {
        Self {
            placeholder: Cow::Borrowed(""),
            keyboard: KeyboardType::Default,
            secure_entry: false,
            auto_correct: true,
            auto_capitalize: false,
            return_key: ReturnKey::Done,
            default_value: None,
            max_length: None,
        }
    }
}

impl InputProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<Cow<'static, str>>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_keyboard(mut self, keyboard: KeyboardType) -> Self {
        self.keyboard = keyboard;
        self
    }

    pub fn with_secure_entry(mut self, secure: bool) -> Self {
        self.secure_entry = secure;
        self
    }

    pub fn with_auto_correct(mut self, enabled: bool) -> Self {
        self.auto_correct = enabled;
        self
    }

    pub fn with_auto_capitalize(mut self, enabled: bool) -> Self {
        self.auto_capitalize = enabled;
        self
    }

    pub fn with_return_key(mut self, return_key: ReturnKey) -> Self {
        self.return_key = return_key;
        self
    }

    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }
}
