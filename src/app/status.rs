#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Ready. Fill in your credentials and press Enter on Entrar.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn editing(&mut self, field: &str) {
        self.message = format!("Editing {field}");
    }

    pub fn issues_remaining(&mut self, count: usize) {
        self.message = format!("{count} field(s) need attention");
    }

    pub fn signed_in(&mut self, name: &str) {
        self.message = format!("Signed in as {name}");
    }

    pub fn signed_out(&mut self) {
        self.message = "Signed out".to_string();
    }

    pub fn pending_exit(&mut self) {
        self.message = "Still signed in. Press Ctrl+Q again to quit.".to_string();
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
