use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::props::{InputProps, KeyboardType};

/// What the terminal shows for one input: text plus a cursor measured in
/// characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    cursor: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditEffect {
    Text,
    Cursor,
    None,
}

impl EditBuffer {
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn replace(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.text
            .char_indices()
            .nth(cursor)
            .map(|(index, _)| index)
            .unwrap_or(self.text.len())
    }

    fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    fn remove_before(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    fn truncate_at_cursor(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.truncate(at);
        true
    }

    fn move_to(&mut self, cursor: usize) -> bool {
        let bounded = cursor.min(self.len());
        if bounded == self.cursor {
            return false;
        }
        self.cursor = bounded;
        true
    }
}

pub(crate) fn apply_key(buffer: &mut EditBuffer, props: &InputProps, key: &KeyEvent) -> EditEffect {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('u') if ctrl => {
            if buffer.text.is_empty() {
                return EditEffect::None;
            }
            buffer.clear();
            EditEffect::Text
        }
        KeyCode::Char(_) if ctrl => EditEffect::None,
        KeyCode::Char(ch) => {
            if props.keyboard == KeyboardType::Email && ch.is_whitespace() {
                return EditEffect::None;
            }
            if props
                .max_length
                .is_some_and(|max| buffer.len() >= max)
            {
                return EditEffect::None;
            }
            if props.auto_capitalize && buffer.text.is_empty() {
                for upper in ch.to_uppercase() {
                    buffer.insert(upper);
                }
            } else {
                buffer.insert(ch);
            }
            EditEffect::Text
        }
        KeyCode::Backspace => effect(buffer.remove_before(), EditEffect::Text),
        // Delete clears everything after the cursor.
        KeyCode::Delete => effect(buffer.truncate_at_cursor(), EditEffect::Text),
        KeyCode::Left => effect(
            buffer.move_to(buffer.cursor.saturating_sub(1)),
            EditEffect::Cursor,
        ),
        KeyCode::Right => effect(buffer.move_to(buffer.cursor + 1), EditEffect::Cursor),
        KeyCode::Home => effect(buffer.move_to(0), EditEffect::Cursor),
        KeyCode::End => effect(buffer.move_to(buffer.len()), EditEffect::Cursor),
        _ => EditEffect::None,
    }
}

fn effect(changed: bool, kind: EditEffect) -> EditEffect {
    if changed { kind } else { EditEffect::None }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(buffer: &mut EditBuffer, props: &InputProps, code: KeyCode) -> EditEffect {
        apply_key(buffer, props, &KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn inserts_at_cursor() {
        let props = InputProps::default();
        let mut buffer = EditBuffer::with_text("ac");
        press(&mut buffer, &props, KeyCode::Left);
        press(&mut buffer, &props, KeyCode::Char('b'));
        assert_eq!(buffer.text(), "abc");
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn backspace_and_delete_handle_multibyte_text() {
        let props = InputProps::default();
        let mut buffer = EditBuffer::with_text("válido");
        press(&mut buffer, &props, KeyCode::Home);
        press(&mut buffer, &props, KeyCode::Right);
        press(&mut buffer, &props, KeyCode::Right);
        assert_eq!(press(&mut buffer, &props, KeyCode::Backspace), EditEffect::Text);
        assert_eq!(buffer.text(), "vlido");
        assert_eq!(buffer.cursor(), 1);
        assert_eq!(press(&mut buffer, &props, KeyCode::Delete), EditEffect::Text);
        assert_eq!(buffer.text(), "v");
    }

    #[test]
    fn delete_clears_to_end_of_line() {
        let props = InputProps::default();
        let mut buffer = EditBuffer::with_text("abcdef");
        press(&mut buffer, &props, KeyCode::Home);
        press(&mut buffer, &props, KeyCode::Right);
        assert_eq!(press(&mut buffer, &props, KeyCode::Delete), EditEffect::Text);
        assert_eq!(buffer.text(), "a");
        assert_eq!(buffer.cursor(), 1);
        assert_eq!(press(&mut buffer, &props, KeyCode::Delete), EditEffect::None);
    }

    #[test]
    fn email_keyboard_rejects_spaces() {
        let props = InputProps::default().with_keyboard(KeyboardType::Email);
        let mut buffer = EditBuffer::default();
        assert_eq!(press(&mut buffer, &props, KeyCode::Char(' ')), EditEffect::None);
        assert_eq!(buffer.text(), "");
    }

    #[test]
    fn max_length_caps_input() {
        let props = InputProps::default().with_max_length(2);
        let mut buffer = EditBuffer::default();
        for ch in "abc".chars() {
            press(&mut buffer, &props, KeyCode::Char(ch));
        }
        assert_eq!(buffer.text(), "ab");
    }

    #[test]
    fn auto_capitalize_only_touches_first_character() {
        let props = InputProps::default().with_auto_capitalize(true);
        let mut buffer = EditBuffer::default();
        for ch in "ana".chars() {
            press(&mut buffer, &props, KeyCode::Char(ch));
        }
        assert_eq!(buffer.text(), "Ana");
    }

    #[test]
    fn ctrl_u_clears_line() {
        let props = InputProps::default();
        let mut buffer = EditBuffer::with_text("secret");
        let key = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(apply_key(&mut buffer, &props, &key), EditEffect::Text);
        assert_eq!(buffer.text(), "");
        assert_eq!(buffer.cursor(), 0);
    }
}
