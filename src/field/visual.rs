/// Per-widget presentation flags. `errored` is not stored here; it is read
/// from the registry whenever the widget draws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presentation {
    focused: bool,
    filled: bool,
    revision: u64,
}

impl Presentation {
    pub fn focused(&self) -> bool {
        self.focused
    }

    pub fn filled(&self) -> bool {
        self.filled
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.revision += 1;
        }
    }

    pub(crate) fn set_filled(&mut self, filled: bool) {
        if self.filled != filled {
            self.filled = filled;
            self.revision += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Muted,
    Accent,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputVisual {
    pub icon: Tone,
    pub border: Tone,
}

impl InputVisual {
    pub fn resolve(presentation: &Presentation, errored: bool) -> Self {
        let active = presentation.focused || presentation.filled;
        let icon = if active { Tone::Accent } else { Tone::Muted };
        let border = if errored {
            Tone::Error
        } else if presentation.focused {
            Tone::Accent
        } else {
            Tone::Muted
        };
        Self { icon, border }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presentation(focused: bool, filled: bool) -> Presentation {
        Presentation {
            focused,
            filled,
            revision: 0,
        }
    }

    #[test]
    fn icon_lights_up_when_focused_or_filled() {
        assert_eq!(InputVisual::resolve(&presentation(false, false), false).icon, Tone::Muted);
        assert_eq!(InputVisual::resolve(&presentation(true, false), false).icon, Tone::Accent);
        assert_eq!(InputVisual::resolve(&presentation(false, true), false).icon, Tone::Accent);
    }

    #[test]
    fn error_wins_the_border() {
        let visual = InputVisual::resolve(&presentation(true, true), true);
        assert_eq!(visual.border, Tone::Error);
        assert_eq!(visual.icon, Tone::Accent);
    }

    #[test]
    fn revision_moves_only_on_change() {
        let mut state = Presentation::default();
        state.set_focused(false);
        assert_eq!(state.revision(), 0);
        state.set_focused(true);
        state.set_filled(true);
        assert_eq!(state.revision(), 2);
    }
}
