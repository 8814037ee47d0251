//! Text-field stack for the add/edit modals.
//!
//! Wraps one `tui_input::Input` per editable field, tracks focus, and
//! renders labels, values, and inline validation errors. The owning
//! screen copies values back into its core form draft on submit.

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use guestdesk_core::validate::FieldErrors;

use crate::theme;

/// One editable line in a form modal.
pub struct FormField {
    pub label: &'static str,
    /// Key into the core form / its error map.
    pub key: &'static str,
    pub input: Input,
    /// Render the value as dots (passwords).
    pub masked: bool,
}

/// An ordered stack of form fields with one focused at a time.
pub struct FormFields {
    fields: Vec<FormField>,
    focused: usize,
}

impl FormFields {
    pub fn new(fields: Vec<(&'static str, &'static str, String)>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(label, key, value)| FormField {
                    label,
                    key,
                    input: Input::new(value),
                    masked: false,
                })
                .collect(),
            focused: 0,
        }
    }

    /// Mark a field (by key) as password-masked.
    pub fn masked(mut self, key: &str) -> Self {
        for field in &mut self.fields {
            if field.key == key {
                field.masked = true;
            }
        }
        self
    }

    pub fn value(&self, key: &str) -> String {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.input.value().to_owned())
            .unwrap_or_default()
    }

    /// Handle a key event. Tab/Down and BackTab/Up move focus; everything
    /// else feeds the focused input. Returns `false` for keys the form
    /// does not consume (Esc, Enter) so the screen can act on them.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => false,
            KeyCode::Tab | KeyCode::Down => {
                self.focused = (self.focused + 1) % self.fields.len().max(1);
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                let len = self.fields.len().max(1);
                self.focused = (self.focused + len - 1) % len;
                true
            }
            _ => {
                if let Some(field) = self.fields.get_mut(self.focused) {
                    field.input.handle_event(&CrosstermEvent::Key(key));
                }
                true
            }
        }
    }

    /// Rows needed: two per field plus one per active error.
    pub fn height(&self, errors: &FieldErrors) -> u16 {
        let base = self.fields.len() * 2;
        let error_lines = self
            .fields
            .iter()
            .filter(|f| errors.get(f.key).is_some())
            .count();
        u16::try_from(base + error_lines).unwrap_or(u16::MAX)
    }

    /// Render the field stack with inline errors from `errors`.
    pub fn render(&self, frame: &mut Frame, area: Rect, errors: &FieldErrors) {
        let mut lines: Vec<Line> = Vec::new();
        for (idx, field) in self.fields.iter().enumerate() {
            let focused = idx == self.focused;
            let marker = if focused { "> " } else { "  " };
            lines.push(Line::from(Span::styled(
                format!("{marker}{}", field.label),
                theme::form_label(),
            )));

            let shown = if field.masked {
                "\u{2022}".repeat(field.input.value().chars().count())
            } else {
                field.input.value().to_owned()
            };
            let value_style = if focused {
                Style::default()
                    .fg(theme::BRASS)
                    .add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default().fg(theme::DIM_WHITE)
            };
            let cursor = if focused { "_" } else { "" };
            lines.push(Line::from(Span::styled(
                format!("    {shown}{cursor}"),
                value_style,
            )));

            if let Some(message) = errors.get(field.key) {
                lines.push(Line::from(Span::styled(
                    format!("    {message}"),
                    theme::form_error(),
                )));
            }
        }
        frame.render_widget(Paragraph::new(lines), area);
    }
}
