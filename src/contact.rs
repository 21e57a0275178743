//! Contact form with a simulated submission lifecycle
//!
//! The form moves `Idle -> Submitting -> {Success, Error} -> Idle`. Both the
//! submission delay and the return to `Idle` are deadlines owned by the form
//! and fired from [`ContactForm::tick`].

use crate::theme::StyleBundle;
use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[cfg(test)]
use mockall::automock;

/// Simulated time to send a message
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(2000);

/// Time a terminal status stays visible before the form returns to idle
pub const DEFAULT_STATUS_RESET: Duration = Duration::from_millis(3000);

pub const SUCCESS_MESSAGE: &str = "Message sent successfully! We'll get back to you soon.";
pub const ERROR_MESSAGE: &str = "Failed to send message. Please try again.";

// ==================== Text Field ====================

/// Single-line text input with a character-based cursor
#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
    /// Cursor position in characters
    cursor: usize,
}

impl TextField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// Byte offset of the character at `index`
    fn byte_offset(&self, index: usize) -> usize {
        self.value
            .char_indices()
            .nth(index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    /// Apply an editing key, returning whether it was consumed
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.char_count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_count(),
            _ => return false,
        }
        true
    }

    /// Value split around the cursor: (before, character under cursor, after)
    fn split_at_cursor(&self) -> (&str, Option<char>, &str) {
        let at = self.byte_offset(self.cursor);
        let (before, rest) = self.value.split_at(at);
        let mut chars = rest.chars();
        let under = chars.next();
        (before, under, chars.as_str())
    }
}

// ==================== Form State ====================

/// Form input being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub fn label(&self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Message => "Message",
        }
    }

    /// Hint shown while the field is empty
    pub fn placeholder(&self) -> &'static str {
        match self {
            ContactField::Name => "Your full name",
            ContactField::Email => "your.email@example.com",
            ContactField::Message => "Tell us about your project, question, or feedback...",
        }
    }

    pub fn next(&self) -> ContactField {
        match self {
            ContactField::Name => ContactField::Email,
            ContactField::Email => ContactField::Message,
            ContactField::Message => ContactField::Name,
        }
    }

    pub fn prev(&self) -> ContactField {
        match self {
            ContactField::Name => ContactField::Message,
            ContactField::Email => ContactField::Name,
            ContactField::Message => ContactField::Email,
        }
    }
}

/// Submission lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

/// What the form asks its owner to do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Submit,
}

/// Contact message handed to a delivery backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

// ==================== Delivery ====================

/// Destination for submitted messages (allows mocking)
#[cfg_attr(test, automock)]
pub trait ContactDelivery {
    fn deliver(&self, submission: &ContactSubmission) -> Result<()>;
}

/// Records messages in the log only
#[derive(Debug, Default)]
pub struct LogDelivery;

impl ContactDelivery for LogDelivery {
    fn deliver(&self, submission: &ContactSubmission) -> Result<()> {
        info!(
            name = %submission.name,
            email = %submission.email,
            "Contact message received ({} chars)",
            submission.message.chars().count()
        );
        Ok(())
    }
}

/// Appends each message as one JSON line to a file
#[derive(Debug, Clone)]
pub struct OutboxDelivery {
    path: PathBuf,
}

impl OutboxDelivery {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContactDelivery for OutboxDelivery {
    fn deliver(&self, submission: &ContactSubmission) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let line = serde_json::to_string(submission).context("Failed to encode message")?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open outbox {}", self.path.display()))?;
        writeln!(file, "{line}").context("Failed to write to outbox")?;
        Ok(())
    }
}

// ==================== Contact Form ====================

pub struct ContactForm {
    name: TextField,
    email: TextField,
    message: TextField,
    focus: ContactField,
    status: SubmitStatus,
    /// Submission captured when sending started
    in_flight: Option<ContactSubmission>,
    /// Next scheduled transition (completion or reset to idle)
    deadline: Option<Instant>,
    delivery: Box<dyn ContactDelivery>,
    submit_delay: Duration,
    status_reset: Duration,
}

impl ContactForm {
    pub fn new(delivery: Box<dyn ContactDelivery>) -> Self {
        Self {
            name: TextField::default(),
            email: TextField::default(),
            message: TextField::default(),
            focus: ContactField::Name,
            status: SubmitStatus::Idle,
            in_flight: None,
            deadline: None,
            delivery,
            submit_delay: DEFAULT_SUBMIT_DELAY,
            status_reset: DEFAULT_STATUS_RESET,
        }
    }

    pub fn with_timings(mut self, submit_delay: Duration, status_reset: Duration) -> Self {
        self.submit_delay = submit_delay;
        self.status_reset = status_reset;
        self
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn focus(&self) -> ContactField {
        self.focus
    }

    /// Move the cursor to `field`
    pub fn set_focus(&mut self, field: ContactField) {
        self.focus = field;
    }

    pub fn field(&self, field: ContactField) -> &TextField {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    fn field_mut(&mut self, field: ContactField) -> &mut TextField {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        }
    }

    /// Fields that are empty after trimming
    pub fn missing_fields(&self) -> Vec<ContactField> {
        [ContactField::Name, ContactField::Email, ContactField::Message]
            .into_iter()
            .filter(|f| self.field(*f).is_blank())
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Status banner text, if any
    pub fn status_message(&self) -> Option<&'static str> {
        match self.status {
            SubmitStatus::Success => Some(SUCCESS_MESSAGE),
            SubmitStatus::Error => Some(ERROR_MESSAGE),
            _ => None,
        }
    }

    pub fn submit(&mut self) -> bool {
        self.submit_at(Instant::now())
    }

    /// Begin sending as of `now`
    ///
    /// Only allowed from `Idle` with every field filled in; otherwise a no-op
    /// returning `false`.
    pub fn submit_at(&mut self, now: Instant) -> bool {
        if self.status != SubmitStatus::Idle || !self.is_valid() {
            return false;
        }

        self.in_flight = Some(ContactSubmission {
            name: self.name.value().trim().to_string(),
            email: self.email.value().trim().to_string(),
            message: self.message.value().trim().to_string(),
        });
        self.status = SubmitStatus::Submitting;
        self.deadline = Some(now + self.submit_delay);
        debug!("Contact form submitting");
        true
    }

    /// Fire a due transition, returning whether the status changed
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }

        match self.status {
            SubmitStatus::Submitting => {
                let delivered = match self.in_flight.take() {
                    Some(submission) => self.delivery.deliver(&submission),
                    None => Err(anyhow::anyhow!("no message in flight")),
                };
                match delivered {
                    Ok(()) => {
                        self.status = SubmitStatus::Success;
                        self.name.clear();
                        self.email.clear();
                        self.message.clear();
                        self.focus = ContactField::Name;
                    }
                    Err(e) => {
                        warn!("Contact delivery failed: {e:#}");
                        self.status = SubmitStatus::Error;
                    }
                }
                self.deadline = Some(now + self.status_reset);
            }
            SubmitStatus::Success | SubmitStatus::Error => {
                self.status = SubmitStatus::Idle;
                self.deadline = None;
            }
            SubmitStatus::Idle => self.deadline = None,
        }
        true
    }

    /// Drop any scheduled transition
    pub fn cancel_pending(&mut self) {
        if self.deadline.take().is_some() {
            debug!("Discarded pending contact form transition");
        }
    }

    /// Handle key input
    ///
    /// Returns `Some(FormAction::Submit)` when Enter is pressed on the last
    /// field. Editing keys are ignored while a message is being sent.
    pub fn handle_key(&mut self, key: KeyCode) -> Option<FormAction> {
        match key {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::Enter => {
                if self.focus == ContactField::Message {
                    Some(FormAction::Submit)
                } else {
                    self.focus = self.focus.next();
                    None
                }
            }
            _ => {
                if self.status != SubmitStatus::Submitting {
                    let focus = self.focus;
                    self.field_mut(focus).handle_key(key);
                }
                None
            }
        }
    }

    /// Render the form into `area`
    pub fn render(&self, f: &mut Frame, area: Rect, t: &StyleBundle) {
        let block = Block::default()
            .title(Span::styled(" Send us a Message ", t.style_subtitle()))
            .borders(Borders::ALL)
            .border_style(t.style_border())
            .style(t.style_card());
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Name
                Constraint::Length(3), // Email
                Constraint::Min(3),    // Message
                Constraint::Length(1), // Spacing
                Constraint::Length(1), // Button
                Constraint::Length(2), // Status
            ])
            .split(inner);

        let editable = self.status != SubmitStatus::Submitting;
        for (field, chunk) in [
            (ContactField::Name, chunks[0]),
            (ContactField::Email, chunks[1]),
            (ContactField::Message, chunks[2]),
        ] {
            self.render_field(f, chunk, field, editable, t);
        }

        let button = match self.status {
            SubmitStatus::Submitting => {
                Span::styled(" Sending... ", t.style_button_disabled())
            }
            _ => Span::styled(" Send Message ", t.style_button()),
        };
        let button_line = Line::from(vec![
            button,
            Span::styled("  Enter on Message or Ctrl+S", t.style_text_muted()),
        ]);
        f.render_widget(Paragraph::new(button_line), chunks[4]);

        if let Some(message) = self.status_message() {
            let style = match self.status {
                SubmitStatus::Success => t.style_success(),
                _ => t.style_error(),
            };
            let banner = Paragraph::new(message)
                .style(style)
                .alignment(Alignment::Left)
                .wrap(Wrap { trim: true });
            f.render_widget(banner, chunks[5]);
        }
    }

    fn render_field(
        &self,
        f: &mut Frame,
        area: Rect,
        field: ContactField,
        editable: bool,
        t: &StyleBundle,
    ) {
        let input = self.field(field);
        let focused = self.focus == field;

        let content = if focused && editable {
            let (before, under, after) = input.split_at_cursor();
            let cursor = under.map(String::from).unwrap_or_else(|| " ".to_string());
            Line::from(vec![
                Span::raw(before),
                Span::styled(cursor, t.style_cursor()),
                Span::raw(after),
            ])
        } else if input.value().is_empty() {
            Line::from(Span::styled(field.placeholder(), t.style_text_muted()))
        } else {
            Line::from(input.value())
        };

        let border = if focused {
            t.style_border_focus()
        } else {
            t.style_border()
        };
        let block = Block::default()
            .title(Span::styled(format!(" {} * ", field.label()), t.style_text()))
            .borders(Borders::ALL)
            .border_style(border);

        let paragraph = Paragraph::new(content)
            .block(block)
            .style(t.style_input())
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }
}
