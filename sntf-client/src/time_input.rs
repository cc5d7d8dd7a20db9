//! Hour/minute/day inputs and their canonical request value.
//!
//! The two time fields hold whatever digits the user typed (at most two
//! each). The canonical `DepartureTime` is recomputed after every edit by
//! clamping each field to its maximum, with an empty field read as zero, so
//! it is always valid even while a field is half-typed.

use chrono::{Local, NaiveTime, Timelike};

use crate::domain::{DayOfWeek, DepartureTime};

/// Maximum digits per field.
const FIELD_WIDTH: usize = 2;

/// One of the two time fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeField {
    Hours,
    Minutes,
}

impl TimeField {
    /// Largest valid value.
    pub fn max(self) -> u32 {
        self.modulus() - 1
    }

    /// Range used for arrow-key wrap-around.
    pub fn modulus(self) -> u32 {
        match self {
            TimeField::Hours => 24,
            TimeField::Minutes => 60,
        }
    }
}

/// Navigation and adjustment keys handled by the time fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

/// The pair of time fields, their focus, and the derived canonical time.
#[derive(Debug, Clone)]
pub struct TimeInput {
    hours: String,
    minutes: String,
    focus: Option<TimeField>,
    /// Set on focus: the next typed digit replaces the field's content.
    select_all: bool,
    canonical: DepartureTime,
}

impl TimeInput {
    /// Fields preset to the given time of day.
    pub fn at(time: NaiveTime) -> Self {
        let mut input = Self {
            hours: format!("{:02}", time.hour()),
            minutes: format!("{:02}", time.minute()),
            focus: None,
            select_all: false,
            canonical: DepartureTime::from_naive(time),
        };
        input.recompute();
        input
    }

    /// Fields preset to the current wall-clock time.
    pub fn now() -> Self {
        Self::at(Local::now().time())
    }

    /// An input event: `raw` is the field's new content.
    ///
    /// Non-digits are stripped and the content is cut to two digits. When
    /// the hours field reaches two digits, focus moves to minutes.
    pub fn input(&mut self, field: TimeField, raw: &str) {
        let digits: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(FIELD_WIDTH)
            .collect();
        let full = digits.len() == FIELD_WIDTH;
        *self.field_mut(field) = digits;
        self.select_all = false;

        if full && field == TimeField::Hours {
            self.focus(TimeField::Minutes);
        }
        self.recompute();
    }

    /// Type one character into the focused field.
    ///
    /// Appends to the field, or replaces it right after focus.
    pub fn type_char(&mut self, c: char) {
        let Some(field) = self.focus else {
            return;
        };
        let mut raw = if self.select_all {
            String::new()
        } else {
            self.text(field).to_string()
        };
        raw.push(c);
        self.input(field, &raw);
    }

    /// A key press in `field`; `caret` is the cursor position in its text.
    pub fn key(&mut self, field: TimeField, key: TimeKey, caret: usize) {
        match key {
            TimeKey::ArrowUp => self.step(field, 1),
            TimeKey::ArrowDown => self.step(field, field.modulus() - 1),
            TimeKey::ArrowRight => {
                if field == TimeField::Hours && caret >= self.hours.len() {
                    self.focus(TimeField::Minutes);
                }
            }
            TimeKey::ArrowLeft => {
                if field == TimeField::Minutes && caret == 0 {
                    self.focus(TimeField::Hours);
                }
            }
        }
    }

    /// Focus a field, selecting its content.
    pub fn focus(&mut self, field: TimeField) {
        self.focus = Some(field);
        self.select_all = true;
    }

    pub fn blur(&mut self) {
        self.focus = None;
        self.select_all = false;
    }

    pub fn focused(&self) -> Option<TimeField> {
        self.focus
    }

    /// The field's displayed text.
    pub fn text(&self, field: TimeField) -> &str {
        match field {
            TimeField::Hours => &self.hours,
            TimeField::Minutes => &self.minutes,
        }
    }

    /// The clamped "HH:MM" value sent to the backend.
    pub fn canonical(&self) -> DepartureTime {
        self.canonical
    }

    /// Add `delta` modulo the field's range and re-pad to two digits.
    fn step(&mut self, field: TimeField, delta: u32) {
        let current = field_value(self.text(field));
        let next = (current % field.modulus() + delta) % field.modulus();
        *self.field_mut(field) = format!("{next:02}");
        self.recompute();
    }

    fn field_mut(&mut self, field: TimeField) -> &mut String {
        match field {
            TimeField::Hours => &mut self.hours,
            TimeField::Minutes => &mut self.minutes,
        }
    }

    fn recompute(&mut self) {
        self.canonical =
            DepartureTime::saturating(field_value(&self.hours), field_value(&self.minutes));
    }
}

/// Numeric value of a field's digits, with empty read as zero.
fn field_value(text: &str) -> u32 {
    text.parse().unwrap_or(0)
}

/// The day-of-week selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySelector {
    value: DayOfWeek,
}

impl DaySelector {
    /// Preset to the current weekday.
    pub fn today() -> Self {
        Self {
            value: DayOfWeek::of(&Local::now()),
        }
    }

    pub fn new(value: DayOfWeek) -> Self {
        Self { value }
    }

    pub fn set(&mut self, value: DayOfWeek) {
        self.value = value;
    }

    pub fn value(&self) -> DayOfWeek {
        self.value
    }
}
