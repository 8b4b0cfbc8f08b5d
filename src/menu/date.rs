//! Date picker: a one-line menu of year, month and day fields
//!
//! Arrow keys step the active field by one calendar unit. Typing
//! rewrites the active field from the keys typed so far (the leader
//! buffer): digits for the year and day, a month-name prefix for the
//! month.

use super::layout::LineLayout;
use super::{Menu, Selectable};
use crate::error::{Error, Result};
use crate::term::{CursorGuard, Key, Terminal};
use crate::text::StyledText;
use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime, TimeDelta};
use tracing::{debug, trace};

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d %B %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d-%b-%Y",
    "%d.%m.%Y",
];

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Output format of the picker
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Year,
    Month,
    Day,
}

impl DateField {
    const ALL: [DateField; 3] = [DateField::Year, DateField::Month, DateField::Day];

    pub fn index(&self) -> usize {
        match self {
            DateField::Year => 0,
            DateField::Month => 1,
            DateField::Day => 2,
        }
    }
}

/// The picked date, the field being edited and the keys typed into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFieldState {
    pub date: NaiveDate,
    pub active: DateField,
    pub leader: String,
}

impl Selectable for DateFieldState {
    fn count(&self) -> usize {
        DateField::ALL.len()
    }

    fn selected(&self) -> usize {
        self.active.index()
    }

    fn set_selected(&mut self, index: usize) {
        self.active = DateField::ALL[index % DateField::ALL.len()];
    }
}

impl DateFieldState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            active: DateField::Year,
            leader: String::new(),
        }
    }

    pub fn next_field(&mut self) {
        self.leader.clear();
        self.next();
    }

    pub fn prev_field(&mut self) {
        self.leader.clear();
        self.prev();
    }

    /// Move the active field by `delta` units, overflowing into the next
    /// larger unit when the day does not exist (Jan 31 + 1 month is Mar 3).
    pub fn step(&mut self, delta: i32) {
        self.leader.clear();
        if let Some(date) = shift(self.date, self.active, delta) {
            self.date = date;
        }
    }

    pub fn push_leader(&mut self, key: char) {
        self.leader.push(key);
        self.reinterpret();
    }

    pub fn pop_leader(&mut self) {
        self.leader.pop();
        self.reinterpret();
    }

    /// Rewrite the active field from the leader buffer
    fn reinterpret(&mut self) {
        if self.leader.is_empty() {
            return;
        }
        let (year, month, day) = (self.date.year(), self.date.month(), self.date.day());

        let candidate = match self.active {
            DateField::Year => {
                keep_last_if_longer(&mut self.leader, 4);
                format!("{:0<4}", self.leader)
                    .parse()
                    .ok()
                    .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
            }
            DateField::Month => {
                keep_last_if_longer(&mut self.leader, 3);
                let prefix = self.leader.to_lowercase();
                match MONTHS.iter().position(|name| name.starts_with(&prefix)) {
                    Some(index) => NaiveDate::from_ymd_opt(year, index as u32 + 1, day),
                    None => {
                        self.leader.clear();
                        None
                    }
                }
            }
            DateField::Day => {
                keep_last_if_longer(&mut self.leader, 2);
                format!("{:0>2}", self.leader)
                    .parse()
                    .ok()
                    .and_then(|day| NaiveDate::from_ymd_opt(year, month, day))
            }
        };

        match candidate {
            Some(date) => self.date = date,
            None => trace!(leader = %self.leader, field = ?self.active, "Leader keys rejected"),
        }
    }

    /// Year, abbreviated month and zero-padded day
    pub fn parts(&self) -> [String; 3] {
        [
            self.date.format("%Y").to_string(),
            self.date.format("%b").to_string(),
            self.date.format("%d").to_string(),
        ]
    }

    pub fn formatted(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

fn keep_last_if_longer(buffer: &mut String, max: usize) {
    if buffer.chars().count() > max {
        if let Some(last) = buffer.pop() {
            buffer.clear();
            buffer.push(last);
        }
    }
}

/// Build a date from parts, rolling a day past the end of the month into
/// the following month
fn overflowing(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(u64::from(day.saturating_sub(1))))
}

fn shift(date: NaiveDate, field: DateField, delta: i32) -> Option<NaiveDate> {
    match field {
        DateField::Year => overflowing(date.year().checked_add(delta)?, date.month(), date.day()),
        DateField::Month => {
            let months = date.year().checked_mul(12)? + date.month0() as i32 + delta;
            let month = months.rem_euclid(12) as u32 + 1;
            overflowing(months.div_euclid(12), month, date.day())
        }
        DateField::Day => date.checked_add_signed(TimeDelta::days(i64::from(delta))),
    }
}

/// Parse the picker's starting date.
///
/// Accepts ISO dates with `-` or `/`, compact `YYYYMMDD`, ISO date-times
/// (the time is dropped), written-out forms such as `4 October 1990` or
/// `Oct 4, 1990`, and the words `today`, `now`, `tomorrow`, `yesterday`.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    let today = Local::now().date_naive();
    match input.to_lowercase().as_str() {
        "today" | "now" => return Some(today),
        "tomorrow" => return today.succ_opt(),
        "yesterday" => return today.pred_opt(),
        _ => {}
    }

    if input.len() == 8 && input.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::from_ymd_opt(
            input[..4].parse().ok()?,
            input[4..6].parse().ok()?,
            input[6..].parse().ok()?,
        );
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
                .map(|datetime| datetime.date())
        })
}

fn draw<T: Terminal + ?Sized>(
    menu: &Menu,
    term: &mut T,
    state: &DateFieldState,
    header: Option<&str>,
) -> Result<usize> {
    let parts = state.parts();
    let layout = LineLayout::new(header, &parts, menu.placement(), term.columns());
    let screen = layout.render(
        &parts,
        state.active.index(),
        &menu.option_style,
        &menu.effective_selected_style(),
    );
    term.write_stdout(&screen)?;
    Ok(layout.rows())
}

pub(super) fn run<T: Terminal + ?Sized>(
    menu: &Menu,
    term: &mut T,
    date: &str,
    header: Option<&str>,
) -> Result<String> {
    let mut term = CursorGuard::hide(term)?;

    let Some(parsed) = parse_date(date) else {
        StyledText::new(format!("Provided string '{}' is not a valid date", date)).error(&mut *term, false)?;
        return Ok(date.to_string());
    };

    let mut state = DateFieldState::new(parsed);
    let mut rows = draw(menu, &mut *term, &state, header)?;

    loop {
        let key = term.read_key()?;
        trace!(?key, "Date picker key");

        match key {
            Key::Right | Key::Tab => state.next_field(),
            Key::Left => state.prev_field(),
            Key::Up => state.step(1),
            Key::Down => state.step(-1),
            Key::Backspace => state.pop_leader(),
            Key::Char(c) if c.is_alphanumeric() => state.push_leader(c),
            Key::Enter => {
                if menu.erases() {
                    term.erase_lines(rows)?;
                }
                debug!(date = %state.date, "Date chosen");
                return Ok(state.formatted());
            }
            Key::Interrupt => {
                debug!("Date picker cancelled");
                return Err(Error::Interrupted);
            }
            _ => {}
        }

        term.erase_lines(rows)?;
        rows = draw(menu, &mut *term, &state, header)?;
        debug!(date = %state.date, field = ?state.active, leader = %state.leader, "Date picker redrawn");
    }
}
