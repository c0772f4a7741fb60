use std::ops::Range;

use crate::data::model::{Trip, TripView};

/// Rows shown per page of raw data.
pub const PAGE_SIZE: usize = 5;

// ---------------------------------------------------------------------------
// Pager state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Showing pages; `offset` is the next row to display.
    Paging { offset: usize },
    Stopped,
}

/// Two-state pager over a view: either advancing five rows at a time or
/// stopped. The first user answer decides the initial state; any later
/// non-"yes" answer stops it, as does running out of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    state: State,
}

impl Pager {
    pub fn new(first_answer: &str) -> Self {
        let state = if is_yes(first_answer) {
            State::Paging { offset: 0 }
        } else {
            State::Stopped
        };
        Pager { state }
    }

    pub fn is_stopped(&self) -> bool {
        self.state == State::Stopped
    }

    /// The next page of row positions, clamped to `len`. Returns `None` once
    /// stopped or past the end of the data; never errors on short data.
    pub fn next_page(&mut self, len: usize) -> Option<Range<usize>> {
        match self.state {
            State::Stopped => None,
            State::Paging { offset } => {
                if offset >= len {
                    self.state = State::Stopped;
                    return None;
                }
                let end = (offset + PAGE_SIZE).min(len);
                self.state = State::Paging { offset: end };
                Some(offset..end)
            }
        }
    }

    /// Feed the answer to the "next 5 rows?" prompt.
    pub fn answer(&mut self, response: &str) {
        if !is_yes(response) {
            self.state = State::Stopped;
        }
    }
}

/// Affirmative answer check shared by the pager and the session prompts.
pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

// ---------------------------------------------------------------------------
// Row rendering
// ---------------------------------------------------------------------------

/// One raw row, formatted for the terminal.
pub fn format_trip(position: usize, trip: &Trip) -> String {
    let mut line = format!(
        "{position:>6}  {}  {:<4} s  {} -> {}  [{}]",
        trip.start_time.format("%Y-%m-%d %H:%M:%S"),
        trip.duration_secs,
        trip.start_station,
        trip.end_station,
        trip.user_type,
    );
    if let Some(gender) = &trip.gender {
        line.push_str(&format!("  {gender}"));
    }
    if let Some(year) = trip.birth_year {
        line.push_str(&format!("  b.{year}"));
    }
    line
}

/// Print the rows a page selected.
pub fn print_page(view: &TripView<'_>, range: Range<usize>) {
    for i in range {
        if let Some(trip) = view.get(i) {
            println!("{}", format_trip(i, trip));
        }
    }
}
