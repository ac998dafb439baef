//! Input checks applied to activity records before they reach the graph builder.
//!
//! These mirror the rules of the activity editor: numeric fields must be
//! non-negative integers and an activity must lead to a higher-numbered event.
//! The ordering rule is a convenience only; cycle detection in the graph
//! builder is the authoritative acyclicity check.

use thiserror::Error;

use crate::models::{Activity, EventId};

/// Rejected activity input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Start event, end event and duration must be integers (got {field} = {value:?})")]
    NonNumeric { field: &'static str, value: String },
    #[error("End event must be greater than start event (activity {name:?}: {start} -> {end})")]
    EventOrder {
        name: String,
        start: EventId,
        end: EventId,
    },
}

/// Generates names for activities entered without one: A, B, ..., Z, AA, AB, ...
#[derive(Debug, Clone, Default)]
pub struct ActivityNamer {
    counter: u64,
}

impl ActivityNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the sequence at a zero-based position (0 -> "A", 26 -> "AA").
    pub fn starting_at(counter: u64) -> Self {
        Self { counter }
    }

    /// Zero-based position of the next name to be produced.
    pub fn position(&self) -> u64 {
        self.counter
    }

    /// Produce the next name and advance the counter.
    pub fn next_name(&mut self) -> String {
        let name = Self::name_for(self.counter);
        self.counter += 1;
        name
    }

    /// Spreadsheet-column style name for a zero-based counter.
    fn name_for(counter: u64) -> String {
        let mut n = counter + 1;
        let mut letters = Vec::new();
        while n > 0 {
            let rem = ((n - 1) % 26) as u8;
            letters.push(char::from(b'A' + rem));
            n = (n - 1) / 26;
        }
        letters.iter().rev().collect()
    }
}

fn parse_field(field: &'static str, value: &str) -> Result<u64, ValidationError> {
    let trimmed = value.trim();
    let non_numeric = || ValidationError::NonNumeric {
        field,
        value: value.to_string(),
    };
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(non_numeric());
    }
    trimmed.parse().map_err(|_| non_numeric())
}

/// Parse one activity from editor text fields.
///
/// An empty name is replaced by the namer's next name; the namer only advances
/// when that happens and the numeric fields are valid.
pub fn parse_activity_fields(
    name: &str,
    start_event: &str,
    end_event: &str,
    duration: &str,
    namer: &mut ActivityNamer,
) -> Result<Activity, ValidationError> {
    let start = parse_field("start_event", start_event)?;
    let end = parse_field("end_event", end_event)?;
    let duration = parse_field("duration", duration)?;

    let name = match name.trim() {
        "" => namer.next_name(),
        trimmed => trimmed.to_string(),
    };

    let activity = Activity::new(name, start, end, duration);
    check_event_order(&activity)?;
    Ok(activity)
}

fn check_event_order(activity: &Activity) -> Result<(), ValidationError> {
    if activity.end_event <= activity.start_event {
        return Err(ValidationError::EventOrder {
            name: activity.name.clone(),
            start: activity.start_event,
            end: activity.end_event,
        });
    }
    Ok(())
}

/// Check that every activity leads to a higher-numbered event.
///
/// Returns the first violation in input order.
pub fn validate_event_order(activities: &[Activity]) -> Result<(), ValidationError> {
    activities.iter().try_for_each(check_event_order)
}
