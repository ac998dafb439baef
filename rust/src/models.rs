//! Core data types for the CPM core.

use pyo3::prelude::*;
use std::collections::BTreeMap;

/// Integer identifier of an event (a node in the activity network).
pub type EventId = u64;

/// Computed event time. Wider than a duration so a path of `u64` durations
/// always fits.
pub type Time = u128;

/// A named activity leading from one event to another.
///
/// Activities are values: editing one means replacing the record.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Activity {
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub start_event: EventId,
    #[pyo3(get)]
    pub end_event: EventId,
    #[pyo3(get)]
    pub duration: u64,
}

#[pymethods]
impl Activity {
    #[new]
    pub fn new(name: String, start_event: EventId, end_event: EventId, duration: u64) -> Self {
        Self {
            name,
            start_event,
            end_event,
            duration,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Activity(name={:?}, start={}, end={}, duration={})",
            self.name, self.start_event, self.end_event, self.duration
        )
    }
}

/// Computed times for one event.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventTiming {
    #[pyo3(get)]
    pub event: EventId,
    /// Earliest time the event can occur (ES).
    #[pyo3(get)]
    pub earliest_start: Time,
    /// Latest time the event may occur without delaying the project (LF).
    #[pyo3(get)]
    pub latest_finish: Time,
    /// LF - ES.
    #[pyo3(get)]
    pub slack: Time,
}

impl EventTiming {
    pub fn has_zero_slack(&self) -> bool {
        self.slack == 0
    }
}

#[pymethods]
impl EventTiming {
    fn __repr__(&self) -> String {
        format!(
            "EventTiming(event={}, ES={}, LF={}, slack={})",
            self.event, self.earliest_start, self.latest_finish, self.slack
        )
    }
}

/// Scheduling outcome for one input activity.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivitySchedule {
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub start_event: EventId,
    #[pyo3(get)]
    pub end_event: EventId,
    #[pyo3(get)]
    pub duration: u64,
    /// LF(end) - duration - ES(start).
    #[pyo3(get)]
    pub total_float: Time,
    #[pyo3(get)]
    pub critical: bool,
}

#[pymethods]
impl ActivitySchedule {
    fn __repr__(&self) -> String {
        format!(
            "ActivitySchedule(name={:?}, start={}, end={}, float={}, critical={})",
            self.name, self.start_event, self.end_event, self.total_float, self.critical
        )
    }
}

/// Result of one scheduling run.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleResult {
    /// Largest earliest-start time over all events.
    #[pyo3(get)]
    pub project_duration: Time,
    /// Timing per event, keyed by event id.
    #[pyo3(get)]
    pub events: BTreeMap<EventId, EventTiming>,
    /// One entry per graph edge, in the order the activities were added.
    #[pyo3(get)]
    pub activities: Vec<ActivitySchedule>,
}

impl ScheduleResult {
    pub fn timing(&self, event: EventId) -> Option<&EventTiming> {
        self.events.get(&event)
    }

    /// Iterate over the activities with zero total float.
    pub fn critical(&self) -> impl Iterator<Item = &ActivitySchedule> {
        self.activities.iter().filter(|a| a.critical)
    }
}

#[pymethods]
impl ScheduleResult {
    /// Timing of a single event, or None if the event is not in the graph.
    pub fn event_timing(&self, event: EventId) -> Option<EventTiming> {
        self.timing(event).cloned()
    }

    /// Critical activities in input order.
    pub fn critical_activities(&self) -> Vec<ActivitySchedule> {
        self.critical().cloned().collect()
    }

    /// (start, end) pairs of the critical activities, used to color rendered edges.
    pub fn critical_edges(&self) -> Vec<(EventId, EventId)> {
        self.critical()
            .map(|a| (a.start_event, a.end_event))
            .collect()
    }

    /// Events with zero slack, ascending.
    pub fn critical_path_events(&self) -> Vec<EventId> {
        self.events
            .values()
            .filter(|t| t.has_zero_slack())
            .map(|t| t.event)
            .collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(project_duration={}, events={}, critical={})",
            self.project_duration,
            self.events.len(),
            self.critical().count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_entry(name: &str, start: EventId, end: EventId, critical: bool) -> ActivitySchedule {
        ActivitySchedule {
            name: name.to_string(),
            start_event: start,
            end_event: end,
            duration: 1,
            total_float: if critical { 0 } else { 1 },
            critical,
        }
    }

    #[test]
    fn test_critical_edges_keep_input_order_and_duplicates() {
        let result = ScheduleResult {
            project_duration: 0,
            events: BTreeMap::new(),
            activities: vec![
                make_entry("A", 1, 2, true),
                make_entry("B", 1, 3, false),
                make_entry("C", 2, 4, true),
                make_entry("D", 2, 4, true),
            ],
        };

        assert_eq!(result.critical_edges(), vec![(1, 2), (2, 4), (2, 4)]);
        let names: Vec<String> = result
            .critical_activities()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["A", "C", "D"]);
    }

    #[test]
    fn test_critical_path_events() {
        let mut events = BTreeMap::new();
        for (event, es, lf) in [(3, 2, 2), (1, 0, 0), (2, 1, 4)] {
            events.insert(
                event,
                EventTiming {
                    event,
                    earliest_start: es,
                    latest_finish: lf,
                    slack: lf - es,
                },
            );
        }
        let result = ScheduleResult {
            project_duration: 2,
            events,
            activities: vec![],
        };

        assert_eq!(result.critical_path_events(), vec![1, 3]);
        assert_eq!(result.timing(2).map(|t| t.slack), Some(3));
        assert!(result.event_timing(9).is_none());
    }

    #[test]
    fn test_event_slack_is_not_activity_criticality() {
        // Both endpoints have zero slack, yet the activity between them has float
        let timing = |event, t| EventTiming {
            event,
            earliest_start: t,
            latest_finish: t,
            slack: 0,
        };
        let result = ScheduleResult {
            project_duration: 5,
            events: BTreeMap::from([(1, timing(1, 0)), (2, timing(2, 5))]),
            activities: vec![make_entry("Short", 1, 2, false)],
        };

        assert!(result.events.values().all(EventTiming::has_zero_slack));
        assert!(result.critical_edges().is_empty());
    }
}
