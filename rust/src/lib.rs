//! Critical Path Method scheduling core.
//!
//! Turns a list of activities (named, duration-bearing edges between numbered
//! events) into an event schedule: earliest and latest event times, slack, and
//! the set of critical activities. Editing, persistence and drawing live in the
//! caller; this crate offers CSV interchange helpers and a Python module for them.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;
use thiserror::Error;

mod config;
mod event_index;
pub mod graph;
pub mod interchange;
pub mod logging;
mod models;
pub mod scheduler;
pub mod validation;

pub use config::CpmConfig;
pub use graph::{ActivityGraph, ActivityGraphBuilder, CycleError};
pub use interchange::{
    load_activities, read_activities, save_activities, write_activities, InterchangeError,
};
pub use models::{Activity, ActivitySchedule, EventId, EventTiming, ScheduleResult, Time};
pub use scheduler::{schedule, CpmScheduler};
pub use validation::{parse_activity_fields, validate_event_order, ActivityNamer, ValidationError};

/// Errors from an end-to-end scheduling run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CpmError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Cycle(#[from] CycleError),
}

/// Validate, build and schedule an activity list.
///
/// # Arguments
/// * `activities` - Activities in editor order
/// * `config` - Event-order enforcement and verbosity
///
/// # Returns
/// * `Ok(ScheduleResult)` with event times and critical activities
/// * `Err(CpmError::Validation)` if event order is enforced and violated
/// * `Err(CpmError::Cycle)` if the activities contain a directed cycle
pub fn compute_schedule(
    activities: &[Activity],
    config: &CpmConfig,
) -> Result<ScheduleResult, CpmError> {
    if config.enforce_event_order {
        validate_event_order(activities)?;
    }

    let graph = ActivityGraph::build(activities)?;
    log_summary!(
        config.verbosity,
        "[cpm] built graph: {} events, {} activities",
        graph.event_count(),
        graph.activity_count()
    );

    Ok(CpmScheduler::new(config.clone()).schedule(&graph))
}

/// Compute the CPM schedule for a list of activities.
///
/// # Raises
/// * ValueError if event order is violated or a cycle is detected
#[pyfunction]
#[pyo3(signature = (activities, config=None))]
fn generate_cpm(activities: Vec<Activity>, config: Option<CpmConfig>) -> PyResult<ScheduleResult> {
    let config = config.unwrap_or_default();
    compute_schedule(&activities, &config)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// Parse an activity from editor text fields.
///
/// An empty name is replaced by the automatic name for `auto_index`
/// (0 -> "A", 25 -> "Z", 26 -> "AA").
///
/// # Returns
/// * `(activity, next_auto_index)`: the index is `auto_index + 1` when an
///   automatic name was used and `auto_index` otherwise, so the caller can
///   store it without repeating the empty-name check
///
/// # Raises
/// * ValueError if a numeric field is not an integer or end <= start
#[pyfunction]
#[pyo3(signature = (name, start_event, end_event, duration, auto_index=0))]
fn parse_activity(
    name: &str,
    start_event: &str,
    end_event: &str,
    duration: &str,
    auto_index: u64,
) -> PyResult<(Activity, u64)> {
    let mut namer = ActivityNamer::starting_at(auto_index);
    let activity = parse_activity_fields(name, start_event, end_event, duration, &mut namer)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;
    Ok((activity, namer.position()))
}

/// Load activities from a CSV file, skipping malformed rows.
#[pyfunction]
#[pyo3(signature = (path, verbosity=0))]
fn load_activities_csv(path: &str, verbosity: u8) -> PyResult<Vec<Activity>> {
    load_activities(path, verbosity)
        .map_err(|e| pyo3::exceptions::PyIOError::new_err(e.to_string()))
}

/// Save activities to a CSV file with a header row.
#[pyfunction]
fn save_activities_csv(path: &str, activities: Vec<Activity>) -> PyResult<()> {
    save_activities(path, &activities)
        .map_err(|e| pyo3::exceptions::PyIOError::new_err(e.to_string()))
}

/// The cpm.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Data types
    m.add_class::<Activity>()?;
    m.add_class::<EventTiming>()?;
    m.add_class::<ActivitySchedule>()?;
    m.add_class::<ScheduleResult>()?;

    // Config types
    m.add_class::<CpmConfig>()?;

    // Algorithms and interchange
    m.add_function(wrap_pyfunction!(generate_cpm, m)?)?;
    m.add_function(wrap_pyfunction!(parse_activity, m)?)?;
    m.add_function(wrap_pyfunction!(load_activities_csv, m)?)?;
    m.add_function(wrap_pyfunction!(save_activities_csv, m)?)?;

    Ok(())
}
