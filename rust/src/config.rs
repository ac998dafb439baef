//! Configuration types for the CPM core.

use pyo3::prelude::*;

/// Runtime options for building and scheduling an activity network.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CpmConfig {
    /// Verbosity level: 0=silent, 1=summary, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Reject activities whose end event is not greater than their start event
    /// before the graph is built. Cycle detection runs regardless.
    #[pyo3(get, set)]
    pub enforce_event_order: bool,
}

impl Default for CpmConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            enforce_event_order: true,
        }
    }
}

#[pymethods]
impl CpmConfig {
    #[new]
    #[pyo3(signature = (verbosity=None, enforce_event_order=None))]
    fn new(verbosity: Option<u8>, enforce_event_order: Option<bool>) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            enforce_event_order: enforce_event_order.unwrap_or(defaults.enforce_event_order),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "CpmConfig(verbosity={}, enforce_event_order={})",
            self.verbosity, self.enforce_event_order
        )
    }
}
