//! Activity network construction and cycle detection.
//!
//! Events become nodes and activities become directed edges carrying a name and
//! a duration. Parallel edges between the same pair of events are kept apart.
//! A graph only exists once a topological order has been found, so every
//! `ActivityGraph` is acyclic.

use std::collections::VecDeque;
use thiserror::Error;

use crate::event_index::{EventIndex, NodeIndex};
use crate::models::{Activity, EventId};

/// The activity set does not form a DAG.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cycle detected in activities graph (unordered events: {events:?})")]
pub struct CycleError {
    /// Events left without a topological position, ascending. Includes the
    /// events on the cycle and everything reachable only through it.
    pub events: Vec<EventId>,
}

/// A directed edge of the activity network.
#[derive(Debug, Clone)]
pub(crate) struct Edge {
    pub(crate) activity: Activity,
    pub(crate) from: NodeIndex,
    pub(crate) to: NodeIndex,
}

/// Validated, acyclic activity network.
#[derive(Debug, Clone)]
pub struct ActivityGraph {
    pub(crate) index: EventIndex,
    /// Edges in insertion order.
    pub(crate) edges: Vec<Edge>,
    /// Outgoing edge indices per node.
    pub(crate) outgoing: Vec<Vec<usize>>,
    /// Incoming edge indices per node.
    pub(crate) incoming: Vec<Vec<usize>>,
    pub(crate) topo_order: Vec<NodeIndex>,
}

/// Accumulates events and activities before a graph is validated.
#[derive(Debug, Clone, Default)]
pub struct ActivityGraphBuilder {
    events: Vec<EventId>,
    activities: Vec<Activity>,
}

impl ActivityGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event with no activities of its own. Idempotent.
    pub fn add_event(&mut self, event: EventId) -> &mut Self {
        self.events.push(event);
        self
    }

    /// Register both events of the activity and an edge between them.
    pub fn add_activity(&mut self, activity: &Activity) -> &mut Self {
        self.events.push(activity.start_event);
        self.events.push(activity.end_event);
        self.activities.push(activity.clone());
        self
    }

    pub fn build(&self) -> Result<ActivityGraph, CycleError> {
        let index = EventIndex::from_events(self.events.iter().copied());
        let n = index.len();

        let mut edges = Vec::with_capacity(self.activities.len());
        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); n];

        for activity in &self.activities {
            // Both endpoints were pushed in add_activity
            let (Some(from), Some(to)) = (
                index.node(activity.start_event),
                index.node(activity.end_event),
            ) else {
                continue;
            };

            let edge_idx = edges.len();
            outgoing[from as usize].push(edge_idx);
            incoming[to as usize].push(edge_idx);
            edges.push(Edge {
                activity: activity.clone(),
                from,
                to,
            });
        }

        let topo_order = topological_sort(&index, &edges, &outgoing, &incoming)?;

        Ok(ActivityGraph {
            index,
            edges,
            outgoing,
            incoming,
            topo_order,
        })
    }
}

/// Order nodes with Kahn's algorithm.
///
/// The queue is seeded in ascending node order, which is ascending event order,
/// so the result is deterministic for a given input.
fn topological_sort(
    index: &EventIndex,
    edges: &[Edge],
    outgoing: &[Vec<usize>],
    incoming: &[Vec<usize>],
) -> Result<Vec<NodeIndex>, CycleError> {
    let n = index.len();
    let mut in_degree: Vec<usize> = incoming.iter().map(Vec::len).collect();

    let mut queue: VecDeque<NodeIndex> = (0..n as NodeIndex)
        .filter(|&node| in_degree[node as usize] == 0)
        .collect();

    let mut result: Vec<NodeIndex> = Vec::with_capacity(n);

    while let Some(node) = queue.pop_front() {
        result.push(node);

        for &edge_idx in &outgoing[node as usize] {
            let to = edges[edge_idx].to as usize;
            in_degree[to] -= 1;
            if in_degree[to] == 0 {
                queue.push_back(edges[edge_idx].to);
            }
        }
    }

    if result.len() != n {
        let events = (0..n as NodeIndex)
            .filter(|&node| in_degree[node as usize] > 0)
            .filter_map(|node| index.event(node))
            .collect();
        return Err(CycleError { events });
    }

    Ok(result)
}

impl ActivityGraph {
    /// Build a graph from an ordered list of activities.
    ///
    /// Fails with `CycleError` if the activities contain a directed cycle.
    pub fn build(activities: &[Activity]) -> Result<Self, CycleError> {
        let mut builder = ActivityGraphBuilder::new();
        for activity in activities {
            builder.add_activity(activity);
        }
        builder.build()
    }

    pub fn event_count(&self) -> usize {
        self.index.len()
    }

    pub fn activity_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// All event ids, ascending.
    pub fn events(&self) -> &[EventId] {
        self.index.events()
    }

    /// Activities in insertion order.
    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.edges.iter().map(|e| &e.activity)
    }

    /// Event ids in topological order.
    pub fn topological_order(&self) -> Vec<EventId> {
        self.topo_order
            .iter()
            .filter_map(|&node| self.index.event(node))
            .collect()
    }

    /// Activities leaving `event`. Empty if the event is unknown.
    pub fn successors(&self, event: EventId) -> Vec<&Activity> {
        self.adjacent(&self.outgoing, event)
    }

    /// Activities entering `event`. Empty if the event is unknown.
    pub fn predecessors(&self, event: EventId) -> Vec<&Activity> {
        self.adjacent(&self.incoming, event)
    }

    fn adjacent<'a>(&'a self, lists: &'a [Vec<usize>], event: EventId) -> Vec<&'a Activity> {
        match self.index.node(event) {
            Some(node) => lists[node as usize]
                .iter()
                .map(|&edge_idx| &self.edges[edge_idx].activity)
                .collect(),
            None => Vec::new(),
        }
    }
}
