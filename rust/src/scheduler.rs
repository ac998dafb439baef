//! Critical Path Method scheduling over an acyclic activity graph.
//!
//! Two linear passes over the topological order:
//! 1. Forward pass: ES[v] = max over incoming (u -> v, d) of ES[u] + d, 0 for sources
//! 2. Backward pass: LF[u] = min over outgoing (u -> v, d) of LF[v] - d, with
//!    every LF initialized to the project duration
//!
//! Slack is LF - ES per event. An activity is critical when
//! ES[start] == LF[end] - duration.

use std::collections::BTreeMap;

use crate::config::CpmConfig;
use crate::graph::ActivityGraph;
use crate::models::{ActivitySchedule, EventTiming, ScheduleResult, Time};
use crate::{log_checks, log_debug, log_summary};

/// Schedules activity graphs. Holds no state between runs.
#[derive(Debug, Clone, Default)]
pub struct CpmScheduler {
    config: CpmConfig,
}

impl CpmScheduler {
    pub fn new(config: CpmConfig) -> Self {
        Self { config }
    }

    /// Compute event times, slack and activity criticality.
    ///
    /// Total over any `ActivityGraph`: the graph is acyclic by construction.
    pub fn schedule(&self, graph: &ActivityGraph) -> ScheduleResult {
        let verbosity = self.config.verbosity;
        let n = graph.event_count();

        let earliest_start = self.forward_pass(graph);
        let project_duration = earliest_start.iter().copied().max().unwrap_or(0);
        let latest_finish = self.backward_pass(graph, project_duration);

        let mut events = BTreeMap::new();
        for node in 0..n {
            let Some(event) = graph.index.event(node as u32) else {
                continue;
            };
            let es = earliest_start[node];
            let lf = latest_finish[node];
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

        let activities: Vec<ActivitySchedule> = graph
            .edges
            .iter()
            .map(|edge| {
                let activity = &edge.activity;
                let es = earliest_start[edge.from as usize];
                let latest_start = latest_finish[edge.to as usize] - Time::from(activity.duration);
                let critical = es == latest_start;
                log_checks!(
                    verbosity,
                    "[cpm] activity {} ({} -> {}, d={}): ES={} LS={} critical={}",
                    activity.name,
                    activity.start_event,
                    activity.end_event,
                    activity.duration,
                    es,
                    latest_start,
                    critical
                );
                ActivitySchedule {
                    name: activity.name.clone(),
                    start_event: activity.start_event,
                    end_event: activity.end_event,
                    duration: activity.duration,
                    total_float: latest_start - es,
                    critical,
                }
            })
            .collect();

        log_summary!(
            verbosity,
            "[cpm] scheduled {} events, {} activities: project duration {}, {} critical",
            n,
            activities.len(),
            project_duration,
            activities.iter().filter(|a| a.critical).count()
        );

        ScheduleResult {
            project_duration,
            events,
            activities,
        }
    }

    /// Earliest start per node, indexed by node.
    fn forward_pass(&self, graph: &ActivityGraph) -> Vec<Time> {
        let mut earliest_start: Vec<Time> = vec![0; graph.event_count()];

        for &node in &graph.topo_order {
            let idx = node as usize;
            for &edge_idx in &graph.incoming[idx] {
                let edge = &graph.edges[edge_idx];
                let candidate =
                    earliest_start[edge.from as usize] + Time::from(edge.activity.duration);
                if candidate > earliest_start[idx] {
                    log_debug!(
                        self.config.verbosity,
                        "[cpm] ES[{}] {} -> {} via {}",
                        edge.activity.end_event,
                        earliest_start[idx],
                        candidate,
                        edge.activity.name
                    );
                    earliest_start[idx] = candidate;
                }
            }
        }

        earliest_start
    }

    /// Latest finish per node, indexed by node.
    ///
    /// Every node starts at the project duration, which anchors sinks there,
    /// including sinks of components that finish earlier. LF[v] >= ES[v] holds
    /// for every node, so LF[v] - d never goes below ES[u].
    fn backward_pass(&self, graph: &ActivityGraph, project_duration: Time) -> Vec<Time> {
        let mut latest_finish = vec![project_duration; graph.event_count()];

        for &node in graph.topo_order.iter().rev() {
            let idx = node as usize;
            for &edge_idx in &graph.outgoing[idx] {
                let edge = &graph.edges[edge_idx];
                let candidate =
                    latest_finish[edge.to as usize] - Time::from(edge.activity.duration);
                if candidate < latest_finish[idx] {
                    log_debug!(
                        self.config.verbosity,
                        "[cpm] LF[{}] {} -> {} via {}",
                        edge.activity.start_event,
                        latest_finish[idx],
                        candidate,
                        edge.activity.name
                    );
                    latest_finish[idx] = candidate;
                }
            }
        }

        latest_finish
    }
}

/// Schedule a graph with the default configuration.
pub fn schedule(graph: &ActivityGraph) -> ScheduleResult {
    CpmScheduler::default().schedule(graph)
}
