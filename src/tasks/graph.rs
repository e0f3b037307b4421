// src/tasks/graph.rs

use std::collections::HashSet;

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::{Result, StylewatchError};
use crate::tasks::TaskKind;

/// Task dependency graph.
///
/// Edge direction: dependency -> dependent, so `css -> watch` means `watch`
/// runs after `css`.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    graph: DiGraphMap<TaskKind, ()>,
}

impl TaskGraph {
    /// The stock graph: `css`, `watch` after `css`, `default` after `css`.
    pub fn builtin() -> Self {
        let mut graph = DiGraphMap::new();
        for task in TaskKind::all() {
            graph.add_node(task);
        }
        graph.add_edge(TaskKind::Css, TaskKind::Watch, ());
        graph.add_edge(TaskKind::Css, TaskKind::Default, ());
        Self { graph }
    }

    /// Immediate dependencies of `task`.
    pub fn dependencies_of(&self, task: TaskKind) -> Vec<TaskKind> {
        let mut deps: Vec<TaskKind> = self
            .graph
            .neighbors_directed(task, Direction::Incoming)
            .collect();
        deps.sort();
        deps
    }

    /// Look a task up by its CLI name; unknown names are `TaskNotFound`.
    pub fn find(&self, name: &str) -> Result<TaskKind> {
        self.graph
            .nodes()
            .find(|t| t.name() == name)
            .ok_or_else(|| StylewatchError::TaskNotFound(name.to_string()))
    }

    /// Execution order for `task`: every transitive dependency first, then
    /// the task itself.
    pub fn plan(&self, task: TaskKind) -> Result<Vec<TaskKind>> {
        if !self.graph.contains_node(task) {
            return Err(StylewatchError::TaskNotFound(task.name().to_string()));
        }

        let mut needed = HashSet::new();
        let mut stack = vec![task];
        while let Some(t) = stack.pop() {
            if needed.insert(t) {
                stack.extend(self.dependencies_of(t));
            }
        }

        let order = toposort(&self.graph, None).map_err(|cycle| {
            StylewatchError::ConfigError(format!(
                "cycle detected in task graph involving '{}'",
                cycle.node_id()
            ))
        })?;

        Ok(order.into_iter().filter(|t| needed.contains(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_runs_alone() {
        let g = TaskGraph::builtin();
        assert_eq!(g.plan(TaskKind::Css).unwrap(), vec![TaskKind::Css]);
    }

    #[test]
    fn watch_compiles_first() {
        let g = TaskGraph::builtin();
        assert_eq!(
            g.plan(TaskKind::Watch).unwrap(),
            vec![TaskKind::Css, TaskKind::Watch]
        );
    }

    #[test]
    fn default_is_an_alias_for_css() {
        let g = TaskGraph::builtin();
        assert_eq!(g.dependencies_of(TaskKind::Default), vec![TaskKind::Css]);
        assert_eq!(
            g.plan(TaskKind::Default).unwrap(),
            vec![TaskKind::Css, TaskKind::Default]
        );
    }

    #[test]
    fn find_by_name() {
        let g = TaskGraph::builtin();
        assert_eq!(g.find("watch").unwrap(), TaskKind::Watch);
        assert!(matches!(
            g.find("sprites"),
            Err(StylewatchError::TaskNotFound(name)) if name == "sprites"
        ));
    }
}
