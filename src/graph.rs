//! Dependency and hierarchy graph over a single project's task list.
//!
//! `TaskGraph` is an id-indexed arena built from the flat task payload.
//! Each node keeps its relations as id lists resolved through the arena,
//! never as owning links, so cyclic source data cannot create ownership
//! problems. The graph is a throwaway projection: rebuild it whenever the
//! underlying task list changes.

use std::collections::{HashMap, HashSet};

use crate::task::Task;

/// A task together with its resolved relation lists.
///
/// `prerequisites` holds the ids named in `depends_on` that exist in the
/// payload, in declaration order. `dependents` is the inverse edge and
/// `children` collects the tasks whose `parent_task_id` points here, both
/// in payload order.
#[derive(Debug, Clone)]
pub struct TaskNode {
    pub task: Task,
    pub prerequisites: Vec<u64>,
    pub dependents: Vec<u64>,
    pub children: Vec<u64>,
}

/// Id-indexed arena of enriched tasks, preserving payload order.
#[derive(Debug, Default)]
pub struct TaskGraph {
    nodes: HashMap<u64, TaskNode>,
    order: Vec<u64>,
}

impl TaskGraph {
    /// Build the graph in two passes: index every task with empty relation
    /// lists, then walk the payload again wiring dependency and parent
    /// edges. Each resolvable dependency establishes both the prerequisite
    /// and the dependent entry, so the two directions never disagree.
    /// Edges naming ids outside the payload are dropped silently.
    ///
    /// Cost is O(tasks + dependency edges). Ids are expected to be unique;
    /// on a duplicate the later record overwrites the node payload.
    pub fn build(tasks: Vec<Task>) -> Self {
        let mut nodes: HashMap<u64, TaskNode> = HashMap::with_capacity(tasks.len());
        let mut order: Vec<u64> = Vec::with_capacity(tasks.len());
        let edges: Vec<(u64, Vec<u64>, Option<u64>)> = tasks
            .iter()
            .map(|t| (t.id, t.depends_on.clone(), t.parent_task_id))
            .collect();

        for task in tasks {
            let id = task.id;
            let node = TaskNode {
                task,
                prerequisites: Vec::new(),
                dependents: Vec::new(),
                children: Vec::new(),
            };
            if nodes.insert(id, node).is_none() {
                order.push(id);
            }
        }

        for (id, depends_on, parent) in edges {
            for dep in depends_on {
                if !nodes.contains_key(&dep) {
                    continue;
                }
                if let Some(node) = nodes.get_mut(&id) {
                    node.prerequisites.push(dep);
                }
                if let Some(node) = nodes.get_mut(&dep) {
                    node.dependents.push(id);
                }
            }
            if let Some(parent) = parent {
                if let Some(node) = nodes.get_mut(&parent) {
                    node.children.push(id);
                }
            }
        }

        TaskGraph { nodes, order }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&TaskNode> {
        self.nodes.get(&id)
    }

    /// Iterate nodes in payload order.
    pub fn tasks(&self) -> impl Iterator<Item = &TaskNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// The hierarchy forest: tasks with no parent reference at all, in
    /// payload order. A task whose parent id dangles is not a root; its
    /// edge was dropped but the reference still marks it as nested.
    pub fn roots(&self) -> Vec<&TaskNode> {
        self.tasks()
            .filter(|n| n.task.parent_task_id.is_none())
            .collect()
    }

    /// Every task that must or should logically precede or contain `id`:
    /// the task itself first, then everything reachable through
    /// prerequisite edges (in declaration order) and parent edges, in
    /// first-visited depth-first order. Each id appears at most once; an
    /// unknown `id` yields an empty vec rather than an error.
    pub fn prerequisite_path(&self, id: u64) -> Vec<&TaskNode> {
        let mut seen = HashSet::new();
        let mut path = Vec::new();
        self.walk_upstream(id, &mut seen, &mut path);
        path
    }

    fn walk_upstream<'a>(
        &'a self,
        id: u64,
        seen: &mut HashSet<u64>,
        path: &mut Vec<&'a TaskNode>,
    ) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if !seen.insert(id) {
            return;
        }
        path.push(node);
        for &dep in &node.prerequisites {
            self.walk_upstream(dep, seen, path);
        }
        if let Some(parent) = node.task.parent_task_id {
            self.walk_upstream(parent, seen, path);
        }
    }

    /// Everything affected if `id` slips: tasks reachable outward through
    /// dependent edges, then child edges, depth-first into each newly
    /// discovered task before its next sibling. The start task itself is
    /// excluded. The visited set makes this terminate on cyclic input,
    /// with each id reported at most once.
    pub fn dependent_tasks(&self, id: u64) -> Vec<&TaskNode> {
        let Some(start) = self.nodes.get(&id) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        seen.insert(id);
        let mut out = Vec::new();
        self.walk_downstream(start, &mut seen, &mut out);
        out
    }

    fn walk_downstream<'a>(
        &'a self,
        node: &'a TaskNode,
        seen: &mut HashSet<u64>,
        out: &mut Vec<&'a TaskNode>,
    ) {
        for &next_id in node.dependents.iter().chain(&node.children) {
            if !seen.insert(next_id) {
                continue;
            }
            if let Some(next) = self.nodes.get(&next_id) {
                out.push(next);
                self.walk_downstream(next, seen, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::TaskStatus;

    fn task(id: u64, parent: Option<u64>, depends_on: &[u64]) -> Task {
        Task {
            id,
            project_id: 1,
            name: format!("task {id}"),
            status: TaskStatus::Planned,
            parent_task_id: parent,
            depends_on: depends_on.to_vec(),
            start_date: None,
            due_date: None,
        }
    }

    fn ids(nodes: &[&TaskNode]) -> Vec<u64> {
        nodes.iter().map(|n| n.task.id).collect()
    }

    #[test]
    fn test_build_indexes_every_task_once() {
        let graph = TaskGraph::build(vec![
            task(1, None, &[]),
            task(2, Some(1), &[1]),
            task(3, None, &[1, 2]),
        ]);
        assert_eq!(graph.len(), 3);
        let order: Vec<u64> = graph.tasks().map(|n| n.task.id).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_build_wires_mutual_edges() {
        let graph = TaskGraph::build(vec![task(1, None, &[]), task(2, None, &[1])]);
        assert_eq!(graph.get(2).unwrap().prerequisites, vec![1]);
        assert_eq!(graph.get(1).unwrap().dependents, vec![2]);
        // Every edge must exist in both directions.
        for node in graph.tasks() {
            for &dep in &node.prerequisites {
                assert!(graph.get(dep).unwrap().dependents.contains(&node.task.id));
            }
            for &dependent in &node.dependents {
                assert!(graph
                    .get(dependent)
                    .unwrap()
                    .prerequisites
                    .contains(&node.task.id));
            }
        }
    }

    #[test]
    fn test_build_drops_dangling_references() {
        let graph = TaskGraph::build(vec![task(1, Some(99), &[42, 2]), task(2, None, &[])]);
        assert_eq!(graph.get(1).unwrap().prerequisites, vec![2]);
        assert!(graph.get(2).unwrap().children.is_empty());
        // The dangling parent reference still keeps task 1 out of the roots.
        assert_eq!(ids(&graph.roots()), vec![2]);
    }

    #[test]
    fn test_build_populates_children_from_parent_ids() {
        let graph = TaskGraph::build(vec![
            task(1, None, &[]),
            task(2, Some(1), &[]),
            task(3, Some(1), &[]),
        ]);
        assert_eq!(graph.get(1).unwrap().children, vec![2, 3]);
    }

    #[test]
    fn test_roots_are_exactly_the_parentless_tasks() {
        let graph = TaskGraph::build(vec![
            task(1, None, &[]),
            task(2, Some(1), &[]),
            task(3, None, &[]),
            task(4, Some(3), &[]),
        ]);
        assert_eq!(ids(&graph.roots()), vec![1, 3]);
    }

    #[test]
    fn test_prerequisite_path_starts_with_the_task_itself() {
        let graph = TaskGraph::build(vec![
            task(1, None, &[]),
            task(2, None, &[1]),
            task(3, None, &[2]),
        ]);
        assert_eq!(ids(&graph.prerequisite_path(3)), vec![3, 2, 1]);
    }

    #[test]
    fn test_prerequisite_path_visits_prerequisites_before_parent() {
        let graph = TaskGraph::build(vec![
            task(1, None, &[]),
            task(2, None, &[]),
            task(3, Some(2), &[1]),
        ]);
        assert_eq!(ids(&graph.prerequisite_path(3)), vec![3, 1, 2]);
    }

    #[test]
    fn test_prerequisite_path_dedups_diamond() {
        // 4 depends on 2 and 3, which both depend on 1.
        let graph = TaskGraph::build(vec![
            task(1, None, &[]),
            task(2, None, &[1]),
            task(3, None, &[1]),
            task(4, None, &[2, 3]),
        ]);
        assert_eq!(ids(&graph.prerequisite_path(4)), vec![4, 2, 1, 3]);
    }

    #[test]
    fn test_prerequisite_path_unknown_id_is_empty() {
        let graph = TaskGraph::build(vec![task(1, None, &[])]);
        assert!(graph.prerequisite_path(99).is_empty());
    }

    #[test]
    fn test_traversals_terminate_on_cycles() {
        // A depends on B, B depends on A.
        let graph = TaskGraph::build(vec![task(1, None, &[2]), task(2, None, &[1])]);
        assert_eq!(ids(&graph.prerequisite_path(1)), vec![1, 2]);
        assert_eq!(ids(&graph.dependent_tasks(1)), vec![2]);
    }

    #[test]
    fn test_dependent_tasks_excludes_the_start() {
        let graph = TaskGraph::build(vec![
            task(1, None, &[]),
            task(2, None, &[1]),
            task(3, None, &[2]),
        ]);
        assert_eq!(ids(&graph.dependent_tasks(1)), vec![2, 3]);
        assert!(graph.dependent_tasks(3).is_empty());
    }

    #[test]
    fn test_dependent_tasks_visits_dependents_before_children() {
        let graph = TaskGraph::build(vec![
            task(1, None, &[]),
            task(2, Some(1), &[]),
            task(3, None, &[1]),
        ]);
        assert_eq!(ids(&graph.dependent_tasks(1)), vec![3, 2]);
    }

    #[test]
    fn test_dependent_tasks_unknown_id_is_empty() {
        let graph = TaskGraph::build(vec![task(1, None, &[])]);
        assert!(graph.dependent_tasks(99).is_empty());
    }
}
