//! Relationship graph - the only code that should add or remove edges
//!
//! Edges live redundantly in the relationship lists of both endpoints. The
//! operations here update both lists in one call, which is what keeps the
//! bidirectional invariant: for every edge `(A, type, B)` there is an edge
//! `(B, inverse(type), A)`.
//!
//! Invalid requests (self references, unknown tasks, duplicates, removing an
//! edge that is not there) are not errors. They come from stale UI state, so
//! the operation leaves the project untouched and says why in [`EdgeChange`].

use crate::project::Project;
use crate::relationship::{Relationship, RelationshipType};
use crate::task::{Task, TaskId};
use std::collections::HashSet;
use std::fmt;

/// Why an edge operation left the project unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoOpReason {
    /// Both endpoints are the same task
    SelfReference,

    /// An endpoint is not in the project
    MissingTask(TaskId),

    /// Both sides of the edge are already stored
    AlreadyExists,

    /// Neither side of the edge is stored
    NotFound,
}

impl fmt::Display for NoOpReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoOpReason::SelfReference => write!(f, "a task cannot be related to itself"),
            NoOpReason::MissingTask(id) => write!(f, "task {} is not in the project", id),
            NoOpReason::AlreadyExists => write!(f, "relationship already exists"),
            NoOpReason::NotFound => write!(f, "relationship not found"),
        }
    }
}

/// Outcome of an edge operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeChange {
    /// The project was modified
    Applied,

    /// Nothing changed
    Unchanged(NoOpReason),
}

impl EdgeChange {
    /// Whether the project was modified
    pub fn is_applied(&self) -> bool {
        matches!(self, EdgeChange::Applied)
    }
}

/// A violation of the stored-graph invariants, found by
/// [`RelationshipGraph::check_consistency`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    /// Edge pointing at its own task
    SelfReference {
        /// Task holding the edge
        owner: TaskId,
        /// The edge
        edge: Relationship,
    },

    /// Edge pointing at a task that is not in the project
    DanglingReference {
        /// Task holding the edge
        owner: TaskId,
        /// The edge
        edge: Relationship,
    },

    /// Edge whose inverse is missing on the other endpoint
    MissingInverse {
        /// Task holding the edge
        owner: TaskId,
        /// The edge
        edge: Relationship,
    },

    /// Same `(type, task)` stored more than once on one task
    DuplicateEdge {
        /// Task holding the edge
        owner: TaskId,
        /// The edge
        edge: Relationship,
    },
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inconsistency::SelfReference { owner, edge } => {
                write!(f, "{} {} itself", owner, edge.kind)
            }
            Inconsistency::DanglingReference { owner, edge } => {
                write!(f, "{} {} missing task {}", owner, edge.kind, edge.task_id)
            }
            Inconsistency::MissingInverse { owner, edge } => write!(
                f,
                "{} {} {} but {} has no {} edge back",
                owner,
                edge.kind,
                edge.task_id,
                edge.task_id,
                edge.kind.inverse()
            ),
            Inconsistency::DuplicateEdge { owner, edge } => {
                write!(f, "{} {} {} is stored more than once", owner, edge.kind, edge.task_id)
            }
        }
    }
}

/// Mutation API over the relationship lists of a project's tasks
pub trait RelationshipGraph {
    /// Record `edge` on `owner` and its inverse on the other endpoint
    ///
    /// Whichever side is missing is inserted; the call is a no-op when both
    /// are already present. Self references and unknown tasks are rejected.
    fn add_relationship(&mut self, owner: &TaskId, edge: Relationship) -> EdgeChange;

    /// Remove `edge` from `owner` and its inverse from the other endpoint
    fn remove_relationship(&mut self, owner: &TaskId, edge: &Relationship) -> EdgeChange;

    /// Remove every edge that references `task`, and the task's own edges
    ///
    /// Returns the number of edges removed. Must run before a task is
    /// dropped from its column.
    fn remove_all_for_task(&mut self, task: &TaskId) -> usize;

    /// Remove all edges of `task`, then the task itself
    fn delete_task(&mut self, task: &TaskId) -> Option<Task>;

    /// Report every stored edge that breaks an invariant. Nothing is repaired.
    fn check_consistency(&self) -> Vec<Inconsistency>;
}

impl RelationshipGraph for Project {
    fn add_relationship(&mut self, owner: &TaskId, edge: Relationship) -> EdgeChange {
        let other = edge.task_id.clone();
        if &other == owner {
            return EdgeChange::Unchanged(NoOpReason::SelfReference);
        }

        let Some(owner_task) = self.task(owner) else {
            return EdgeChange::Unchanged(NoOpReason::MissingTask(owner.clone()));
        };
        let Some(other_task) = self.task(&other) else {
            return EdgeChange::Unchanged(NoOpReason::MissingTask(other));
        };

        let inverse = edge.inverse_for(owner);
        let forward_present = owner_task.has_edge(edge.kind, &other);
        let inverse_present = other_task.has_edge(inverse.kind, owner);
        if forward_present && inverse_present {
            return EdgeChange::Unchanged(NoOpReason::AlreadyExists);
        }

        // Both endpoints were found above, so both pushes happen.
        if !forward_present {
            if let Some(task) = self.task_mut(owner) {
                task.relationships.push(edge);
            }
        }
        if !inverse_present {
            if let Some(task) = self.task_mut(&other) {
                task.relationships.push(inverse);
            }
        }
        EdgeChange::Applied
    }

    fn remove_relationship(&mut self, owner: &TaskId, edge: &Relationship) -> EdgeChange {
        let inverse_kind = edge.kind.inverse();
        let mut removed = 0;

        if let Some(task) = self.task_mut(owner) {
            removed += retain_edges(task, |rel| !rel.matches(edge.kind, &edge.task_id));
        }
        if let Some(task) = self.task_mut(&edge.task_id) {
            removed += retain_edges(task, |rel| !rel.matches(inverse_kind, owner));
        }

        if removed == 0 {
            EdgeChange::Unchanged(NoOpReason::NotFound)
        } else {
            EdgeChange::Applied
        }
    }

    fn remove_all_for_task(&mut self, target: &TaskId) -> usize {
        self.tasks_mut()
            .map(|task| {
                if &task.id == target {
                    let count = task.relationships.len();
                    task.relationships.clear();
                    count
                } else {
                    retain_edges(task, |rel| &rel.task_id != target)
                }
            })
            .sum()
    }

    fn delete_task(&mut self, task: &TaskId) -> Option<Task> {
        if !self.contains_task(task) {
            return None;
        }
        self.remove_all_for_task(task);
        self.take_task(task)
    }

    fn check_consistency(&self) -> Vec<Inconsistency> {
        let mut found = Vec::new();

        for task in self.tasks() {
            let mut seen: HashSet<(RelationshipType, &TaskId)> = HashSet::new();

            for edge in &task.relationships {
                if !seen.insert((edge.kind, &edge.task_id)) {
                    found.push(Inconsistency::DuplicateEdge {
                        owner: task.id.clone(),
                        edge: edge.clone(),
                    });
                    continue;
                }

                if edge.task_id == task.id {
                    found.push(Inconsistency::SelfReference {
                        owner: task.id.clone(),
                        edge: edge.clone(),
                    });
                    continue;
                }

                match self.task(&edge.task_id) {
                    None => found.push(Inconsistency::DanglingReference {
                        owner: task.id.clone(),
                        edge: edge.clone(),
                    }),
                    Some(other) if !other.has_edge(edge.kind.inverse(), &task.id) => {
                        found.push(Inconsistency::MissingInverse {
                            owner: task.id.clone(),
                            edge: edge.clone(),
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        found
    }
}

/// Keep the edges matching `keep`; return how many were dropped
fn retain_edges(task: &mut Task, keep: impl Fn(&Relationship) -> bool) -> usize {
    let before = task.relationships.len();
    task.relationships.retain(|rel| keep(rel));
    before - task.relationships.len()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::project::Column;
    use proptest::prelude::*;

    const TASKS: usize = 5;

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize, RelationshipType, usize),
        Remove(usize, RelationshipType, usize),
        RemoveAll(usize),
    }

    fn task_id(index: usize) -> TaskId {
        TaskId::new(format!("t{}", index))
    }

    fn board() -> Project {
        let mut todo = Column::new("todo", "To Do");
        let mut done = Column::new("done", "Done");
        for index in 0..TASKS {
            let task = Task::new(task_id(index), format!("Task {}", index));
            if index % 2 == 0 {
                todo.tasks.push(task);
            } else {
                done.tasks.push(task);
            }
        }
        Project::new("p", "Property board").with_column(todo).with_column(done)
    }

    fn kind() -> impl Strategy<Value = RelationshipType> {
        prop::sample::select(RelationshipType::ALL.to_vec())
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0..TASKS, kind(), 0..TASKS).prop_map(|(a, k, b)| Op::Add(a, k, b)),
            2 => (0..TASKS, kind(), 0..TASKS).prop_map(|(a, k, b)| Op::Remove(a, k, b)),
            1 => (0..TASKS).prop_map(Op::RemoveAll),
        ]
    }

    fn apply(project: &mut Project, ops: &[Op]) {
        for op in ops {
            match op {
                Op::Add(a, k, b) => {
                    project.add_relationship(&task_id(*a), Relationship::new(*k, task_id(*b)));
                }
                Op::Remove(a, k, b) => {
                    project.remove_relationship(&task_id(*a), &Relationship::new(*k, task_id(*b)));
                }
                Op::RemoveAll(x) => {
                    project.remove_all_for_task(&task_id(*x));
                }
            }
        }
    }

    fn sorted_edges(project: &Project) -> Vec<(TaskId, Vec<Relationship>)> {
        project
            .tasks()
            .map(|task| {
                let mut edges = task.relationships.clone();
                edges.sort_by(|x, y| (x.kind, &x.task_id).cmp(&(y.kind, &y.task_id)));
                (task.id.clone(), edges)
            })
            .collect()
    }

    proptest! {
        /// Property: every stored edge has its inverse, with no duplicates or self edges
        #[test]
        fn test_bidirectional_invariant(ops in prop::collection::vec(op(), 0..40)) {
            let mut project = board();
            apply(&mut project, &ops);

            let report = project.check_consistency();
            prop_assert!(report.is_empty(), "inconsistent after {:?}: {:?}", ops, report);
        }

        /// Property: adding the same edge twice equals adding it once
        #[test]
        fn test_add_is_idempotent(
            ops in prop::collection::vec(op(), 0..30),
            a in 0..TASKS,
            k in kind(),
            b in 0..TASKS,
        ) {
            let mut project = board();
            apply(&mut project, &ops);

            project.add_relationship(&task_id(a), Relationship::new(k, task_id(b)));
            let once = project.clone();
            let second = project.add_relationship(&task_id(a), Relationship::new(k, task_id(b)));

            prop_assert!(!second.is_applied());
            prop_assert_eq!(project, once);
        }

        /// Property: add followed by remove restores both relationship lists
        #[test]
        fn test_add_remove_round_trip(
            ops in prop::collection::vec(op(), 0..30),
            a in 0..TASKS,
            k in kind(),
            b in 0..TASKS,
        ) {
            prop_assume!(a != b);
            let mut project = board();
            apply(&mut project, &ops);
            prop_assume!(!project.task(&task_id(a)).unwrap().has_edge(k, &task_id(b)));

            let before = sorted_edges(&project);
            let edge = Relationship::new(k, task_id(b));
            prop_assert!(project.add_relationship(&task_id(a), edge.clone()).is_applied());
            prop_assert!(project.remove_relationship(&task_id(a), &edge).is_applied());

            prop_assert_eq!(sorted_edges(&project), before);
        }

        /// Property: after removing all edges of X, nothing references X
        #[test]
        fn test_cascade_leaves_no_reference(
            ops in prop::collection::vec(op(), 0..40),
            x in 0..TASKS,
        ) {
            let mut project = board();
            apply(&mut project, &ops);

            project.remove_all_for_task(&task_id(x));

            let target = task_id(x);
            prop_assert!(project.tasks().all(|task| task.edges_to(&target).next().is_none()));
            prop_assert!(project.check_consistency().is_empty());

            let deleted = project.delete_task(&target);
            prop_assert!(deleted.is_some());
            prop_assert!(project.check_consistency().is_empty());
        }
    }
}
