//! Connection protocol
//!
//! Drawing an edge on the canvas is a two-phase gesture:
//!
//! ```text
//! Idle --drag--> Pending --drop on other task--> AwaitingType --pick--> Idle (commit)
//!                   |                                 |
//!                   +--drop elsewhere--> Idle         +--dismiss--> Idle
//! ```
//!
//! [`ConnectionState`] is a plain value. Each transition consumes the state
//! and returns the next one together with an [`Outcome`] telling the caller
//! what to do (open the type picker, commit an edge, nothing). The state
//! machine never touches the project; committing is the caller's job, so the
//! whole gesture can be tested without a rendering surface or a repository.

use crate::type_picker::TypePrompt;
use aura_domain::{AnchorSide, Project, Relationship, RelationshipType, TaskId};
use std::fmt;

/// A connection with both endpoints chosen, waiting for its type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConnection {
    /// Task the drag started from
    pub source_task_id: TaskId,
    /// Task the drag ended on
    pub target_task_id: TaskId,
    /// Anchor on the source node
    pub source_handle: AnchorSide,
    /// Anchor on the target node
    pub target_handle: AnchorSide,
}

impl PendingConnection {
    fn involves(&self, task: &TaskId) -> bool {
        &self.source_task_id == task || &self.target_task_id == task
    }
}

/// Where the connection state machine is
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No gesture in progress
    #[default]
    Idle,

    /// A drag is in progress from `source_task_id`
    Pending {
        /// Task the drag started from
        source_task_id: TaskId,
        /// Anchor the drag started from
        source_handle: AnchorSide,
    },

    /// Both endpoints chosen; the type picker is open
    AwaitingType(PendingConnection),
}

/// Anchor of a node the drag was released over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    /// Task owning the anchor
    pub task_id: TaskId,
    /// Side of the node
    pub handle: AnchorSide,
}

impl DropTarget {
    /// Create a drop target
    pub fn new(task_id: impl Into<TaskId>, handle: AnchorSide) -> Self {
        Self {
            task_id: task_id.into(),
            handle,
        }
    }

    /// Parse a widget handle id such as `task-17-left`
    pub fn from_handle_id(handle_id: &str) -> Option<Self> {
        let (task, _) = handle_id.rsplit_once('-')?;
        let side = AnchorSide::from_handle_id(handle_id)?;
        Some(Self::new(task, side))
    }
}

/// How the type picker was dismissed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// The cancel button
    Cancel,
    /// A click outside the picker
    Backdrop,
    /// The Escape key
    Escape,
}

/// Why a gesture ended without an edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReason {
    /// The type picker was dismissed
    Dismissed(DismissReason),
    /// Released over empty canvas
    EmptyDrop,
    /// Released over the task the drag started from
    SameTask,
    /// An endpoint is not in the project
    MissingTask(TaskId),
    /// An endpoint was deleted mid-gesture
    TaskDeleted(TaskId),
    /// Another project was selected
    ProjectSwitched,
    /// The canvas went away
    Unmounted,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Dismissed(DismissReason::Cancel) => write!(f, "cancelled"),
            CancelReason::Dismissed(DismissReason::Backdrop) => write!(f, "picker closed"),
            CancelReason::Dismissed(DismissReason::Escape) => write!(f, "escape pressed"),
            CancelReason::EmptyDrop => write!(f, "released over empty canvas"),
            CancelReason::SameTask => write!(f, "released over the source task"),
            CancelReason::MissingTask(id) => write!(f, "task {} is not in the project", id),
            CancelReason::TaskDeleted(id) => write!(f, "task {} was deleted", id),
            CancelReason::ProjectSwitched => write!(f, "project switched"),
            CancelReason::Unmounted => write!(f, "canvas closed"),
        }
    }
}

/// Input to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// A drag started from a node anchor
    DragStarted {
        /// Task owning the anchor
        task_id: TaskId,
        /// Side of the node
        handle: AnchorSide,
    },
    /// The drag was released, over an anchor or over nothing
    Released(Option<DropTarget>),
    /// The type picker answered with a type
    TypeSelected(RelationshipType),
    /// The type picker was closed
    Dismissed(DismissReason),
    /// A task was deleted elsewhere
    TaskDeleted(TaskId),
    /// Another project was selected
    ProjectSwitched,
    /// The canvas is being torn down
    Unmounted,
}

/// Edge to hand to the relationship store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRequest {
    /// Task that owns the edge
    pub owner: TaskId,
    /// The edge, anchors included
    pub edge: Relationship,
}

/// What the caller should do after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A drag is now in progress
    Pending {
        /// An unresolved gesture was discarded to start this one
        preempted: bool,
    },
    /// Open the type picker
    AwaitingType(TypePrompt),
    /// Add this edge, then the gesture is over
    Commit(ConnectionRequest),
    /// The gesture ended without an edge
    Cancelled(CancelReason),
    /// The event does not apply to the current state
    Ignored,
}

/// Next state plus what to do about it
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Transition {
    /// State after the event
    pub state: ConnectionState,
    /// Action for the caller
    pub outcome: Outcome,
}

impl Transition {
    fn new(state: ConnectionState, outcome: Outcome) -> Self {
        Self { state, outcome }
    }

    fn idle(outcome: Outcome) -> Self {
        Self::new(ConnectionState::Idle, outcome)
    }

    fn cancelled(reason: CancelReason) -> Self {
        Self::idle(Outcome::Cancelled(reason))
    }
}

impl ConnectionState {
    /// Whether no gesture is in progress
    pub fn is_idle(&self) -> bool {
        matches!(self, ConnectionState::Idle)
    }

    /// The connection waiting for its type, if any
    pub fn pending(&self) -> Option<&PendingConnection> {
        match self {
            ConnectionState::AwaitingType(pending) => Some(pending),
            _ => None,
        }
    }

    /// Task the current gesture started from
    pub fn source(&self) -> Option<&TaskId> {
        match self {
            ConnectionState::Idle => None,
            ConnectionState::Pending { source_task_id, .. } => Some(source_task_id),
            ConnectionState::AwaitingType(pending) => Some(&pending.source_task_id),
        }
    }

    /// Feed one event through the state machine
    ///
    /// `project` is only read, to validate endpoints and to title the type
    /// prompt.
    pub fn apply(self, event: ConnectionEvent, project: &Project) -> Transition {
        match event {
            ConnectionEvent::DragStarted { task_id, handle } => self.begin(task_id, handle, project),
            ConnectionEvent::Released(target) => self.release(target, project),
            ConnectionEvent::TypeSelected(kind) => self.select(kind, project),
            ConnectionEvent::Dismissed(reason) => self.cancel(CancelReason::Dismissed(reason)),
            ConnectionEvent::TaskDeleted(task) => self.task_deleted(&task),
            ConnectionEvent::ProjectSwitched => self.cancel(CancelReason::ProjectSwitched),
            ConnectionEvent::Unmounted => self.cancel(CancelReason::Unmounted),
        }
    }

    /// Start a drag from `handle` of `source`
    ///
    /// Any unresolved gesture is discarded first, even when `source` turns
    /// out not to exist.
    pub fn begin(self, source: TaskId, handle: AnchorSide, project: &Project) -> Transition {
        if !project.contains_task(&source) {
            return Transition::cancelled(CancelReason::MissingTask(source));
        }
        let preempted = !self.is_idle();
        Transition::new(
            ConnectionState::Pending {
                source_task_id: source,
                source_handle: handle,
            },
            Outcome::Pending { preempted },
        )
    }

    /// Release the drag over `target`, or over empty canvas when `None`
    pub fn release(self, target: Option<DropTarget>, project: &Project) -> Transition {
        let (source_task_id, source_handle) = match self {
            ConnectionState::Pending {
                source_task_id,
                source_handle,
            } => (source_task_id, source_handle),
            other => return Transition::new(other, Outcome::Ignored),
        };

        let Some(target) = target else {
            return Transition::cancelled(CancelReason::EmptyDrop);
        };
        if target.task_id == source_task_id {
            return Transition::cancelled(CancelReason::SameTask);
        }

        let (Some(source), Some(dropped_on)) = (project.task(&source_task_id), project.task(&target.task_id)) else {
            let missing = if project.contains_task(&source_task_id) {
                target.task_id
            } else {
                source_task_id
            };
            return Transition::cancelled(CancelReason::MissingTask(missing));
        };

        let prompt = TypePrompt::new(source.title.clone(), dropped_on.title.clone());
        Transition::new(
            ConnectionState::AwaitingType(PendingConnection {
                source_task_id,
                target_task_id: target.task_id,
                source_handle,
                target_handle: target.handle,
            }),
            Outcome::AwaitingType(prompt),
        )
    }

    /// Answer the type picker with `kind`
    pub fn select(self, kind: RelationshipType, project: &Project) -> Transition {
        let pending = match self {
            ConnectionState::AwaitingType(pending) => pending,
            other => return Transition::new(other, Outcome::Ignored),
        };

        for endpoint in [&pending.source_task_id, &pending.target_task_id] {
            if !project.contains_task(endpoint) {
                return Transition::cancelled(CancelReason::MissingTask(endpoint.clone()));
            }
        }

        let edge = Relationship::new(kind, pending.target_task_id).with_handles(pending.source_handle, pending.target_handle);
        Transition::idle(Outcome::Commit(ConnectionRequest {
            owner: pending.source_task_id,
            edge,
        }))
    }

    /// Drop whatever gesture is in progress
    pub fn cancel(self, reason: CancelReason) -> Transition {
        if self.is_idle() {
            Transition::idle(Outcome::Ignored)
        } else {
            Transition::cancelled(reason)
        }
    }

    /// Cancel the gesture if `task` is one of its endpoints
    pub fn task_deleted(self, task: &TaskId) -> Transition {
        let involved = match &self {
            ConnectionState::Idle => false,
            ConnectionState::Pending { source_task_id, .. } => source_task_id == task,
            ConnectionState::AwaitingType(pending) => pending.involves(task),
        };
        if involved {
            Transition::cancelled(CancelReason::TaskDeleted(task.clone()))
        } else {
            Transition::new(self, Outcome::Ignored)
        }
    }
}
