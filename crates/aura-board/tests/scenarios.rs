//! End-to-end board scenarios
//!
//! Each test drives the canvas controller or the board service the way the
//! views would, against an in-memory repository, and checks what ends up
//! stored.

use aura_board::{
    BoardService, CancelReason, CanvasConfig, CanvasController, DropTarget, Outcome, RelationshipPicker,
};
use aura_domain::traits::ProjectRepository;
use aura_domain::{
    AnchorSide, CanvasPosition, Column, EdgeChange, Project, ProjectId, Relationship, RelationshipGraph,
    RelationshipType, Task, TaskId,
};
use aura_store::MemoryStore;

fn launch() -> Project {
    Project::new("p1", "Launch")
        .with_column(
            Column::new("todo", "To Do")
                .with_task(Task::new("design", "Design API"))
                .with_task(Task::new("impl", "Implement API")),
        )
        .with_column(
            Column::new("doing", "In Progress")
                .with_task(Task::new("docs", "Write docs"))
                .with_task(Task::new("review", "Review")),
        )
}

fn p1() -> ProjectId {
    ProjectId::new("p1")
}

fn stored(repository: &MemoryStore) -> Project {
    repository.get_project(&p1()).unwrap().unwrap()
}

fn draw(canvas: &mut CanvasController<MemoryStore>, from: &str, to: &str, kind: RelationshipType) -> Option<EdgeChange> {
    canvas.begin_connection(TaskId::new(from), AnchorSide::Right).unwrap();
    canvas
        .release_connection(Some(DropTarget::new(to, AnchorSide::Left)))
        .unwrap();
    canvas.select_type(kind).unwrap()
}

#[test]
fn test_scenario_a_draw_blocks() {
    let mut canvas = CanvasController::new(MemoryStore::new(vec![launch()]), CanvasConfig::default());
    canvas.select_project(p1()).unwrap();

    assert_eq!(draw(&mut canvas, "design", "impl", RelationshipType::Blocks), Some(EdgeChange::Applied));

    let project = stored(canvas.repository());
    let design = project.task(&TaskId::new("design")).unwrap();
    let implement = project.task(&TaskId::new("impl")).unwrap();
    assert_eq!(
        design.relationships,
        vec![Relationship::new(RelationshipType::Blocks, "impl").with_handles(AnchorSide::Right, AnchorSide::Left)]
    );
    assert_eq!(
        implement.relationships,
        vec![Relationship::new(RelationshipType::BlockedBy, "design").with_handles(AnchorSide::Left, AnchorSide::Right)]
    );
}

#[test]
fn test_scenario_b_remove_from_one_side() {
    let mut canvas = CanvasController::new(MemoryStore::new(vec![launch()]), CanvasConfig::default());
    canvas.select_project(p1()).unwrap();
    draw(&mut canvas, "design", "impl", RelationshipType::Blocks);
    draw(&mut canvas, "docs", "design", RelationshipType::RelatesTo);

    let mut service = BoardService::new(MemoryStore::new(vec![stored(canvas.repository())]));
    let change = service
        .unlink(&p1(), &TaskId::new("design"), &Relationship::new(RelationshipType::Blocks, "impl"))
        .unwrap();
    assert_eq!(change, EdgeChange::Applied);
    assert_eq!(service.repository().update_count(), 1);

    let project = service.project(&p1()).unwrap();

    assert!(project.task(&TaskId::new("impl")).unwrap().relationships.is_empty());
    let design = project.task(&TaskId::new("design")).unwrap();
    assert_eq!(design.relationships.len(), 1);
    assert!(design.has_edge(RelationshipType::RelatesTo, &TaskId::new("docs")));
    assert!(project
        .task(&TaskId::new("docs"))
        .unwrap()
        .has_edge(RelationshipType::RelatesTo, &TaskId::new("design")));
    assert!(project.check_consistency().is_empty());
}

#[test]
fn test_scenario_c_same_task_drop() {
    let mut canvas = CanvasController::new(MemoryStore::new(vec![launch()]), CanvasConfig::default());
    canvas.select_project(p1()).unwrap();

    canvas.begin_connection(TaskId::new("design"), AnchorSide::Right).unwrap();
    let outcome = canvas
        .release_connection(Some(DropTarget::new("design", AnchorSide::Bottom)))
        .unwrap();

    assert_eq!(outcome, Outcome::Cancelled(CancelReason::SameTask));
    assert!(canvas.connection().is_idle());
    assert_eq!(canvas.select_type(RelationshipType::Blocks).unwrap(), None);
    assert_eq!(canvas.repository().update_count(), 0);
    assert!(stored(canvas.repository()).tasks().all(|task| task.relationships.is_empty()));
}

#[test]
fn test_scenario_d_default_layout() {
    let mut canvas = CanvasController::new(MemoryStore::new(vec![launch()]), CanvasConfig::default());
    let graph = canvas.select_project(p1()).unwrap();

    let at = |id: &str| graph.node(&TaskId::new(id)).unwrap().position;
    assert_eq!(at("design"), CanvasPosition::new(100.0, 100.0));
    assert_eq!(at("impl"), CanvasPosition::new(100.0, 250.0));
    assert_eq!(at("docs"), CanvasPosition::new(400.0, 100.0));
    assert_eq!(at("review"), CanvasPosition::new(400.0, 250.0));
}

#[test]
fn test_scenario_e_delete_related_task() {
    let mut service = BoardService::new(MemoryStore::new(vec![launch()]));
    let design = TaskId::new("design");
    service
        .link(&p1(), &design, Relationship::new(RelationshipType::Blocks, "impl"))
        .unwrap();
    service
        .link(&p1(), &TaskId::new("docs"), Relationship::new(RelationshipType::ChildOf, "design"))
        .unwrap();
    service
        .link(&p1(), &design, Relationship::new(RelationshipType::Duplicates, "review"))
        .unwrap();
    service
        .link(&p1(), &TaskId::new("impl"), Relationship::new(RelationshipType::RelatesTo, "docs"))
        .unwrap();

    let removed = service.delete_task(&p1(), &design).unwrap();
    assert!(removed.is_some());

    let project = service.project(&p1()).unwrap();
    assert!(!project.contains_task(&design));
    for task in project.tasks() {
        assert!(task.edges_to(&design).next().is_none(), "{} still references design", task.id);
    }
    assert!(project
        .task(&TaskId::new("impl"))
        .unwrap()
        .has_edge(RelationshipType::RelatesTo, &TaskId::new("docs")));

    let mut canvas = CanvasController::new(service.into_repository(), CanvasConfig::default());
    let graph = canvas.select_project(p1()).unwrap();
    assert!(graph.node(&design).is_none());
    assert_eq!(graph.nodes.len(), 3);
    assert!(graph.edges.iter().all(|edge| edge.source != design && edge.target != design));
    assert_eq!(graph.edges.len(), 2);
    assert_eq!(graph.skipped_edges, 0);
}

#[test]
fn test_picker_and_canvas_store_the_same_edge() {
    let mut canvas = CanvasController::new(MemoryStore::new(vec![launch()]), CanvasConfig::default());
    canvas.select_project(p1()).unwrap();
    draw(&mut canvas, "design", "impl", RelationshipType::ParentOf);
    let from_canvas = stored(canvas.repository());

    let mut service = BoardService::new(MemoryStore::new(vec![launch()]));
    let mut picker = RelationshipPicker::new("design");
    picker.open();
    picker.select_type(RelationshipType::ParentOf);
    let change = service.commit_picker(&p1(), &mut picker, &TaskId::new("impl")).unwrap();
    assert_eq!(change, Some(EdgeChange::Applied));
    assert!(!picker.is_open());

    assert_eq!(service.project(&p1()).unwrap(), from_canvas);
}

#[test]
fn test_self_inverse_types_store_one_pair() {
    let mut canvas = CanvasController::new(MemoryStore::new(vec![launch()]), CanvasConfig::default());
    canvas.select_project(p1()).unwrap();

    draw(&mut canvas, "design", "impl", RelationshipType::Duplicates);
    let again = draw(&mut canvas, "impl", "design", RelationshipType::Duplicates);
    assert!(matches!(again, Some(EdgeChange::Unchanged(_))));

    let project = stored(canvas.repository());
    assert_eq!(project.task(&TaskId::new("design")).unwrap().relationships.len(), 1);
    assert_eq!(project.task(&TaskId::new("impl")).unwrap().relationships.len(), 1);
}
