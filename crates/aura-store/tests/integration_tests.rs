//! Integration tests for aura-store
//!
//! These tests exercise the board file on disk: load, save, backup recovery
//! and round-tripping of fields the relationship core does not understand.

use aura_domain::traits::ProjectRepository;
use aura_domain::{Column, Project, ProjectId, Relationship, RelationshipGraph, RelationshipType, Task, TaskId};
use aura_store::{JsonFileStore, LoadSource, StoreConfig, StoreError};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn sample_project() -> Project {
    Project::new("p1", "Launch")
        .with_column(Column::new("todo", "To Do").with_task(Task::new("a", "Design API")))
        .with_column(Column::new("doing", "In Progress").with_task(Task::new("b", "Implement API")))
}

fn open(dir: &TempDir) -> JsonFileStore {
    JsonFileStore::open(&StoreConfig::new(dir.path().join("board.json"))).unwrap()
}

#[test]
fn test_missing_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);

    assert_eq!(store.source(), LoadSource::Empty);
    assert!(store.list_projects().unwrap().is_empty());
    assert!(!store.path().exists(), "Nothing should be written until the first save");
}

#[test]
fn test_update_persists_relationships() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store.insert_project(sample_project()).unwrap();

    let mut project = store.get_project(&ProjectId::new("p1")).unwrap().unwrap();
    project.add_relationship(&TaskId::new("a"), Relationship::new(RelationshipType::Blocks, "b"));
    store.update_project(project).unwrap();

    let reopened = open(&dir);
    assert_eq!(reopened.source(), LoadSource::Main);
    let project = reopened.get_project(&ProjectId::new("p1")).unwrap().unwrap();
    assert!(project.task(&TaskId::new("a")).unwrap().has_edge(RelationshipType::Blocks, &TaskId::new("b")));
    assert!(project.task(&TaskId::new("b")).unwrap().has_edge(RelationshipType::BlockedBy, &TaskId::new("a")));
}

#[test]
fn test_unknown_fields_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("board.json");
    let doc = json!({
        "projects": [{
            "id": "p1",
            "title": "Launch",
            "color": "#6366f1",
            "columns": [{
                "id": "todo",
                "title": "To Do",
                "color": "gray",
                "tasks": [{
                    "id": "1700000000000",
                    "title": "Design API",
                    "description": "endpoints and payloads",
                    "priority": "high",
                    "mainStatus": "To Do",
                    "relationships": []
                }]
            }]
        }],
        "notes": [{ "id": "n1", "content": "remember the docs" }]
    });
    fs::write(&path, serde_json::to_string(&doc).unwrap()).unwrap();

    let mut store = open(&dir);
    let project = store.get_project(&ProjectId::new("p1")).unwrap().unwrap();
    store.update_project(project).unwrap();

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let task = &written["projects"][0]["columns"][0]["tasks"][0];
    assert_eq!(task["description"], "endpoints and payloads");
    assert_eq!(task["priority"], "high");
    assert_eq!(task["hierarchyType"], "task");
    assert_eq!(written["notes"][0]["content"], "remember the docs");
}

#[test]
fn test_recovers_from_backup() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store.insert_project(sample_project()).unwrap();
    assert!(store.backup_path().exists(), "First save should write a backup");

    fs::write(store.path(), "{ not json").unwrap();

    let recovered = open(&dir);
    assert_eq!(recovered.source(), LoadSource::Backup);
    assert_eq!(recovered.list_projects().unwrap().len(), 1);

    // The recovered board is written back as the main file
    let again = open(&dir);
    assert_eq!(again.source(), LoadSource::Main);
}

#[test]
fn test_invalid_document_without_backup_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("board.json");
    fs::write(&path, r#"{ "projects": "nope" }"#).unwrap();

    let result = JsonFileStore::open(&StoreConfig::new(&path));
    assert!(matches!(result, Err(StoreError::Unreadable { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), r#"{ "projects": "nope" }"#);
}

#[test]
fn test_unknown_relationship_type_keeps_board_intact() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("board.json");
    let doc = json!({
        "projects": [{
            "id": "p1",
            "title": "Launch",
            "columns": [{
                "id": "todo",
                "title": "To Do",
                "tasks": [
                    { "id": "a", "title": "Design API", "relationships": [{ "type": "supersedes", "taskId": "b" }] },
                    { "id": "b", "title": "Implement API", "relationships": [] }
                ]
            }]
        }]
    });
    let original = serde_json::to_string(&doc).unwrap();
    fs::write(&path, &original).unwrap();

    let result = JsonFileStore::open(&StoreConfig::new(&path));
    match result {
        Err(StoreError::Unreadable { path: failed, reason }) => {
            assert_eq!(failed, path);
            assert!(reason.contains("supersedes"), "reason was: {}", reason);
        }
        other => panic!("Expected Unreadable, got {:?}", other.map(|s| s.source())),
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), original, "The board file must not be rewritten");
}

#[test]
fn test_corrupt_main_with_valid_backup_recovers() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store.insert_project(sample_project()).unwrap();
    fs::write(store.path(), r#"{ "projects": "nope" }"#).unwrap();

    let recovered = open(&dir);
    assert_eq!(recovered.source(), LoadSource::Backup);
}

#[test]
fn test_failed_save_keeps_memory_state() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store.insert_project(sample_project()).unwrap();

    // A directory where the temporary file goes makes every write fail
    fs::create_dir(dir.path().join("board.tmp")).unwrap();

    let mut project = store.get_project(&ProjectId::new("p1")).unwrap().unwrap();
    project.title = "Launch v2".to_string();
    let result = store.update_project(project);

    assert!(matches!(result, Err(StoreError::Io(_))));
    let in_memory = store.get_project(&ProjectId::new("p1")).unwrap().unwrap();
    assert_eq!(in_memory.title, "Launch v2");
    assert!(!fs::read_to_string(store.path()).unwrap().contains("Launch v2"));
}

#[test]
fn test_backup_respects_interval() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store.insert_project(sample_project()).unwrap();
    let first_backup = fs::read_to_string(store.backup_path()).unwrap();

    let mut project = store.get_project(&ProjectId::new("p1")).unwrap().unwrap();
    project.title = "Launch v2".to_string();
    store.update_project(project).unwrap();

    assert_eq!(fs::read_to_string(store.backup_path()).unwrap(), first_backup);
    assert!(fs::read_to_string(store.path()).unwrap().contains("Launch v2"));
}

#[test]
fn test_zero_interval_always_backs_up() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig {
        path: dir.path().join("board.json"),
        backup_interval_secs: 0,
    };
    let mut store = JsonFileStore::open(&config).unwrap();
    store.insert_project(sample_project()).unwrap();

    let mut project = store.get_project(&ProjectId::new("p1")).unwrap().unwrap();
    project.title = "Launch v2".to_string();
    store.update_project(project).unwrap();

    assert!(fs::read_to_string(store.backup_path()).unwrap().contains("Launch v2"));
}

#[test]
fn test_update_unknown_project() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    let result = store.update_project(Project::new("ghost", "Ghost"));
    assert!(matches!(result, Err(StoreError::ProjectNotFound(_))));
}

#[test]
fn test_duplicate_project_rejected() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store.insert_project(sample_project()).unwrap();
    assert!(store.insert_project(sample_project()).is_err());
}
