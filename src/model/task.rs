use crate::model::common::impl_record;
use crate::model::{now_timestamp, unassigned_id, Id};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Payload slot holding the target environment id
pub const ENVIRONMENT_FIELD: u32 = 5;
/// Payload slot holding the target database (id, or name when requesting one)
pub const DATABASE_FIELD: u32 = 7;

/// Field values keyed by field slot
pub type TaskPayload = BTreeMap<u32, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskType {
    #[serde(rename = "bytebase.general")]
    General,
    #[serde(rename = "bytebase.database.create")]
    DatabaseCreate,
    #[serde(rename = "bytebase.database.schema.update")]
    DatabaseSchemaUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Open,
    Done,
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageType {
    #[serde(rename = "bytebase.stage.general")]
    General,
    #[serde(rename = "bytebase.stage.database.create")]
    DatabaseCreate,
    #[serde(rename = "bytebase.stage.schema.update")]
    SchemaUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageStatus {
    Pending,
    Running,
    Done,
    Failed,
    Skipped,
}

impl StageStatus {
    /// Whether the stage no longer needs attention
    pub fn is_settled(&self) -> bool {
        matches!(self, StageStatus::Done | StageStatus::Skipped)
    }
}

/// Action attached to a runnable stage. Nothing is executed in the mock
/// backend, so the only action is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunAction {
    #[default]
    Noop,
}

impl RunAction {
    pub fn run(&self) {
        match self {
            RunAction::Noop => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRunnable {
    pub auto: bool,
    #[serde(skip)]
    pub run: RunAction,
}

impl StageRunnable {
    pub fn auto() -> Self {
        Self {
            auto: true,
            run: RunAction::Noop,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub id: Id,
    pub name: String,
    #[serde(rename = "type")]
    pub stage_type: StageType,
    pub status: StageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runnable: Option<StageRunnable>,
}

impl Stage {
    /// A stage with no environment, database or runnable attached
    pub fn simple(id: usize, name: &str, stage_type: StageType, status: StageStatus) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            stage_type,
            status,
            environment_id: None,
            database_id: None,
            runnable: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Id,
    pub workspace_id: Id,
    pub name: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    pub creator_id: Id,
    pub assignee_id: Id,
    #[serde(default)]
    pub subscriber_id_list: Vec<Id>,
    pub status: TaskStatus,
    pub stage_list: Vec<Stage>,
    #[serde(default)]
    pub payload: TaskPayload,
    pub created_at: String,
    pub updated_at: String,
}

impl_record!(Task, "tasks");

impl Task {
    /// An OPEN task with no stages, subscribers or payload yet
    pub fn new(
        workspace_id: Id,
        task_type: TaskType,
        name: String,
        creator_id: Id,
        assignee_id: Id,
    ) -> Self {
        let now = now_timestamp();
        Self {
            id: unassigned_id(),
            workspace_id,
            name,
            task_type,
            description: None,
            sql: None,
            creator_id,
            assignee_id,
            subscriber_id_list: Vec::new(),
            status: TaskStatus::Open,
            stage_list: Vec::new(),
            payload: TaskPayload::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn environment_field(&self) -> Option<&Id> {
        self.payload.get(&ENVIRONMENT_FIELD)
    }

    pub fn database_field(&self) -> Option<&String> {
        self.payload.get(&DATABASE_FIELD)
    }
}
