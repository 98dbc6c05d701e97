use crate::model::common::impl_record;
use crate::model::{now_timestamp, unassigned_id, Id, Principal, TaskStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    #[serde(rename = "bytebase.task.create")]
    TaskCreate,
    #[serde(rename = "bytebase.task.comment.create")]
    TaskCommentCreate,
}

/// Entry in a task's activity timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Id,
    pub workspace_id: Id,
    /// Task this activity belongs to
    pub container_id: Id,
    pub action_type: ActionType,
    pub creator: Principal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: String,
}

impl_record!(Activity, "activities");

impl Activity {
    pub fn new(
        workspace_id: Id,
        container_id: Id,
        action_type: ActionType,
        creator: Principal,
        comment: Option<String>,
    ) -> Self {
        Self {
            id: unassigned_id(),
            workspace_id,
            container_id,
            action_type,
            creator,
            comment,
            created_at: now_timestamp(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    #[serde(rename = "bb.msg.task.comment")]
    TaskComment,
    #[serde(rename = "bb.msg.task.updatestatus")]
    TaskUpdateStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub task_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_status: Option<TaskStatus>,
}

impl MessagePayload {
    pub fn comment(task_name: String) -> Self {
        Self {
            task_name,
            old_status: None,
            new_status: None,
        }
    }

    pub fn status_change(task_name: String, old_status: TaskStatus, new_status: TaskStatus) -> Self {
        Self {
            task_name,
            old_status: Some(old_status),
            new_status: Some(new_status),
        }
    }
}

/// Inbox notification about a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Id,
    pub workspace_id: Id,
    pub container_id: Id,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub creator_id: Id,
    pub receiver_id: Id,
    pub payload: MessagePayload,
    pub created_at: String,
}

impl_record!(Message, "messages");

impl Message {
    pub fn new(
        workspace_id: Id,
        container_id: Id,
        creator_id: Id,
        receiver_id: Id,
        payload: MessagePayload,
    ) -> Self {
        let message_type = if payload.new_status.is_some() {
            MessageType::TaskUpdateStatus
        } else {
            MessageType::TaskComment
        };

        Self {
            id: unassigned_id(),
            workspace_id,
            container_id,
            message_type,
            creator_id,
            receiver_id,
            payload,
            created_at: now_timestamp(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: Id,
    pub workspace_id: Id,
    pub creator_id: Id,
    pub name: String,
    pub link: String,
}

impl_record!(Bookmark, "bookmarks");

impl Bookmark {
    pub fn new(workspace_id: Id, creator_id: Id, name: String, link: String) -> Self {
        Self {
            id: unassigned_id(),
            workspace_id,
            creator_id,
            name,
            link,
        }
    }
}
