use crate::model::common::impl_record;
use crate::model::{unassigned_id, Id, Principal};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: Id,
    pub name: String,
    /// Environments of this workspace, lowest tier first
    #[serde(default)]
    pub environment_id_list: Vec<Id>,
}

impl_record!(Workspace, "workspaces");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
    /// Workspaces this user is a member of
    #[serde(default)]
    pub workspace_id_list: Vec<Id>,
}

impl_record!(User, "users");

impl User {
    pub fn is_member_of(&self, workspace_id: &Id) -> bool {
        self.workspace_id_list.contains(workspace_id)
    }

    /// Snapshot of this user for activity records
    pub fn principal(&self) -> Principal {
        Principal::new(self.id.clone(), self.name.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub id: Id,
    pub workspace_id: Id,
    pub name: String,
    /// Position in the promotion pipeline; higher is closer to production
    pub order: usize,
}

impl_record!(Environment, "environments");

impl Environment {
    pub fn new(workspace_id: Id, name: String, order: usize) -> Self {
        Self {
            id: unassigned_id(),
            workspace_id,
            name,
            order,
        }
    }
}
