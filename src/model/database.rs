use crate::model::common::impl_record;
use crate::model::{unassigned_id, Id};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub id: Id,
    pub workspace_id: Id,
    pub environment_id: Id,
    pub name: String,
}

impl_record!(Instance, "instances");

impl Instance {
    pub fn new(workspace_id: Id, environment_id: Id, name: String) -> Self {
        Self {
            id: unassigned_id(),
            workspace_id,
            environment_id,
            name,
        }
    }
}

/// Databases only ever come from fixtures; the seeder looks them up by
/// instance and name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    pub id: Id,
    pub workspace_id: Id,
    pub instance_id: Id,
    pub name: String,
}

impl_record!(Database, "databases");
