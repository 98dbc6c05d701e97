use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::model::{Database, User, Workspace};

const WORKSPACES_JSON: &str = include_str!("../../fixtures/workspaces.json");
const USERS_JSON: &str = include_str!("../../fixtures/users.json");
const DATABASES_JSON: &str = include_str!("../../fixtures/databases.json");

/// Records that exist before seeding runs
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub workspaces: Vec<Workspace>,
    pub users: Vec<User>,
    pub databases: Vec<Database>,
}

impl Fixtures {
    /// Fixtures compiled into the binary from `fixtures/`
    pub fn embedded() -> Result<Self> {
        Ok(Self {
            workspaces: parse("workspaces.json", WORKSPACES_JSON)?,
            users: parse("users.json", USERS_JSON)?,
            databases: parse("databases.json", DATABASES_JSON)?,
        })
    }

    /// Read `workspaces.json`, `users.json` and `databases.json` from a directory
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            workspaces: read(dir, "workspaces.json")?,
            users: read(dir, "users.json")?,
            databases: read(dir, "databases.json")?,
        })
    }

    /// Embedded fixtures unless a directory is given
    pub fn load(dir: Option<&str>) -> Result<Self> {
        match dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::embedded(),
        }
    }
}

fn parse<T: DeserializeOwned>(name: &str, json: &str) -> Result<Vec<T>> {
    serde_json::from_str(json).with_context(|| format!("Failed to parse fixture {}", name))
}

fn read<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>> {
    let path = dir.join(name);
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read fixture {}", path.display()))?;
    parse(name, &json)
}
