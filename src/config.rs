use serde::{Deserialize, Serialize};

use crate::model::Id;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub seed: SeedConfig,
    pub fixtures: FixtureConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Set to false to serve fixtures only
    pub enabled: bool,
    /// Workspace that receives most of the sample data
    pub primary_workspace_id: Id,
    /// Second workspace, used to check nothing leaks between workspaces
    pub isolation_workspace_id: Id,
    /// Messages per receiver, alternating comment and status change
    pub message_batch_size: usize,
    /// Comment activities per task
    pub comment_count: usize,
    /// Schema update tasks created for each creator/assignee pair
    pub schema_update_tasks_per_author: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureConfig {
    /// Directory with workspaces.json, users.json and databases.json.
    /// The embedded fixtures are used when unset.
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File to write the seeded data set to; stdout when unset
    pub path: Option<String>,
    pub pretty: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            primary_workspace_id: "1".to_string(),
            isolation_workspace_id: "101".to_string(),
            message_batch_size: 5,
            comment_count: 3,
            schema_update_tasks_per_author: 3,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            pretty: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        // Add config file if it exists
        config = config.add_source(config::File::with_name("mock-seed").required(false));

        // Add environment variables with prefix "MOCK_", e.g. MOCK_OUTPUT__PATH
        config = config.add_source(
            config::Environment::with_prefix("MOCK")
                .separator("__")
                .prefix_separator("_"),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }
}
