use anyhow::{ensure, Context, Result};
use itertools::Itertools;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::SeedConfig;
use crate::model::{
    ActionType, Activity, Bookmark, Database, Environment, Id, Instance, Message, MessagePayload,
    Stage, StageStatus, StageType, Task, TaskStatus, TaskType, User, Workspace,
    DATABASE_FIELD, ENVIRONMENT_FIELD,
};
use crate::seed::status::fill_task_and_stage_status;
use crate::seed::text::{fake_text, random_schema_change, LoremKind};
use crate::slug::task_slug;
use crate::store::traits::Store;

/// Environment tiers, lowest first; the last one is production
pub const ENVIRONMENT_NAMES: [&str; 4] = ["Dev", "Integration", "Staging", "Prod"];

pub const INSTANCE_NAMES: [&str; 5] = [
    "On-premise instance",
    "AWS instance",
    "GCP instance",
    "Azure instance",
    "Ali Cloud instance",
];

/// The primary workspace gets one extra instance, on the production tier
pub const PRIMARY_INSTANCE_COUNT: usize = 5;
pub const ISOLATION_INSTANCE_COUNT: usize = 4;

/// Databases looked up on instances 1..=4 of each workspace
pub const PRIMARY_DATABASE_NAMES: [&str; 4] = ["shop3", "shop6", "shop9", "shop12"];
pub const ISOLATION_DATABASE_NAMES: [&str; 4] = ["shop18", "shop21", "shop24", "shop27"];

// Fixture users
const OWNER_ID: &str = "1";
const DBA_ID: &str = "2";
const DEVELOPER_ID: &str = "3";
const ISOLATION_DBA_ID: &str = "4";
const SECOND_DEVELOPER_ID: &str = "5";

const WELCOME_DESCRIPTION: &str = "Welcome to the mock console, this is the task interface where DBAs and developers collaborate on database management tasks such as: \n\n - Requesting a new database\n - Creating a table\n - Creating an index\n - Adding a column\n - Troubleshooting performance issue\n\nLet's bookmark this task by clicking the star icon on the top of this page.";
const WELCOME_SQL: &str = "SELECT 'Welcome'\nFROM engineering\nWHERE role IN ('DBA', 'Developer') AND taste = 'Good';";

/// Ids created for one workspace, in creation order
#[derive(Debug, Clone, Default)]
pub struct WorkspaceSummary {
    pub workspace_id: Id,
    pub environment_ids: Vec<Id>,
    pub instance_ids: Vec<Id>,
    pub database_ids: Vec<Id>,
    pub task_ids: Vec<Id>,
}

#[derive(Debug, Clone, Default)]
pub struct SeedSummary {
    pub primary: WorkspaceSummary,
    pub isolation: WorkspaceSummary,
    pub activity_count: usize,
    pub message_count: usize,
    pub bookmark_id: Id,
}

/// Users of one workspace by role
#[derive(Debug, Clone)]
struct Team {
    owner: User,
    dba: User,
    developers: Vec<User>,
}

impl Team {
    /// Everyone on the team, each user once
    fn members(&self) -> Vec<&User> {
        std::iter::once(&self.owner)
            .chain(std::iter::once(&self.dba))
            .chain(self.developers.iter())
            .unique_by(|user| user.id.clone())
            .collect()
    }

    fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &User {
        let members = self.members();
        members.choose(rng).copied().unwrap_or(&self.owner)
    }

    fn developer(&self, index: usize) -> &User {
        self.developers.get(index).unwrap_or(&self.owner)
    }
}

/// Schema update task template: creator, assignee and subscribers
struct Authorship<'t> {
    creator: &'t User,
    assignee: &'t User,
    subscribers: Vec<&'t User>,
}

/// Seed the store with sample data using the default settings and a
/// non-deterministic RNG. The store must hold the fixtures and nothing else.
pub fn load_seed_data<S: Store>(store: &S) -> Result<SeedSummary> {
    load_seed_data_with(store, &SeedConfig::default(), &mut rand::thread_rng())
}

pub fn load_seed_data_with<S: Store, R: Rng + ?Sized>(
    store: &S,
    config: &SeedConfig,
    rng: &mut R,
) -> Result<SeedSummary> {
    Seeder { store, config, rng }.run()
}

struct Seeder<'a, S: Store, R: Rng + ?Sized> {
    store: &'a S,
    config: &'a SeedConfig,
    rng: &'a mut R,
}

impl<'a, S: Store, R: Rng + ?Sized> Seeder<'a, S, R> {
    fn run(mut self) -> Result<SeedSummary> {
        let primary = self.find_workspace(&self.config.primary_workspace_id)?;
        let isolation = self.find_workspace(&self.config.isolation_workspace_id)?;

        let primary_team = Team {
            owner: self.find_member(OWNER_ID, &primary)?,
            dba: self.find_member(DBA_ID, &primary)?,
            developers: vec![
                self.find_member(DEVELOPER_ID, &primary)?,
                self.find_member(SECOND_DEVELOPER_ID, &primary)?,
            ],
        };
        let isolation_team = Team {
            owner: self.find_member(OWNER_ID, &isolation)?,
            dba: self.find_member(ISOLATION_DBA_ID, &isolation)?,
            developers: vec![self.find_member(OWNER_ID, &isolation)?],
        };

        info!("Creating environments and instances");
        let primary_envs = self.create_environments(primary.clone())?;
        let isolation_envs = self.create_environments(isolation.clone())?;
        let primary_instances =
            self.create_instances(&primary, &primary_envs, PRIMARY_INSTANCE_COUNT)?;
        let isolation_instances =
            self.create_instances(&isolation, &isolation_envs, ISOLATION_INSTANCE_COUNT)?;

        info!("Resolving database fixtures");
        let primary_dbs = self.find_databases(&primary_instances, &PRIMARY_DATABASE_NAMES)?;
        let isolation_dbs = self.find_databases(&isolation_instances, &ISOLATION_DATABASE_NAMES)?;

        let mut summary = SeedSummary {
            primary: WorkspaceSummary {
                workspace_id: primary.id.clone(),
                environment_ids: ids(&primary_envs),
                instance_ids: ids(&primary_instances),
                database_ids: ids(&primary_dbs),
                task_ids: Vec::new(),
            },
            isolation: WorkspaceSummary {
                workspace_id: isolation.id.clone(),
                environment_ids: ids(&isolation_envs),
                instance_ids: ids(&isolation_instances),
                database_ids: ids(&isolation_dbs),
                task_ids: Vec::new(),
            },
            ..SeedSummary::default()
        };

        info!("Creating tasks for workspace {}", primary.id);
        let welcome = self.create_welcome_task(&primary, &primary_team, &primary_envs, &primary_dbs)?;
        summary.primary.task_ids.push(welcome.id.clone());
        summary.activity_count += 1 + self.config.comment_count;

        let receivers = [
            (&primary_team.owner, TaskStatus::Done),
            (&primary_team.dba, TaskStatus::Canceled),
            (primary_team.developer(0), TaskStatus::Done),
        ];
        for (receiver, new_status) in receivers {
            summary.message_count +=
                self.create_message_batch(&welcome, &primary_team, receiver, new_status)?;
        }

        let requests = [
            (&primary_envs[1], &primary_team.owner, &primary_team.dba),
            (last(&primary_envs)?, &primary_team.dba, &primary_team.owner),
        ];
        for (environment, assignee, subscriber) in requests {
            let task = Task {
                subscriber_id_list: vec![subscriber.id.clone(), primary_team.developer(1).id.clone()],
                ..Task::new(
                    primary.id.clone(),
                    TaskType::DatabaseCreate,
                    format!(
                        "Create database '{}' for environment - {}",
                        primary_dbs[1].name, environment.name
                    ),
                    primary_team.developer(0).id.clone(),
                    assignee.id.clone(),
                )
            };
            let task = self.create_database_request(task, environment, &primary_dbs[1])?;
            self.create_activities(&task, primary_team.developer(0), &primary_team)?;
            summary.primary.task_ids.push(task.id);
            summary.activity_count += 1 + self.config.comment_count;
        }

        let authorships = [
            Authorship {
                creator: primary_team.developer(0),
                assignee: &primary_team.owner,
                subscribers: vec![&primary_team.dba, primary_team.developer(1)],
            },
            Authorship {
                creator: &primary_team.owner,
                assignee: &primary_team.dba,
                subscribers: vec![primary_team.developer(1)],
            },
            Authorship {
                creator: primary_team.developer(1),
                assignee: &primary_team.dba,
                subscribers: vec![&primary_team.owner, primary_team.developer(0)],
            },
        ];
        for authorship in &authorships {
            for _ in 0..self.config.schema_update_tasks_per_author {
                let task = self.create_schema_update_task(
                    &primary,
                    authorship,
                    &primary_team,
                    &primary_envs,
                    &primary_dbs,
                )?;
                summary.primary.task_ids.push(task.id);
                summary.activity_count += 1 + self.config.comment_count;
            }
        }

        info!("Creating tasks for workspace {}", isolation.id);
        let authorship = Authorship {
            creator: isolation_team.developer(0),
            assignee: &isolation_team.dba,
            subscribers: Vec::new(),
        };
        let isolation_task = self.create_schema_update_task(
            &isolation,
            &authorship,
            &isolation_team,
            &isolation_envs,
            &isolation_dbs,
        )?;
        summary.isolation.task_ids.push(isolation_task.id.clone());
        summary.activity_count += 1 + self.config.comment_count;
        summary.message_count += self.create_message_batch(
            &isolation_task,
            &isolation_team,
            isolation_team.developer(0),
            TaskStatus::Done,
        )?;

        let bookmark = self.create_bookmark(&isolation, &isolation_team.owner)?;
        summary.bookmark_id = bookmark.id;

        info!(
            "Seeded {} tasks, {} activities, {} messages",
            summary.primary.task_ids.len() + summary.isolation.task_ids.len(),
            summary.activity_count,
            summary.message_count
        );
        Ok(summary)
    }

    fn find_workspace(&self, id: &Id) -> Result<Workspace> {
        self.store
            .find(id)?
            .with_context(|| format!("Workspace {} not found; load fixtures before seeding", id))
    }

    /// Fixture user who must belong to `workspace`
    fn find_member(&self, id: &str, workspace: &Workspace) -> Result<User> {
        let user: User = self
            .store
            .find(&id.to_string())?
            .with_context(|| format!("User {} not found; load fixtures before seeding", id))?;
        ensure!(
            user.is_member_of(&workspace.id),
            "User {} is not a member of workspace {}",
            user.id,
            workspace.id
        );
        Ok(user)
    }

    /// One environment per tier, recorded on the workspace in tier order
    fn create_environments(&mut self, mut workspace: Workspace) -> Result<Vec<Environment>> {
        let mut environments = Vec::with_capacity(ENVIRONMENT_NAMES.len());
        for (order, name) in ENVIRONMENT_NAMES.iter().enumerate() {
            let environment = self
                .store
                .create(Environment::new(workspace.id.clone(), name.to_string(), order))?;
            debug!("Created environment {} '{}'", environment.id, environment.name);
            environments.push(environment);
        }

        workspace.environment_id_list = ids(&environments);
        self.store.update(workspace)?;
        Ok(environments)
    }

    /// Instance `i` sits on environment `i`; any extra instances share the
    /// production environment.
    fn create_instances(
        &mut self,
        workspace: &Workspace,
        environments: &[Environment],
        count: usize,
    ) -> Result<Vec<Instance>> {
        let mut instances = Vec::with_capacity(count);
        for i in 0..count {
            let environment = match environments.get(i) {
                Some(environment) => environment,
                None => last(environments)?,
            };
            let prefix = INSTANCE_NAMES.choose(self.rng).copied().unwrap_or(INSTANCE_NAMES[0]);
            let instance = self.store.create(Instance::new(
                workspace.id.clone(),
                environment.id.clone(),
                format!("{} {}", prefix, i + 1),
            ))?;
            debug!(
                "Created instance {} '{}' on environment {}",
                instance.id, instance.name, environment.name
            );
            instances.push(instance);
        }
        Ok(instances)
    }

    /// Database `names[i]` on `instances[i]`; a miss means the fixtures were not loaded
    fn find_databases(&self, instances: &[Instance], names: &[&str]) -> Result<Vec<Database>> {
        ensure!(
            instances.len() >= names.len(),
            "{} databases requested on {} instances",
            names.len(),
            instances.len()
        );

        instances
            .iter()
            .zip(names)
            .map(|(instance, name)| {
                self.store
                    .find_by(|db: &Database| db.instance_id == instance.id && db.name == *name)?
                    .with_context(|| {
                        format!(
                            "Database '{}' not found on instance {}; load fixtures before seeding",
                            name, instance.id
                        )
                    })
            })
            .collect()
    }

    fn create_welcome_task(
        &mut self,
        workspace: &Workspace,
        team: &Team,
        environments: &[Environment],
        databases: &[Database],
    ) -> Result<Task> {
        let creator = team.developer(0);
        let mut task = Task::new(
            workspace.id.clone(),
            TaskType::General,
            "Hello, World!".to_string(),
            creator.id.clone(),
            team.owner.id.clone(),
        );
        task.description = Some(WELCOME_DESCRIPTION.to_string());
        task.sql = Some(WELCOME_SQL.to_string());
        task.subscriber_id_list = vec![
            team.dba.id.clone(),
            team.developer(1).id.clone(),
            creator.id.clone(),
            team.owner.id.clone(),
        ];
        task.stage_list = vec![Stage::simple(1, "Request", StageType::General, StageStatus::Pending)];
        task.payload.insert(ENVIRONMENT_FIELD, environments[0].id.clone());
        task.payload.insert(DATABASE_FIELD, databases[0].id.clone());

        let task = self.store.create(task)?;
        debug!("Created task {} '{}'", task.id, task.name);
        self.create_activities(&task, creator, team)?;
        Ok(task)
    }

    /// Request for a database that does not exist yet, so the payload holds its name
    fn create_database_request(
        &mut self,
        mut task: Task,
        environment: &Environment,
        database: &Database,
    ) -> Result<Task> {
        task.stage_list = vec![Stage::simple(
            1,
            "Create database",
            StageType::DatabaseCreate,
            StageStatus::Pending,
        )];
        task.payload.insert(ENVIRONMENT_FIELD, environment.id.clone());
        task.payload.insert(DATABASE_FIELD, database.name.clone());

        let task = self.store.create(task)?;
        debug!("Created task {} '{}'", task.id, task.name);
        Ok(task)
    }

    fn create_schema_update_task(
        &mut self,
        workspace: &Workspace,
        authorship: &Authorship<'_>,
        team: &Team,
        environments: &[Environment],
        databases: &[Database],
    ) -> Result<Task> {
        let change = random_schema_change(self.rng);
        let filled = fill_task_and_stage_status(environments, databases, self.rng)?;

        let mut task = Task::new(
            workspace.id.clone(),
            TaskType::DatabaseSchemaUpdate,
            change.title,
            authorship.creator.id.clone(),
            authorship.assignee.id.clone(),
        );
        task.sql = Some(change.sql);
        task.subscriber_id_list = authorship
            .subscribers
            .iter()
            .map(|user| user.id.clone())
            .collect();
        task.status = filled.status;
        task.stage_list = filled.stage_list;

        let task = self.store.create(task)?;
        debug!("Created task {} '{}' ({:?})", task.id, task.name, task.status);
        self.create_activities(&task, authorship.creator, team)?;
        Ok(task)
    }

    /// The creation entry plus randomly attributed comments
    fn create_activities(&mut self, task: &Task, creator: &User, team: &Team) -> Result<()> {
        self.store.create(Activity::new(
            task.workspace_id.clone(),
            task.id.clone(),
            ActionType::TaskCreate,
            creator.principal(),
            None,
        ))?;

        for _ in 0..self.config.comment_count {
            let author = team.pick(self.rng).principal();
            let comment = fake_text(LoremKind::Paragraph, self.rng);
            self.store.create(Activity::new(
                task.workspace_id.clone(),
                task.id.clone(),
                ActionType::TaskCommentCreate,
                author,
                Some(comment),
            ))?;
        }
        Ok(())
    }

    /// Messages to one receiver, alternating comment and OPEN -> `new_status`
    fn create_message_batch(
        &mut self,
        task: &Task,
        team: &Team,
        receiver: &User,
        new_status: TaskStatus,
    ) -> Result<usize> {
        for i in 0..self.config.message_batch_size {
            let creator = team.pick(self.rng).id.clone();
            let text = fake_text(LoremKind::Sentence, self.rng);
            let payload = if i % 2 == 0 {
                MessagePayload::comment(text)
            } else {
                MessagePayload::status_change(text, TaskStatus::Open, new_status)
            };

            self.store.create(Message::new(
                task.workspace_id.clone(),
                task.id.clone(),
                creator,
                receiver.id.clone(),
                payload,
            ))?;
        }
        Ok(self.config.message_batch_size)
    }

    /// Bookmark on the first task of the workspace
    fn create_bookmark(&mut self, workspace: &Workspace, creator: &User) -> Result<Bookmark> {
        let task: Task = self
            .store
            .find_by(|task: &Task| task.workspace_id == workspace.id)?
            .with_context(|| format!("No task to bookmark in workspace {}", workspace.id))?;

        let bookmark = self.store.create(Bookmark::new(
            workspace.id.clone(),
            creator.id.clone(),
            task.name.clone(),
            format!("/task/{}", task_slug(&task.name, &task.id)),
        ))?;
        debug!("Created bookmark {} -> {}", bookmark.id, bookmark.link);
        Ok(bookmark)
    }
}

fn ids<T: crate::model::Record>(records: &[T]) -> Vec<Id> {
    records.iter().map(|record| record.id().clone()).collect()
}

fn last<T>(records: &[T]) -> Result<&T> {
    records.last().context("Expected at least one record")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            name: format!("User {}", id),
            email: format!("user{}@example.com", id),
            workspace_id_list: vec!["101".to_string()],
        }
    }

    #[test]
    fn test_team_members_are_unique() {
        let team = Team {
            owner: user("1"),
            dba: user("4"),
            developers: vec![user("1")],
        };

        let member_ids: Vec<&str> = team.members().iter().map(|user| user.id.as_str()).collect();
        assert_eq!(member_ids, vec!["1", "4"]);
        assert_eq!(team.developer(0).id, "1");
        assert_eq!(team.developer(3).id, "1");

        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            let picked = team.pick(&mut rng);
            assert!(picked.id == "1" || picked.id == "4");
        }
    }
}
