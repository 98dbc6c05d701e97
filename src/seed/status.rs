use anyhow::{ensure, Result};
use rand::Rng;

use crate::model::{Database, Environment, Stage, StageRunnable, StageStatus, StageType, TaskStatus};

/// Number of status scenarios a schema update task is drawn from
pub const SCENARIO_COUNT: usize = 5;

/// Pipeline length the scenarios are written against
pub const PIPELINE_LENGTH: usize = 4;

/// Overall status and stages for a schema update task
#[derive(Debug, Clone, PartialEq)]
pub struct TaskAndStageStatus {
    pub status: TaskStatus,
    pub stage_list: Vec<Stage>,
}

/// Per-stage statuses of each scenario, and whether stage `i` targets database `i`.
/// The task status is part of the table, it is not derived from the stages.
fn scenario_table(index: usize) -> (TaskStatus, &'static [(StageStatus, bool)]) {
    use StageStatus::*;

    match index % SCENARIO_COUNT {
        // Nothing has happened yet
        0 => (TaskStatus::Open, &[(Pending, true), (Pending, true)]),
        // Rolling through the pipeline
        1 => (
            TaskStatus::Open,
            &[(Done, false), (Done, true), (Running, true), (Pending, true)],
        ),
        2 => (
            TaskStatus::Done,
            &[(Done, true), (Skipped, true), (Done, true), (Done, true)],
        ),
        // Stuck on a failure mid-pipeline
        3 => (
            TaskStatus::Open,
            &[(Done, true), (Failed, true), (Pending, true), (Pending, true)],
        ),
        _ => (
            TaskStatus::Canceled,
            &[(Done, true), (Skipped, true), (Done, true), (Pending, true)],
        ),
    }
}

/// Build scenario `index` (taken modulo [`SCENARIO_COUNT`]) over the first
/// environments and databases of a workspace.
pub fn status_scenario(
    index: usize,
    environment_list: &[Environment],
    database_list: &[Database],
) -> Result<TaskAndStageStatus> {
    ensure!(
        environment_list.len() >= PIPELINE_LENGTH,
        "need at least {} environments, got {}",
        PIPELINE_LENGTH,
        environment_list.len()
    );
    ensure!(
        database_list.len() >= PIPELINE_LENGTH,
        "need at least {} databases, got {}",
        PIPELINE_LENGTH,
        database_list.len()
    );

    let (status, stages) = scenario_table(index);
    let stage_list = stages
        .iter()
        .enumerate()
        .map(|(i, (stage_status, with_database))| {
            let environment = &environment_list[i];
            Stage {
                environment_id: Some(environment.id.clone()),
                database_id: with_database.then(|| database_list[i].id.clone()),
                runnable: Some(StageRunnable::auto()),
                ..Stage::simple(i + 1, &environment.name, StageType::SchemaUpdate, *stage_status)
            }
        })
        .collect();

    Ok(TaskAndStageStatus { status, stage_list })
}

/// Pick one of the status scenarios uniformly at random
pub fn fill_task_and_stage_status<R: Rng + ?Sized>(
    environment_list: &[Environment],
    database_list: &[Database],
    rng: &mut R,
) -> Result<TaskAndStageStatus> {
    let index = rng.gen_range(0..SCENARIO_COUNT);
    status_scenario(index, environment_list, database_list)
}
