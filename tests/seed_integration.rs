use mock_backend::config::SeedConfig;
use mock_backend::slug::id_from_slug;
use mock_backend::{
    load_seed_data, load_seed_data_with, Activity, Bookmark, Database, Environment, Fixtures, Id,
    Instance, MemoryStore, Message, MessageType, SeedSummary, Store, Task, TaskStatus, TaskType,
    User, Workspace, DATABASE_FIELD,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn fixture_store() -> MemoryStore {
    let store = MemoryStore::new();
    store
        .load_fixtures(&Fixtures::embedded().expect("embedded fixtures parse"))
        .expect("fixtures load into an empty store");
    store
}

fn seeded_store(seed: u64) -> (MemoryStore, SeedSummary) {
    let store = fixture_store();
    let mut rng = StdRng::seed_from_u64(seed);
    let summary = load_seed_data_with(&store, &SeedConfig::default(), &mut rng)
        .expect("seeding a fresh store succeeds");
    (store, summary)
}

fn get<R: mock_backend::Record>(store: &MemoryStore, id: &Id) -> R {
    store
        .find(id)
        .unwrap()
        .unwrap_or_else(|| panic!("{} {} should exist", R::COLLECTION, id))
}

fn assert_member(store: &MemoryStore, user_id: &Id, workspace_id: &Id, role: &str) {
    let user: User = get(store, user_id);
    assert!(
        user.is_member_of(workspace_id),
        "{} {} is not a member of workspace {}",
        role,
        user_id,
        workspace_id
    );
}

#[test]
fn test_environment_and_instance_counts() {
    let (store, summary) = seeded_store(1);

    for (workspace_id, instance_count) in [("1", 5), ("101", 4)] {
        let envs: Vec<Environment> = store
            .filter(|env: &Environment| env.workspace_id == workspace_id)
            .unwrap();
        let instances: Vec<Instance> = store
            .filter(|instance: &Instance| instance.workspace_id == workspace_id)
            .unwrap();
        assert_eq!(envs.len(), 4);
        assert_eq!(instances.len(), instance_count);

        let workspace: Workspace = get(&store, &workspace_id.to_string());
        let env_ids: Vec<Id> = envs.iter().map(|env| env.id.clone()).collect();
        assert_eq!(workspace.environment_id_list, env_ids);
    }

    assert_eq!(summary.primary.instance_ids.len(), 5);
    assert_eq!(summary.isolation.instance_ids.len(), 4);

    // The extra instance shares the production environment
    let extra: Instance = get(&store, &summary.primary.instance_ids[4]);
    let fourth: Instance = get(&store, &summary.primary.instance_ids[3]);
    assert_eq!(extra.environment_id, fourth.environment_id);
    let prod: Environment = get(&store, &extra.environment_id);
    assert_eq!(prod.name, "Prod");
}

#[test]
fn test_task_references_stay_in_workspace() {
    for seed in 0..10 {
        let (store, _) = seeded_store(seed);

        for task in store.all::<Task>().unwrap() {
            let env_id = task.environment_field();
            if let Some(env_id) = env_id {
                let env: Environment = get(&store, env_id);
                assert_eq!(env.workspace_id, task.workspace_id);
            }

            match (task.task_type, task.database_field()) {
                (TaskType::DatabaseCreate, Some(name)) => {
                    let matches: Vec<Database> = store
                        .filter(|db: &Database| {
                            &db.name == name && db.workspace_id == task.workspace_id
                        })
                        .unwrap();
                    assert_eq!(matches.len(), 1, "requested database {} is ambiguous", name);
                }
                (_, Some(db_id)) => {
                    let db: Database = get(&store, db_id);
                    assert_eq!(db.workspace_id, task.workspace_id);
                }
                (_, None) => {}
            }

            for stage in &task.stage_list {
                if let Some(env_id) = &stage.environment_id {
                    let env: Environment = get(&store, env_id);
                    assert_eq!(env.workspace_id, task.workspace_id);
                }
                if let Some(db_id) = &stage.database_id {
                    let db: Database = get(&store, db_id);
                    assert_eq!(db.workspace_id, task.workspace_id);
                    let instance: Instance = get(&store, &db.instance_id);
                    assert_eq!(instance.workspace_id, task.workspace_id);
                }
            }
        }

        for instance in store.all::<Instance>().unwrap() {
            let env: Environment = get(&store, &instance.environment_id);
            assert_eq!(env.workspace_id, instance.workspace_id);
        }
    }
}

#[test]
fn test_users_and_containers_stay_in_workspace() {
    for seed in 0..10 {
        let (store, _) = seeded_store(seed);

        for task in store.all::<Task>().unwrap() {
            assert_member(&store, &task.creator_id, &task.workspace_id, "creator");
            assert_member(&store, &task.assignee_id, &task.workspace_id, "assignee");
            for subscriber in &task.subscriber_id_list {
                assert_member(&store, subscriber, &task.workspace_id, "subscriber");
            }
        }

        for activity in store.all::<Activity>().unwrap() {
            let task: Task = get(&store, &activity.container_id);
            assert_eq!(task.workspace_id, activity.workspace_id);
            assert_member(&store, &activity.creator.id, &activity.workspace_id, "commenter");
            let user: User = get(&store, &activity.creator.id);
            assert_eq!(user.name, activity.creator.name);
        }

        for message in store.all::<Message>().unwrap() {
            let task: Task = get(&store, &message.container_id);
            assert_eq!(task.workspace_id, message.workspace_id);
            assert_member(&store, &message.creator_id, &message.workspace_id, "sender");
            assert_member(&store, &message.receiver_id, &message.workspace_id, "receiver");
        }
    }
}

#[test]
fn test_stage_ids_and_status() {
    for seed in 0..20 {
        let (store, _) = seeded_store(seed);

        for task in store.all::<Task>().unwrap() {
            assert!(!task.stage_list.is_empty(), "task {} has no stages", task.id);
            for (i, stage) in task.stage_list.iter().enumerate() {
                assert_eq!(stage.id, (i + 1).to_string());
            }

            match task.status {
                TaskStatus::Done => {
                    assert!(task.stage_list.iter().all(|stage| stage.status.is_settled()))
                }
                TaskStatus::Open | TaskStatus::Canceled => {
                    assert!(task.stage_list.iter().any(|stage| !stage.status.is_settled()))
                }
            }
        }
    }
}

#[test]
fn test_single_bookmark_links_back_to_task() {
    let (store, summary) = seeded_store(3);

    let bookmarks = store.all::<Bookmark>().unwrap();
    assert_eq!(bookmarks.len(), 1);
    let bookmark = &bookmarks[0];
    assert_eq!(bookmark.id, summary.bookmark_id);
    assert_eq!(bookmark.workspace_id, "101");
    assert_member(&store, &bookmark.creator_id, &bookmark.workspace_id, "bookmark owner");

    let slug = bookmark.link.strip_prefix("/task/").expect("task link");
    let task_id = id_from_slug(slug).expect("slug ends with an id").to_string();
    let task: Task = get(&store, &task_id);
    assert_eq!(task.workspace_id, "101");
    assert_eq!(task.name, bookmark.name);
    assert_eq!(summary.isolation.task_ids, vec![task_id]);
}

#[test]
fn test_two_database_requests_for_second_database() {
    let (store, summary) = seeded_store(5);

    let requested: Database = get(&store, &summary.primary.database_ids[1]);
    assert_eq!(requested.name, "shop6");

    let requests: Vec<Task> = store
        .filter(|task: &Task| {
            task.task_type == TaskType::DatabaseCreate && task.name.contains(&requested.name)
        })
        .unwrap();
    assert_eq!(requests.len(), 2);
    for task in &requests {
        assert_eq!(task.payload.get(&DATABASE_FIELD), Some(&requested.name));
        assert_eq!(task.workspace_id, "1");
    }
}

#[test]
fn test_message_batches_alternate() {
    let (store, summary) = seeded_store(8);
    let welcome_id = &summary.primary.task_ids[0];

    let messages: Vec<Message> = store
        .filter(|message: &Message| &message.container_id == welcome_id)
        .unwrap();
    assert_eq!(messages.len(), 15);
    assert_eq!(summary.message_count, 20);

    for batch in messages.chunks(5) {
        let receiver = &batch[0].receiver_id;
        for (i, message) in batch.iter().enumerate() {
            assert_eq!(&message.receiver_id, receiver);
            if i % 2 == 0 {
                assert_eq!(message.message_type, MessageType::TaskComment);
                assert!(message.payload.new_status.is_none());
            } else {
                assert_eq!(message.message_type, MessageType::TaskUpdateStatus);
                assert_eq!(message.payload.old_status, Some(TaskStatus::Open));
            }
        }
    }

    // The DBA batch is about cancellation
    let canceled = messages
        .iter()
        .filter(|message| message.payload.new_status == Some(TaskStatus::Canceled))
        .count();
    assert_eq!(canceled, 2);
}

#[test]
fn test_one_creation_activity_per_task() {
    let (store, summary) = seeded_store(13);

    let tasks = store.all::<Task>().unwrap();
    let activities = store.all::<Activity>().unwrap();
    assert_eq!(activities.len(), summary.activity_count);
    assert_eq!(activities.len(), tasks.len() * 4);

    for task in &tasks {
        let created: Vec<&Activity> = activities
            .iter()
            .filter(|activity| activity.container_id == task.id)
            .collect();
        assert_eq!(created.len(), 4);
        assert_eq!(created[0].creator.id, task.creator_id);
        assert!(created[0].comment.is_none());
        assert!(created[1..].iter().all(|activity| activity.comment.is_some()));
    }
}

#[test]
fn test_default_entry_point_uses_fixture_ids() {
    let store = fixture_store();
    let summary = load_seed_data(&store).unwrap();

    assert_eq!(summary.primary.workspace_id, "1");
    assert_eq!(summary.isolation.workspace_id, "101");
    assert_eq!(summary.primary.environment_ids, vec!["1", "2", "3", "4"]);
    assert_eq!(summary.isolation.instance_ids, vec!["6", "7", "8", "9"]);
}

#[test]
fn test_missing_database_fixtures_abort_seeding() {
    let mut fixtures = Fixtures::embedded().unwrap();
    fixtures.databases.clear();

    let store = MemoryStore::new();
    store.load_fixtures(&fixtures).unwrap();

    let err = load_seed_data(&store).unwrap_err();
    assert!(err.to_string().contains("shop3"), "unexpected error: {}", err);
}

#[test]
fn test_missing_workspace_aborts_seeding() {
    let store = MemoryStore::new();
    let err = load_seed_data(&store).unwrap_err();
    assert!(err.to_string().contains("Workspace 1"), "unexpected error: {}", err);
}
