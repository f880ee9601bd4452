use async_trait::async_trait;
use resource_store::{nulls_last, ActorEntity, Direction, FrameworkError, Query, ResourceActor};
use std::cmp::Ordering;
use uuid::Uuid;

// --- Test Record ---

#[derive(Clone, Debug, PartialEq)]
struct Task {
    id: Uuid,
    project: String,
    title: String,
    rank: Option<i64>,
    locked: bool,
}

#[derive(Debug)]
struct TaskCreate {
    project: String,
    title: String,
    rank: Option<i64>,
}

#[derive(Debug, Default)]
struct TaskUpdate {
    title: Option<String>,
    rank: Option<i64>,
    locked: Option<bool>,
}

#[derive(Debug)]
enum TaskColumn {
    Rank,
    Title,
}

#[derive(Debug, thiserror::Error)]
enum TaskError {
    #[error("title must not be blank")]
    BlankTitle,
    #[error("task is locked")]
    Locked,
}

#[async_trait]
impl ActorEntity for Task {
    type Id = Uuid;
    type Create = TaskCreate;
    type Update = TaskUpdate;
    type Filter = String;
    type Column = TaskColumn;
    type Context = ();
    type Error = TaskError;

    fn from_create_params(id: Uuid, params: TaskCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            project: params.project,
            title: params.title,
            rank: params.rank,
            locked: false,
        })
    }

    fn matches(&self, project: &String) -> bool {
        &self.project == project
    }

    fn compare(&self, other: &Self, column: &TaskColumn) -> Ordering {
        match column {
            TaskColumn::Rank => nulls_last(self.rank.as_ref(), other.rank.as_ref()),
            TaskColumn::Title => self.title.cmp(&other.title),
        }
    }

    async fn on_create(&mut self, _ctx: &()) -> Result<(), Self::Error> {
        if self.title.trim().is_empty() {
            return Err(TaskError::BlankTitle);
        }
        Ok(())
    }

    async fn on_update(&mut self, update: TaskUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(rank) = update.rank {
            self.rank = Some(rank);
        }
        if let Some(locked) = update.locked {
            self.locked = locked;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        if self.locked {
            return Err(TaskError::Locked);
        }
        Ok(())
    }
}

fn task(project: &str, title: &str, rank: Option<i64>) -> TaskCreate {
    TaskCreate {
        project: project.to_string(),
        title: title.to_string(),
        rank,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_store_full_lifecycle() {
    let (actor, client) = ResourceActor::<Task>::new(10, Uuid::new_v4);
    tokio::spawn(actor.run(()));

    // 1. Create
    let id = client.create(task("home", "Paint", None)).await.unwrap();

    // 2. Get
    let stored = client.get(id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Paint");
    assert_eq!(stored.id, id);

    // 3. Update returns the new state
    let updated = client
        .update(
            id,
            TaskUpdate {
                title: Some("Paint fence".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Paint fence");

    // 4. Delete
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_filters_and_orders_with_nulls_last() {
    let (actor, client) = ResourceActor::<Task>::new(10, Uuid::new_v4);
    tokio::spawn(actor.run(()));

    client.create(task("home", "C", None)).await.unwrap();
    client.create(task("home", "A", Some(2))).await.unwrap();
    client.create(task("home", "B", Some(0))).await.unwrap();
    client.create(task("work", "Z", Some(1))).await.unwrap();

    let home = client
        .list(Query::filtered("home".to_string()).order_by(TaskColumn::Rank, Direction::Ascending))
        .await
        .unwrap();
    let titles: Vec<_> = home.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "A", "C"]);

    let by_title_desc = client
        .list(Query::all().order_by(TaskColumn::Title, Direction::Descending))
        .await
        .unwrap();
    assert_eq!(by_title_desc.len(), 4);
    assert_eq!(by_title_desc[0].title, "Z");
}

#[tokio::test]
async fn test_hook_failures_surface_as_entity_errors() {
    let (actor, client) = ResourceActor::<Task>::new(10, Uuid::new_v4);
    tokio::spawn(actor.run(()));

    // on_create rejects, nothing is stored
    let err = client.create(task("home", "   ", None)).await.unwrap_err();
    assert!(matches!(err, FrameworkError::EntityError(_)));
    assert!(client.list(Query::all()).await.unwrap().is_empty());

    // on_delete vetoes, the record survives
    let id = client.create(task("home", "Keep", None)).await.unwrap();
    client
        .update(
            id,
            TaskUpdate {
                locked: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let err = client.delete(id).await.unwrap_err();
    assert_eq!(err.to_string(), "Entity error: task is locked");
    assert!(client.get(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_missing_records_report_not_found() {
    let (actor, client) = ResourceActor::<Task>::new(10, Uuid::new_v4);
    tokio::spawn(actor.run(()));

    let ghost = Uuid::new_v4();
    assert!(client.get(ghost).await.unwrap().is_none());
    assert!(matches!(
        client.update(ghost, TaskUpdate::default()).await,
        Err(FrameworkError::NotFound(_))
    ));
    assert!(matches!(
        client.delete(ghost).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_closed_actor_reports_actor_closed() {
    let (actor, client) = ResourceActor::<Task>::new(10, Uuid::new_v4);
    drop(actor);

    let err = client.create(task("home", "late", None)).await.unwrap_err();
    assert!(matches!(err, FrameworkError::ActorClosed));
}
