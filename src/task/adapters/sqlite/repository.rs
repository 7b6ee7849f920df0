//! `SQLite` repository implementation for task lifecycle storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        AssemblyCount, NewTask, PersistedTaskData, Task, TaskId, TaskNumber, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;
use tracing::debug;

/// Schema applied by [`SqliteTaskRepository::initialize_schema`].
pub const SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-18-000000_create_tasks/up.sql");

/// `SQLite` connection pool type used by task adapters.
pub type TaskSqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Per-connection settings applied whenever the pool opens a connection.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute("PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// `SQLite`-backed task repository.
#[derive(Debug, Clone)]
pub struct SqliteTaskRepository {
    pool: TaskSqlitePool,
}

impl SqliteTaskRepository {
    /// Creates a new repository from an existing `SQLite` connection pool.
    #[must_use]
    pub const fn new(pool: TaskSqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url` with at most `max_size`
    /// connections.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the pool cannot
    /// establish its initial connections.
    pub fn connect(database_url: &str, max_size: u32) -> TaskRepositoryResult<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_size)
            .connection_customizer(Box::new(SqlitePragmas))
            .build(manager)
            .map_err(TaskRepositoryError::persistence)?;
        Ok(Self::new(pool))
    }

    /// Applies the task schema. Safe to call on every start-up.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the script fails.
    pub async fn initialize_schema(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(SCHEMA_SQL)
                .map_err(TaskRepositoryError::persistence)?;
            debug!("task schema applied");
            Ok(())
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

// Lets repository results flow through `Connection::transaction`.
impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let task_number = task.task_number().clone();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| insert_row(connection, &task_number, &new_row))
            .await
    }

    async fn insert_all(&self, tasks: &[NewTask]) -> TaskRepositoryResult<Vec<Task>> {
        let batch = tasks
            .iter()
            .map(|task| Ok((task.task_number().clone(), to_new_row(task)?)))
            .collect::<TaskRepositoryResult<Vec<_>>>()?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|transaction| {
                batch
                    .iter()
                    .enumerate()
                    .map(|(index, (task_number, new_row))| {
                        insert_row(transaction, task_number, new_row)
                            .map_err(|err| TaskRepositoryError::batch_row(index, err))
                    })
                    .collect()
            })
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let status_val = task.status().as_str();
        let comment_val = task.comment().map(str::to_owned);
        let count_val = count_to_column(task.assembly_count())?;
        let updated_val = task.updated_at().naive_utc();

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(tasks::table.filter(tasks::id.eq(task_id.value())))
                    .set((
                        tasks::status.eq(status_val),
                        tasks::comment.eq(comment_val),
                        tasks::assembly_count.eq(count_val),
                        tasks::updated_at.eq(updated_val),
                    ))
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.value()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, status: Option<TaskStatus>) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = match status {
                Some(wanted) => tasks::table
                    .filter(tasks::status.eq(wanted.as_str()))
                    .order((tasks::created_at.desc(), tasks::id.desc()))
                    .select(TaskRow::as_select())
                    .load::<TaskRow>(connection),
                None => tasks::table
                    .order((tasks::created_at.desc(), tasks::id.desc()))
                    .select(TaskRow::as_select())
                    .load::<TaskRow>(connection),
            }
            .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count(&self) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let total = tasks::table
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(total).map_err(TaskRepositoryError::invalid_persisted_data)
        })
        .await
    }
}

fn insert_row(
    connection: &mut SqliteConnection,
    task_number: &TaskNumber,
    new_row: &NewTaskRow,
) -> TaskRepositoryResult<Task> {
    let row = diesel::insert_into(tasks::table)
        .values(new_row)
        .returning(TaskRow::as_returning())
        .get_result::<TaskRow>(connection)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                TaskRepositoryError::DuplicateTaskNumber(task_number.clone())
            }
            _ => TaskRepositoryError::persistence(err),
        })?;
    row_to_task(row)
}

fn count_to_column(count: AssemblyCount) -> TaskRepositoryResult<i32> {
    i32::try_from(count.value()).map_err(TaskRepositoryError::persistence)
}

fn to_new_row(task: &NewTask) -> TaskRepositoryResult<NewTaskRow> {
    Ok(NewTaskRow {
        task_number: task.task_number().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        comment: task.comment().map(str::to_owned),
        assembly_count: count_to_column(task.assembly_count())?,
        created_by: task.created_by().to_owned(),
        created_at: task.created_at().naive_utc(),
        updated_at: task.created_at().naive_utc(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        task_number,
        status,
        comment,
        assembly_count,
        created_by,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::new(id),
        task_number: TaskNumber::new(task_number)
            .map_err(TaskRepositoryError::invalid_persisted_data)?,
        status: TaskStatus::try_from(status.as_str())
            .map_err(TaskRepositoryError::invalid_persisted_data)?,
        comment,
        assembly_count: AssemblyCount::new(i64::from(assembly_count))
            .map_err(TaskRepositoryError::invalid_persisted_data)?,
        created_by,
        created_at: created_at.and_utc(),
        updated_at: updated_at.and_utc(),
    };
    Ok(Task::from_persisted(data))
}
