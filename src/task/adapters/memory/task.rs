//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{NewTask, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    number_index: HashMap<String, TaskId>,
    last_id: i64,
}

impl InMemoryTaskState {
    fn assign(&mut self, new_task: &NewTask) -> Task {
        self.last_id += 1;
        let task = new_task.clone().into_task(TaskId::new(self.last_id));
        self.number_index
            .insert(task.task_number().as_str().to_owned(), task.id());
        self.tasks.insert(task.id(), task.clone());
        task
    }

    fn ensure_number_free(&self, new_task: &NewTask) -> TaskRepositoryResult<()> {
        if self
            .number_index
            .contains_key(new_task.task_number().as_str())
        {
            return Err(TaskRepositoryError::DuplicateTaskNumber(
                new_task.task_number().clone(),
            ));
        }
        Ok(())
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.ensure_number_free(task)?;
        Ok(state.assign(task))
    }

    async fn insert_all(&self, tasks: &[NewTask]) -> TaskRepositoryResult<Vec<Task>> {
        let mut state = self.state.write().map_err(lock_error)?;

        // Validate the whole batch before assigning any identifier.
        let mut batch_numbers = HashSet::with_capacity(tasks.len());
        for (index, new_task) in tasks.iter().enumerate() {
            state
                .ensure_number_free(new_task)
                .map_err(|err| TaskRepositoryError::batch_row(index, err))?;
            if !batch_numbers.insert(new_task.task_number().as_str()) {
                return Err(TaskRepositoryError::batch_row(
                    index,
                    TaskRepositoryError::DuplicateTaskNumber(new_task.task_number().clone()),
                ));
            }
        }

        Ok(tasks
            .iter()
            .map(|new_task| state.assign(new_task))
            .collect())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *stored = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self, status: Option<TaskStatus>) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| status.is_none_or(|wanted| task.status() == wanted))
            .cloned()
            .collect();
        tasks.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| right.id().cmp(&left.id()))
        });
        Ok(tasks)
    }

    async fn count(&self) -> TaskRepositoryResult<u64> {
        let state = self.state.read().map_err(lock_error)?;
        u64::try_from(state.tasks.len()).map_err(TaskRepositoryError::persistence)
    }
}
