//! Given steps for task status BDD scenarios.

use super::world::{TaskStatusWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use warehouse_dispatch::task::services::CreateTaskRequest;

#[given(r#"a task "{task_number}" exists"#)]
fn task_exists(world: &mut TaskStatusWorld, task_number: String) -> Result<(), eyre::Report> {
    let created = run_async(world.service.create(CreateTaskRequest::new(task_number)))
        .wrap_err("create task for status scenario")?;
    world.current_task = Some(created);
    Ok(())
}
