//! When steps for task status BDD scenarios.

use super::world::{TaskStatusWorld, run_async};
use rstest_bdd_macros::when;
use warehouse_dispatch::task::services::{CreateTaskRequest, SetTaskStatusRequest};

#[when(r#"a task "{task_number}" is created"#)]
fn create_task(world: &mut TaskStatusWorld, task_number: String) {
    let result = run_async(world.service.create(CreateTaskRequest::new(task_number)));
    if let Ok(ref created) = result {
        world.current_task = Some(created.clone());
    }
    world.last_create_result = Some(result);
}

#[when(r#"the task status is set to "{status}""#)]
fn set_task_status(world: &mut TaskStatusWorld, status: String) -> Result<(), eyre::Report> {
    let task_id = world.current_task()?.id();

    let result = run_async(
        world
            .service
            .set_status(SetTaskStatusRequest::new(task_id, status)),
    );
    if let Ok(ref updated) = result {
        world.current_task = Some(updated.clone());
    }
    world.last_status_result = Some(result);
    Ok(())
}
