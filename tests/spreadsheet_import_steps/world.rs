//! Shared world state for spreadsheet import BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use warehouse_dispatch::{
    import::{
        domain::ImportReport,
        services::{ImportError, SpreadsheetImportService},
    },
    task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService},
};

/// Task service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for spreadsheet import behaviour tests.
pub struct ImportWorld {
    pub tasks: TestTaskService,
    pub importer: SpreadsheetImportService<InMemoryTaskRepository, DefaultClock>,
    pub file: Option<Vec<u8>>,
    pub last_result: Option<Result<ImportReport, ImportError>>,
}

impl ImportWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let tasks = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(DefaultClock),
        );

        Self {
            importer: SpreadsheetImportService::new(tasks.clone()),
            tasks,
            file: None,
            last_result: None,
        }
    }

    /// Returns the report of a successful import.
    ///
    /// # Errors
    ///
    /// Returns an error when no import ran or the import failed.
    pub fn report(&self) -> Result<&ImportReport, eyre::Report> {
        match self.last_result.as_ref() {
            Some(Ok(report)) => Ok(report),
            Some(Err(err)) => Err(eyre::eyre!("import failed: {err}")),
            None => Err(eyre::eyre!("no import has run in this scenario")),
        }
    }
}

impl Default for ImportWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ImportWorld {
    ImportWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
