//! Operation execution for fscli
//!
//! The executor takes a parsed [`Operation`] and produces an
//! [`ExecutionResult`] for the formatter:
//! - metacommands act on the session (`\pager`) or list collections (`\d`)
//! - data operations are returned as their typed plan; mapping them onto
//!   store-native queries belongs to the store backend

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::error::Result;
use crate::parser::{ListCollectionsCommand, Operation, PagerCommand};
use crate::repl::SharedState;
use crate::store::CollectionLister;

/// Result of one executed operation
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    /// Result data
    pub data: ResultData,

    /// Execution time in milliseconds
    pub execution_time_ms: u64,
}

/// Data returned from execution
#[derive(Debug, Clone, PartialEq)]
pub enum ResultData {
    /// Typed plan of a data operation
    Plan(Operation),

    /// List of names
    List(Vec<String>),

    /// Text message
    Message(String),
}

/// Dispatches operations
pub struct Executor {
    /// Session state touched by metacommands
    shared_state: SharedState,

    /// Source for `\d`
    lister: Arc<dyn CollectionLister>,
}

impl Executor {
    /// Create a new executor
    ///
    /// # Arguments
    /// * `shared_state` - Session state shared with the REPL
    /// * `lister` - Collection source used by `\d`
    pub fn new(shared_state: SharedState, lister: Arc<dyn CollectionLister>) -> Self {
        Self {
            shared_state,
            lister,
        }
    }

    /// Execute one operation
    ///
    /// # Arguments
    /// * `operation` - Parsed operation
    ///
    /// # Returns
    /// * `Result<ExecutionResult>` - Result data, or the store error for `\d`
    pub async fn execute(&self, operation: Operation) -> Result<ExecutionResult> {
        let start = Instant::now();
        debug!(operation = operation.name(), "executing");

        let data = match operation {
            Operation::Pager(cmd) => self.set_pager(cmd),
            Operation::ListCollections(cmd) => self.list_collections(cmd).await?,
            plan @ (Operation::Query(_) | Operation::Get(_) | Operation::Count(_)) => {
                ResultData::Plan(plan)
            }
        };

        Ok(ExecutionResult {
            data,
            execution_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn set_pager(&self, cmd: PagerCommand) -> ResultData {
        self.shared_state.set_pager_enabled(cmd.enabled);
        let state = if cmd.enabled { "on" } else { "off" };
        ResultData::Message(format!("Pager is {state}"))
    }

    async fn list_collections(&self, cmd: ListCollectionsCommand) -> Result<ResultData> {
        let mut names = self
            .lister
            .list_child_collections(&cmd.base_document_path)
            .await?;
        names.sort();
        Ok(ResultData::List(names))
    }
}
