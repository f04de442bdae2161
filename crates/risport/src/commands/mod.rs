//! Command dispatch: bridges CLI args -> RisPort70 queries -> output formatting.

pub mod catalog;
pub mod config_cmd;
pub mod cti;
pub mod devices;
pub mod util;

use risport_api::{Error as ApiError, QueryResult, RisClient};
use tokio_util::sync::CancellationToken;

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::config::Resolved;
use crate::error::CliError;

/// A connected client plus the context shared by query commands.
pub struct Session {
    pub client: RisClient,
    pub cancel: CancellationToken,
    pub resolved: Resolved,
}

impl Session {
    /// The client to query with, pinned to `affinity` when given.
    pub fn client_for(&self, affinity: Option<&str>) -> RisClient {
        match affinity {
            Some(token) => self.client.pinned_to(token),
            None => self.client.clone(),
        }
    }

    /// Translate a query failure with this session's context.
    pub fn api_error(&self, err: ApiError) -> CliError {
        CliError::from_api(
            err,
            self.client.endpoint().as_str(),
            &self.resolved.profile_name,
            self.resolved.timeout_secs,
        )
    }
}

/// Dispatch a node-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(session, args, global).await,
        Command::Cti(args) => cti::handle(session, args, global).await,
        Command::Models(_)
        | Command::StatusReasons
        | Command::Config(_)
        | Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "does not query a node".into(),
        }),
    }
}

/// Tell an interactive user which affinity token to pass on the next poll.
fn report_session_token(result: &QueryResult, global: &GlobalOpts) {
    let Some(ref token) = result.session_token else {
        return;
    };
    tracing::debug!(token = %token, "node offered session affinity");
    if !global.quiet && global.output == OutputFormat::Table {
        eprintln!("session affinity: --affinity '{token}'");
    }
}
