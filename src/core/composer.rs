/// Runs one composition session: summary, type, scope, then insert.
///
/// The scope cache is a convenience. Anything the store throws at us gets
/// logged and the message still goes out.

use crate::core::buffer::MessageBuffer;
use crate::core::project_detector::ProjectResolver;
use crate::core::prompt::Prompter;
use crate::core::scope_store::ScopeStore;
use crate::db::{CommitType, ComposedMessage};
use crate::error::Result;
use std::sync::Arc;
use tracing::{debug, warn};

pub const SUMMARY_PROMPT: &str = "Summary";
pub const TYPE_PROMPT: &str = "Type";
pub const SCOPE_PROMPT: &str = "Scope";

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composition {
    /// Empty summary (whitespace-only counts as empty). Nothing was asked,
    /// saved or inserted after that.
    Aborted,
    Inserted(ComposedMessage),
}

impl Composition {
    /// The flag the host uses to mark its buffer as modified
    pub fn inserted(&self) -> bool {
        matches!(self, Composition::Inserted(_))
    }

    pub fn message(&self) -> Option<&ComposedMessage> {
        match self {
            Composition::Inserted(message) => Some(message),
            Composition::Aborted => None,
        }
    }
}

pub struct Composer<P, R> {
    store: Arc<ScopeStore>,
    prompter: P,
    resolver: R,
}

impl<P: Prompter, R: ProjectResolver> Composer<P, R> {
    pub fn new(store: Arc<ScopeStore>, prompter: P, resolver: R) -> Self {
        Self {
            store,
            prompter,
            resolver,
        }
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Run a session and insert the result into `buffer`
    pub async fn compose(&mut self, buffer: &mut dyn MessageBuffer) -> Result<Composition> {
        let summary = self.prompter.ask(SUMMARY_PROMPT, &[])?;
        if summary.trim().is_empty() {
            debug!("empty summary, nothing to compose");
            return Ok(Composition::Aborted);
        }

        let project = match self.resolver.resolve() {
            Ok(project) => Some(project),
            Err(e) => {
                warn!("{}; scopes will not be cached", e.user_message());
                None
            }
        };

        let commit_type = self.prompter.ask(TYPE_PROMPT, &CommitType::candidates())?;

        let candidates = match &project {
            Some(project) => self.store.scopes_for_project(project).await,
            None => Vec::new(),
        };
        let scope = self.prompter.ask(SCOPE_PROMPT, &candidates)?;

        if let Some(project) = &project {
            if let Err(e) = self.store.save_scope(project, &scope).await {
                self.store.warn_once(&e);
            }
        }

        let message = ComposedMessage {
            commit_type,
            scope,
            summary,
        };
        buffer.insert(&message.render())?;
        buffer.set_modified(true);

        debug!(project = ?project, header = %message.render().trim_end(), "composed message");
        Ok(Composition::Inserted(message))
    }
}
