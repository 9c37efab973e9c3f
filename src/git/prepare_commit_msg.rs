/// prepare-commit-msg entry point
///
/// git runs the hook with the message file and, optionally, where the
/// message came from. We only compose when git is about to open the editor
/// on a fresh (or template) message.

use crate::core::{CommitMessageFile, Composer, ProjectResolver, Prompter};
use crate::error::Result;
use std::path::Path;
use tracing::debug;

/// Second argument git passes to prepare-commit-msg
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSource {
    /// No source: a plain `git commit`
    Fresh,
    Template,
    /// `-m` or `-F`
    Message,
    Merge,
    Squash,
    /// `-c`, `-C` or `--amend`
    Commit,
    Other(String),
}

impl MessageSource {
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("") => MessageSource::Fresh,
            Some("template") => MessageSource::Template,
            Some("message") => MessageSource::Message,
            Some("merge") => MessageSource::Merge,
            Some("squash") => MessageSource::Squash,
            Some("commit") => MessageSource::Commit,
            Some(other) => MessageSource::Other(other.to_string()),
        }
    }

    /// Whether the user is about to write a new message
    pub fn wants_composition(&self) -> bool {
        matches!(self, MessageSource::Fresh | MessageSource::Template)
    }
}

/// Compose into `message_file` and write it back if anything was inserted
///
/// # Returns
/// * `Ok(true)` - The file now starts with a composed header
/// * `Ok(false)` - Skipped or aborted; the file is untouched
pub async fn prepare_commit_msg<P, R>(
    composer: &mut Composer<P, R>,
    message_file: &Path,
    source: &MessageSource,
) -> Result<bool>
where
    P: Prompter,
    R: ProjectResolver,
{
    if !source.wants_composition() {
        debug!(?source, "message already supplied, skipping");
        return Ok(false);
    }

    let mut buffer = CommitMessageFile::open(message_file)?;
    let outcome = composer.compose(&mut buffer).await?;
    if !outcome.inserted() {
        return Ok(false);
    }

    let written = buffer.save()?;
    if written {
        debug!(path = %buffer.path().display(), "wrote composed header");
    }
    Ok(written)
}
