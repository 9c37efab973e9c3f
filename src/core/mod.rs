/// Core functionality modules
///
/// Contains the scope cache, project detection, and the interactive
/// message composer with its prompt and buffer seams.

pub mod buffer;
pub mod composer;
pub mod project_detector;
pub mod prompt;
pub mod scope_store;

pub use buffer::{CommitMessageFile, MessageBuffer, StringBuffer};
pub use composer::{Composer, Composition};
pub use project_detector::{CwdProjectResolver, FixedProject, ProjectDetector, ProjectResolver};
pub use prompt::{CandidateCompletion, Prompter, ScriptedPrompter, TerminalPrompter};
pub use scope_store::ScopeStore;
