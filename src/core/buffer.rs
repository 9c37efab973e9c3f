/// Target buffers for composed messages
///
/// A buffer has an insertion point and a modified flag. The composer inserts
/// and flips the flag; whoever owns the buffer decides what "modified" means
/// (for a git message file: write it back).

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub trait MessageBuffer {
    /// Insert at the insertion point, leaving it after the inserted text
    fn insert(&mut self, text: &str) -> Result<()>;

    fn set_modified(&mut self, modified: bool);

    fn is_modified(&self) -> bool;
}

/// In-memory buffer
#[derive(Debug, Default, Clone)]
pub struct StringBuffer {
    content: String,
    cursor: usize,
    modified: bool,
}

impl StringBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing text with the insertion point at its start
    pub fn with_content<S: Into<String>>(content: S) -> Self {
        Self {
            content: content.into(),
            cursor: 0,
            modified: false,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl MessageBuffer for StringBuffer {
    fn insert(&mut self, text: &str) -> Result<()> {
        self.content.insert_str(self.cursor, text);
        self.cursor += text.len();
        Ok(())
    }

    fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    fn is_modified(&self) -> bool {
        self.modified
    }
}

/// git's COMMIT_EDITMSG (or whatever file the hook was handed)
///
/// Text goes in above whatever git already put there (comments, template,
/// status). The file is only rewritten when the buffer was marked modified,
/// so git's "message unchanged from template" check sees real content.
#[derive(Debug)]
pub struct CommitMessageFile {
    path: PathBuf,
    buffer: StringBuffer,
}

impl CommitMessageFile {
    /// Load the file; a missing file is an empty buffer
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = if path.exists() {
            fs::read_to_string(&path)?
        } else {
            String::new()
        };

        Ok(Self {
            path,
            buffer: StringBuffer::with_content(content),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        self.buffer.content()
    }

    /// Write back if modified
    ///
    /// # Returns
    /// * `Ok(true)` - The file was written
    /// * `Ok(false)` - Nothing to write
    pub fn save(&mut self) -> Result<bool> {
        if !self.buffer.is_modified() {
            return Ok(false);
        }

        fs::write(&self.path, self.buffer.content())?;
        self.buffer.set_modified(false);
        Ok(true)
    }
}

impl MessageBuffer for CommitMessageFile {
    fn insert(&mut self, text: &str) -> Result<()> {
        self.buffer.insert(text)
    }

    fn set_modified(&mut self, modified: bool) {
        self.buffer.set_modified(modified);
    }

    fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }
}
