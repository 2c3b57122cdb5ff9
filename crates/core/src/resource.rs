use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use crate::{ResourceError, Result};

/// Addressable, re-readable source of raw script text.
pub trait LoadableResource: fmt::Debug + Send + Sync {
    fn location(&self) -> &str;

    fn read(&self) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResource {
    path: PathBuf,
    location: String,
}

impl FileResource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = path.display().to_string();
        Self { path, location }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LoadableResource for FileResource {
    fn location(&self) -> &str {
        &self.location
    }

    fn read(&self) -> Result<String> {
        let text = fs::read_to_string(&self.path).map_err(|source| ResourceError::Read {
            location: self.location.clone(),
            source: source.into(),
        })?;
        Ok(strip_byte_order_mark(text))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringResource {
    location: String,
    text: String,
}

impl StringResource {
    #[must_use]
    pub fn new(location: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            text: text.into(),
        }
    }
}

impl LoadableResource for StringResource {
    fn location(&self) -> &str {
        &self.location
    }

    fn read(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}

fn strip_byte_order_mark(text: String) -> String {
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}
