//! Immutable descriptions of filesystem temp resources

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::handle::Handle;
use crate::resource::Resource;

/// The kind of filesystem resource a descriptor creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// A uniquely named directory, removed recursively on release.
    Directory,
    /// A uniquely named empty file, unlinked on release.
    File,
}

impl Kind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable parameters describing what kind of temp resource to create.
///
/// Built once through the fluent constructors and never mutated afterwards.
/// `prefix: None` means "use the provider's configured default prefix".
/// The `cached` flag (default on) controls whether session acquisition
/// consults the session cache; it is not part of descriptor identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Descriptor {
    kind: Kind,
    suffix: String,
    prefix: Option<String>,
    parent: Option<PathBuf>,
    cached: bool,
}

impl Descriptor {
    fn new(kind: Kind) -> Self {
        Self {
            kind,
            suffix: String::new(),
            prefix: None,
            parent: None,
            cached: true,
        }
    }

    /// Describe a temp directory.
    #[must_use]
    pub fn dir() -> Self {
        Self::new(Kind::Directory)
    }

    /// Describe a temp file.
    #[must_use]
    pub fn file() -> Self {
        Self::new(Kind::File)
    }

    /// Set the name suffix (e.g. `".png"`).
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Set the name prefix, overriding the provider's default.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Create under `parent` instead of the system temp directory.
    #[must_use]
    pub fn parent(mut self, parent: impl Into<PathBuf>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Enable or disable session caching for this descriptor.
    #[must_use]
    pub fn cached(mut self, cached: bool) -> Self {
        self.cached = cached;
        self
    }

    /// The kind of resource this descriptor creates.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Stable identity over kind, prefix source, suffix, and parent.
    ///
    /// Debug-formats the optional components so an unset prefix can never
    /// collide with an explicit prefix of any value.
    fn identity(&self) -> String {
        format!(
            "{}:{:?}:{:?}:{:?}",
            self.kind.as_str(),
            self.prefix,
            self.suffix,
            self.parent
        )
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identity())
    }
}

/// Reject name components that would escape the parent directory.
fn validate_component(kind: Kind, field: &str, value: &str) -> Result<()> {
    if value.contains(['/', '\\']) {
        return Err(Error::creation(
            kind,
            format!("{field} must not contain path separators"),
        ));
    }
    Ok(())
}

impl Resource for Descriptor {
    type Handle = Handle;

    fn create(&self, config: &Config) -> Result<Handle> {
        let prefix = self.prefix.as_deref().unwrap_or(&config.default_prefix);
        validate_component(self.kind, "prefix", prefix)?;
        validate_component(self.kind, "suffix", &self.suffix)?;

        let mut builder = tempfile::Builder::new();
        builder.prefix(prefix).suffix(&self.suffix);

        match self.kind {
            Kind::Directory => {
                let dir = match &self.parent {
                    Some(parent) => builder.tempdir_in(parent),
                    None => builder.tempdir(),
                }
                .map_err(|source| {
                    Error::creation_io(self.kind, "could not create a uniquely named directory", source)
                })?;
                tracing::debug!(path = %dir.path().display(), "Created temp directory");
                Ok(Handle::dir(dir))
            }
            Kind::File => {
                let file = match &self.parent {
                    Some(parent) => builder.tempfile_in(parent),
                    None => builder.tempfile(),
                }
                .map_err(|source| {
                    Error::creation_io(self.kind, "could not create a uniquely named file", source)
                })?;
                // Keep only the path; the open descriptor is closed here so
                // the handle never holds a second one alongside the consumer's.
                let path = file.into_temp_path();
                tracing::debug!(path = %path.display(), "Created temp file");
                Ok(Handle::file(path))
            }
        }
    }

    fn cache_key(&self) -> Option<String> {
        self.cached.then(|| self.identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_and_file_have_distinct_keys() {
        let dir = Descriptor::dir().prefix("p").suffix("s");
        let file = Descriptor::file().prefix("p").suffix("s");
        assert_ne!(dir.cache_key(), file.cache_key());
    }

    #[test]
    fn equal_descriptors_share_a_key() {
        let a = Descriptor::dir().prefix("p").suffix(".txt").parent("/tmp");
        let b = Descriptor::dir().prefix("p").suffix(".txt").parent("/tmp");
        assert_eq!(a.cache_key(), b.cache_key());
        assert_eq!(a, b);
    }

    #[test]
    fn unset_prefix_differs_from_explicit_default() {
        let unset = Descriptor::dir();
        let explicit = Descriptor::dir().prefix("tmpnonebot");
        assert_ne!(unset.cache_key(), explicit.cache_key());
    }

    #[test]
    fn uncached_descriptor_has_no_key() {
        let desc = Descriptor::file().cached(false);
        assert!(desc.cache_key().is_none());
    }

    #[test]
    fn cache_flag_does_not_change_identity() {
        let cached = Descriptor::dir().prefix("p");
        let uncached = Descriptor::dir().prefix("p").cached(false);
        assert_eq!(cached.to_string(), uncached.to_string());
    }

    #[test]
    fn display_matches_cache_key() {
        let desc = Descriptor::dir().prefix("p").suffix("s");
        assert_eq!(desc.to_string(), desc.cache_key().unwrap());
    }

    #[test]
    fn separator_in_prefix_is_a_creation_error() {
        let desc = Descriptor::dir().prefix("a/b");
        let err = desc.create(&Config::default()).unwrap_err();
        assert!(err.is_creation());
    }

    #[test]
    fn separator_in_suffix_is_a_creation_error() {
        let desc = Descriptor::file().suffix("a\\b");
        let err = desc.create(&Config::default()).unwrap_err();
        assert!(err.is_creation());
    }
}
