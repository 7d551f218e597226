//! RAII handles for filesystem temp resources

use std::fmt;
use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::{TempDir, TempPath};

use crate::descriptor::Kind;
use crate::error::{Error, Result};

/// Clonable RAII handle to a live temp directory or file.
///
/// Clones share one underlying resource; the storage is removed exactly
/// once, when the last clone is released. Removal runs on every exit path
/// of the owning scope, including panics and cancellation. Failures during
/// implicit cleanup are logged at `warn` and swallowed so they never mask
/// the outcome of the consumer's work; use [`Handle::close`] to observe
/// them instead.
#[derive(Clone)]
#[must_use = "dropping the handle removes the underlying storage"]
pub struct Handle {
    inner: Arc<Inner>,
}

enum Inner {
    Dir(Option<TempDir>),
    File(Option<TempPath>),
}

impl Inner {
    fn path(&self) -> &Path {
        match self {
            Self::Dir(slot) => slot.as_ref().expect("handle used after removal").path(),
            Self::File(slot) => slot.as_ref().expect("handle used after removal").as_ref(),
        }
    }

    fn kind(&self) -> Kind {
        match self {
            Self::Dir(_) => Kind::Directory,
            Self::File(_) => Kind::File,
        }
    }

    /// Remove the underlying storage, reporting failures.
    ///
    /// Takes the slot so removal runs at most once; the drop path becomes
    /// a no-op afterwards.
    fn remove(&mut self) -> Result<()> {
        match self {
            Self::Dir(slot) => {
                let Some(dir) = slot.take() else {
                    return Ok(());
                };
                let path = dir.path().to_path_buf();
                dir.close().map_err(|source| Error::Cleanup {
                    path: path.clone(),
                    source,
                })?;
                tracing::debug!(path = %path.display(), "Removed temp directory");
                Ok(())
            }
            Self::File(slot) => {
                let Some(temp) = slot.take() else {
                    return Ok(());
                };
                let path = temp.to_path_buf();
                match temp.close() {
                    Ok(()) => {
                        tracing::debug!(path = %path.display(), "Removed temp file");
                        Ok(())
                    }
                    // The consumer already deleted it; idempotent cleanup.
                    Err(source) if source.kind() == io::ErrorKind::NotFound => {
                        tracing::debug!(path = %path.display(), "Temp file already removed");
                        Ok(())
                    }
                    Err(source) => Err(Error::Cleanup { path, source }),
                }
            }
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Err(err) = self.remove() {
            tracing::warn!(error = %err, "Failed to remove temp resource");
        }
    }
}

impl Handle {
    pub(crate) fn dir(dir: TempDir) -> Self {
        Self {
            inner: Arc::new(Inner::Dir(Some(dir))),
        }
    }

    pub(crate) fn file(path: TempPath) -> Self {
        Self {
            inner: Arc::new(Inner::File(Some(path))),
        }
    }

    /// Path of the live resource.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// The kind of resource this handle owns.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind()
    }

    /// Remove the underlying storage now, observing any failure.
    ///
    /// If other clones of this handle are still live, only this clone is
    /// released and removal is deferred to the last holder; that is not an
    /// error. Removing a file the consumer already deleted is success;
    /// directory removal assumes sole ownership of its subtree and reports
    /// anything that goes wrong.
    pub fn close(self) -> Result<()> {
        match Arc::try_unwrap(self.inner) {
            Ok(mut inner) => inner.remove(),
            Err(_shared) => Ok(()),
        }
    }
}

impl Deref for Handle {
    type Target = Path;

    fn deref(&self) -> &Path {
        self.path()
    }
}

impl AsRef<Path> for Handle {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("kind", &self.kind())
            .field("path", &self.path())
            .finish()
    }
}

/// Owned path snapshot, useful after the handle itself is gone.
impl From<&Handle> for PathBuf {
    fn from(handle: &Handle) -> Self {
        handle.path().to_path_buf()
    }
}
