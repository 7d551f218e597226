//! The seam between resource descriptions and the provider

use crate::config::Config;
use crate::error::Result;

/// A description the provider can manufacture a live resource from.
///
/// Implementors decide what a handle is: filesystem descriptors produce
/// RAII path handles, buffer sources hand out the buffer value itself.
/// Creation may block on local filesystem I/O but never coordinates with
/// other sessions beyond the platform's atomic temp-name generation.
pub trait Resource {
    /// The live value handed to the consumer.
    type Handle: Send + 'static;

    /// Manufacture a fresh instance.
    ///
    /// # Errors
    /// Returns [`Error::Creation`](crate::Error::Creation) if the
    /// underlying storage cannot be allocated; the consumer's scope never
    /// starts in that case.
    fn create(&self, config: &Config) -> Result<Self::Handle>;

    /// Identity used for session caching.
    ///
    /// `None` opts out of caching entirely: every acquisition, session or
    /// not, creates a fresh instance. Two descriptions with equal keys are
    /// treated as requests for the same resource within a session.
    fn cache_key(&self) -> Option<String> {
        None
    }
}
