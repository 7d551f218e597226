//! Acquisition entry points

use crate::config::Config;
use crate::error::Result;
use crate::resource::Resource;
use crate::session::Session;

/// Manufactures temp resources according to its [`Config`].
///
/// The provider holds no mutable state: all sharing lives in per-session
/// caches. Construction reads the host configuration once; later changes
/// to the host's config object are ignored.
#[derive(Debug, Clone)]
pub struct Provider {
    config: Config,
}

impl Provider {
    /// Create a provider with a validated configuration.
    ///
    /// # Errors
    /// Returns a configuration error if `config` is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a provider from the host's configuration object.
    ///
    /// Unknown keys in the object are ignored.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Self::new(Config::from_value(value)?)
    }

    /// The configuration this provider was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Acquire a fresh instance of `resource`.
    ///
    /// The returned handle is the scope: dropping it releases the resource
    /// on every exit path, success or failure.
    pub fn acquire<R: Resource>(&self, resource: &R) -> Result<R::Handle> {
        resource.create(&self.config)
    }

    /// Acquire through `session`, reusing its cached handle when
    /// `resource` has a cache identity.
    ///
    /// The first acquisition for a given cache key creates the resource
    /// and records a clone in the session; later acquisitions with an
    /// equivalent descriptor in the same session receive clones of the
    /// same handle. Resources without a cache key (uncached descriptors,
    /// buffers) are created fresh every call.
    pub fn acquire_in<R>(&self, session: &Session, resource: &R) -> Result<R::Handle>
    where
        R: Resource,
        R::Handle: Clone + Sync,
    {
        match resource.cache_key() {
            Some(key) => session.get_or_try_insert(&key, || resource.create(&self.config)),
            None => resource.create(&self.config),
        }
    }
}

impl Default for Provider {
    fn default() -> Self {
        // The default config carries no separators; it always validates.
        Self {
            config: Config::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Descriptor;
    use crate::error::Error;

    #[test]
    fn acquired_dir_exists_until_drop() {
        let provider = Provider::default();
        let handle = provider.acquire(&Descriptor::dir().prefix("t")).unwrap();
        let path = handle.path().to_path_buf();

        assert!(path.is_dir());
        drop(handle);
        assert!(!path.exists());
    }

    #[test]
    fn default_prefix_shows_up_in_names() {
        let provider = Provider::default();
        let handle = provider.acquire(&Descriptor::file()).unwrap();
        let name = handle.file_name().unwrap().to_string_lossy().into_owned();
        assert!(
            name.starts_with("tmpnonebot"),
            "expected default prefix in {name:?}"
        );
    }

    #[test]
    fn descriptor_prefix_overrides_default() {
        let provider = Provider::new(Config::new("conf")).unwrap();
        let handle = provider
            .acquire(&Descriptor::file().prefix("own"))
            .unwrap();
        let name = handle.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("own"), "expected descriptor prefix in {name:?}");
    }

    #[test]
    fn missing_parent_is_a_creation_error() {
        let provider = Provider::default();
        let result = provider.acquire(
            &Descriptor::dir().parent("/definitely/not/a/real/parent/dir"),
        );
        assert!(matches!(result, Err(Error::Creation { .. })));
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        assert!(Provider::new(Config::new("bad/prefix")).is_err());
    }

    #[test]
    fn provider_from_host_value() {
        let provider = Provider::from_value(serde_json::json!({
            "default_prefix": "hosted",
            "unrelated_host_key": true
        }))
        .unwrap();
        assert_eq!(provider.config().default_prefix, "hosted");
    }
}
