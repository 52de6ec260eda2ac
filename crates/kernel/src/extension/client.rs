//! Typed access to stored resources.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::Utc;
use equipments_sdk::extension::{Extension, ListResult, Scheme};
use equipments_sdk::validate::Validate;
use tracing::{debug, warn};

use super::{ExtensionError, ExtensionStore, SchemeManager};

const NAME_SUFFIX_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const NAME_SUFFIX_LEN: usize = 5;

/// Client for reading and writing resources of any registered kind.
///
/// Clone is cheap; all clones share the store and scheme registry.
#[derive(Clone)]
pub struct ExtensionClient {
    store: Arc<dyn ExtensionStore>,
    schemes: SchemeManager,
}

impl ExtensionClient {
    pub fn new(store: Arc<dyn ExtensionStore>, schemes: SchemeManager) -> Self {
        Self { store, schemes }
    }

    pub fn store(&self) -> &Arc<dyn ExtensionStore> {
        &self.store
    }

    fn scheme_for<T: Extension>(&self) -> Result<Scheme, ExtensionError> {
        self.schemes
            .get(T::KIND)
            .ok_or_else(|| ExtensionError::SchemeNotFound(T::KIND.to_string()))
    }

    /// Fetch a resource by name. Returns `None` if it doesn't exist.
    pub async fn fetch<T: Extension>(&self, name: &str) -> Result<Option<T>, ExtensionError> {
        self.scheme_for::<T>()?;
        match self.store.load(T::KIND, name).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Fetch a resource by name, failing with `NotFound` if it is absent.
    pub async fn get<T: Extension>(&self, name: &str) -> Result<T, ExtensionError> {
        self.fetch(name)
            .await?
            .ok_or_else(|| ExtensionError::not_found(T::KIND, name))
    }

    /// List every resource of a kind matching `predicate`, sorted with
    /// `comparator`. The sort is stable over name order.
    pub async fn list<T, P, C>(&self, predicate: P, comparator: C) -> Result<Vec<T>, ExtensionError>
    where
        T: Extension,
        P: Fn(&T) -> bool,
        C: Fn(&T, &T) -> Ordering,
    {
        self.scheme_for::<T>()?;
        let documents = self.store.list(T::KIND).await?;

        let mut items: Vec<T> = documents
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<T>(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(kind = T::KIND, error = %e, "skipping undecodable resource");
                    None
                }
            })
            .filter(|item| predicate(item))
            .collect();
        items.sort_by(|a, b| comparator(a, b));
        Ok(items)
    }

    /// Like [`list`](Self::list), sliced into one page.
    pub async fn list_page<T, P, C>(
        &self,
        predicate: P,
        comparator: C,
        page: u32,
        size: u32,
    ) -> Result<ListResult<T>, ExtensionError>
    where
        T: Extension,
        P: Fn(&T) -> bool,
        C: Fn(&T, &T) -> Ordering,
    {
        let items = self.list(predicate, comparator).await?;
        Ok(ListResult::paginate(items, page, size))
    }

    /// Create a resource.
    ///
    /// Resolves `generateName`, assigns version 1 and the creation
    /// timestamp, then validates before storing.
    pub async fn create<T: Extension + Validate>(&self, mut resource: T) -> Result<T, ExtensionError> {
        let scheme = self.scheme_for::<T>()?;
        resource.set_api_version(scheme.api_version());

        let metadata = resource.metadata_mut();
        if metadata.name.is_empty()
            && let Some(prefix) = metadata.generate_name.as_deref().filter(|p| !p.is_empty())
        {
            metadata.name = format!("{prefix}{}", random_suffix());
        }
        metadata.version = Some(1);
        metadata.creation_timestamp = Some(Utc::now());
        metadata.deletion_timestamp = None;

        resource.validate()?;

        let name = resource.name().to_string();
        let value = serde_json::to_value(&resource)?;
        if !self.store.insert(T::KIND, &name, value).await? {
            return Err(ExtensionError::AlreadyExists {
                kind: T::KIND.to_string(),
                name,
            });
        }

        debug!(kind = T::KIND, name = %name, "created resource");
        Ok(resource)
    }

    /// Update a resource.
    ///
    /// The submitted `metadata.version` must equal the stored one.
    pub async fn update<T: Extension + Validate>(&self, mut resource: T) -> Result<T, ExtensionError> {
        let scheme = self.scheme_for::<T>()?;
        let name = resource.name().to_string();
        let existing: T = self.get(&name).await?;

        let conflict = || ExtensionError::Conflict {
            kind: T::KIND.to_string(),
            name: name.clone(),
        };

        let expected = resource.metadata().version.ok_or_else(conflict)?;
        if existing.metadata().version != Some(expected) {
            return Err(conflict());
        }

        resource.set_api_version(scheme.api_version());
        let metadata = resource.metadata_mut();
        metadata.version = Some(expected + 1);
        metadata.creation_timestamp = existing.metadata().creation_timestamp;
        metadata.deletion_timestamp = None;

        resource.validate()?;

        let value = serde_json::to_value(&resource)?;
        if !self.store.replace(T::KIND, &name, expected, value).await? {
            return Err(conflict());
        }

        debug!(kind = T::KIND, name = %name, version = expected + 1, "updated resource");
        Ok(resource)
    }

    /// Delete a resource by name, returning it with `deletionTimestamp` set.
    pub async fn delete<T: Extension>(&self, name: &str) -> Result<T, ExtensionError> {
        let mut resource: T = self.get(name).await?;
        if !self.store.remove(T::KIND, name).await? {
            return Err(ExtensionError::not_found(T::KIND, name));
        }

        resource.metadata_mut().deletion_timestamp = Some(Utc::now());
        debug!(kind = T::KIND, name = %name, "deleted resource");
        Ok(resource)
    }
}

fn random_suffix() -> String {
    let bytes: [u8; NAME_SUFFIX_LEN] = rand::random();
    bytes
        .iter()
        .map(|b| NAME_SUFFIX_CHARS[usize::from(*b) % NAME_SUFFIX_CHARS.len()] as char)
        .collect()
}
