//! The generic resource envelope.
//!
//! Every managed resource carries `apiVersion`, `kind`, `metadata` and a
//! `spec` (some also a `status`). This module holds the parts shared by all
//! kinds: [`Metadata`], the [`Scheme`] a kind is registered under, the
//! [`Extension`] trait implemented by each kind, and the paged
//! [`ListResult`] envelope returned by list endpoints.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// API group for resources contributed by this plugin.
pub const CORE_GROUP: &str = "core.halo.run";

/// API version for resources contributed by this plugin.
pub const CORE_VERSION: &str = "v1alpha1";

/// Identity and bookkeeping shared by every resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Unique name within the kind. May be empty on create when
    /// `generate_name` is set.
    pub name: String,

    /// Prefix used by the server to generate a name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,

    /// Optimistic-concurrency token, assigned by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_timestamp: Option<DateTime<Utc>>,
}

impl Metadata {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Look up a label value.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .as_ref()
            .and_then(|labels| labels.get(key))
            .map(String::as_str)
    }

    /// True once the server has marked the resource deleted.
    pub fn is_deleted(&self) -> bool {
        self.deletion_timestamp.is_some()
    }
}

/// Group/version/kind registration for a resource kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Scheme {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub plural: String,
    pub singular: String,
}

impl Scheme {
    /// `group/version`, as carried in `apiVersion`.
    pub fn api_version(&self) -> String {
        format!("{}/{}", self.group, self.version)
    }
}

/// A resource kind stored by the kernel.
pub trait Extension: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const GROUP: &'static str = CORE_GROUP;
    const VERSION: &'static str = CORE_VERSION;
    const KIND: &'static str;
    const PLURAL: &'static str;
    const SINGULAR: &'static str;

    fn scheme() -> Scheme {
        Scheme {
            group: Self::GROUP.to_string(),
            version: Self::VERSION.to_string(),
            kind: Self::KIND.to_string(),
            plural: Self::PLURAL.to_string(),
            singular: Self::SINGULAR.to_string(),
        }
    }

    fn api_version(&self) -> &str;
    fn set_api_version(&mut self, api_version: String);
    fn metadata(&self) -> &Metadata;
    fn metadata_mut(&mut self) -> &mut Metadata;

    fn name(&self) -> &str {
        &self.metadata().name
    }
}

/// One page of a list, with the page metadata computed by the server.
///
/// Derived fields (`totalPages`, `first`, `last`, `hasNext`, `hasPrevious`)
/// are always recomputed from `page`, `size` and `total`, including when
/// decoding, so a decoded value is internally consistent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(
    rename_all = "camelCase",
    from = "ListResultWire<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct ListResult<T> {
    /// Requested page, 1-based. 0 means "not specified".
    pub page: u32,
    /// Requested page size. 0 means unpaged.
    pub size: u32,
    /// Number of items matching the query across all pages.
    pub total: u64,
    pub total_pages: u64,
    pub items: Vec<T>,
    pub first: bool,
    pub last: bool,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> ListResult<T> {
    /// Build a page from already-sliced items.
    pub fn new(page: u32, size: u32, total: u64, items: Vec<T>) -> Self {
        let total_pages = if size == 0 {
            1
        } else {
            total.div_ceil(u64::from(size))
        };
        let has_previous = page > 1;
        let has_next = u64::from(page.max(1)) < total_pages;

        Self {
            page,
            size,
            total,
            total_pages,
            items,
            first: !has_previous,
            last: !has_next,
            has_next,
            has_previous,
        }
    }

    /// Slice a full, already-ordered result set into the requested page.
    ///
    /// Page numbers below 1 slice as page 1; size 0 returns everything.
    pub fn paginate(all: Vec<T>, page: u32, size: u32) -> Self {
        let total = all.len() as u64;
        if size == 0 {
            return Self::new(page, size, total, all);
        }

        let size_usize = size as usize;
        let start = (page.max(1) as usize - 1).saturating_mul(size_usize);
        let items = all.into_iter().skip(start).take(size_usize).collect();
        Self::new(page, size, total, items)
    }

    /// An empty page.
    pub fn empty(page: u32, size: u32) -> Self {
        Self::new(page, size, 0, Vec::new())
    }

    /// Convert the items, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListResult<U> {
        ListResult {
            page: self.page,
            size: self.size,
            total: self.total,
            total_pages: self.total_pages,
            items: self.items.into_iter().map(f).collect(),
            first: self.first,
            last: self.last,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

/// Wire shape accepted when decoding; derived fields are ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResultWire<T> {
    #[serde(default)]
    page: u32,
    #[serde(default)]
    size: u32,
    total: u64,
    items: Vec<T>,
}

impl<T> From<ListResultWire<T>> for ListResult<T> {
    fn from(wire: ListResultWire<T>) -> Self {
        Self::new(wire.page, wire.size, wire.total, wire.items)
    }
}
