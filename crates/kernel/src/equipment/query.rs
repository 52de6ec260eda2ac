//! List query parameters.

use equipments_sdk::equipment::Equipment;
use equipments_sdk::extension::Extension;
use thiserror::Error;

use super::sorter::{EquipmentSorter, equipment_comparator};
use crate::extension::{SelectorError, Selectors};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("query parameter {param} must be a non-negative integer, got \"{value}\"")]
    InvalidNumber { param: &'static str, value: String },

    #[error(transparent)]
    Selector(#[from] SelectorError),
}

/// Raw query string pairs, in request order. Keys may repeat.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value for `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First non-blank value for `key`.
    pub fn text(&self, key: &str) -> Option<String> {
        self.first(key)
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
    }

    /// Every value for `key`.
    pub fn all(&self, key: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }

    fn number(&self, key: &'static str) -> Result<u32, QueryError> {
        match self.first(key).map(str::trim) {
            None | Some("") => Ok(0),
            Some(raw) => raw.parse().map_err(|_| QueryError::InvalidNumber {
                param: key,
                value: raw.to_string(),
            }),
        }
    }
}

/// Paging and selectors shared by every list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    /// 1-based; 0 means unspecified.
    pub page: u32,
    /// 0 means unpaged.
    pub size: u32,
    pub selectors: Selectors,
}

impl ListRequest {
    pub fn from_params(params: &QueryParams) -> Result<Self, QueryError> {
        Ok(Self {
            page: params.number("page")?,
            size: params.number("size")?,
            selectors: Selectors::parse(
                &params.all("labelSelector"),
                &params.all("fieldSelector"),
            )?,
        })
    }
}

/// Query accepted by the equipment list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentQuery {
    pub list: ListRequest,
    /// Case-insensitive substring of `spec.displayName`.
    pub keyword: Option<String>,
    /// Exact `spec.groupName`.
    pub group: Option<String>,
    pub sort: Option<EquipmentSorter>,
    /// `Some(true)` for ascending.
    pub sort_order: Option<bool>,
}

impl EquipmentQuery {
    pub fn from_params(params: &QueryParams) -> Result<Self, QueryError> {
        Ok(Self {
            list: ListRequest::from_params(params)?,
            keyword: params.text("keyword"),
            group: params.text("group"),
            sort: params.text("sort").and_then(|s| EquipmentSorter::parse(&s)),
            sort_order: params
                .text("sortOrder")
                .map(|s| s.trim().eq_ignore_ascii_case("true")),
        })
    }

    /// True if the equipment passes keyword, group and selector filters.
    pub fn matches(&self, equipment: &Equipment) -> bool {
        if let Some(keyword) = &self.keyword
            && !equipment
                .spec
                .display_name
                .to_lowercase()
                .contains(&keyword.to_lowercase())
        {
            return false;
        }
        if let Some(group) = &self.group
            && &equipment.spec.group_name != group
        {
            return false;
        }
        !equipment.metadata().is_deleted() && self.list.selectors.matches(equipment)
    }

    pub fn comparator(&self) -> impl Fn(&Equipment, &Equipment) -> std::cmp::Ordering + use<> {
        equipment_comparator(self.sort, self.sort_order)
    }
}
