//! Equipment listing, grouping and ordering.

pub mod finder;
pub mod query;
pub mod service;
pub mod sorter;

pub use finder::{EquipmentFinder, EquipmentGroupVo, EquipmentVo};
pub use query::{EquipmentQuery, ListRequest, QueryError, QueryParams};
pub use service::{EquipmentGroupService, EquipmentService};
pub use sorter::EquipmentSorter;
