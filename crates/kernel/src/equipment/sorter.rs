//! Orderings for equipment and group lists.

use std::cmp::Ordering;

use equipments_sdk::equipment::{Equipment, EquipmentGroup};

/// Sort key accepted by the `sort` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentSorter {
    DisplayName,
    CreateTime,
}

impl EquipmentSorter {
    /// Parse `DISPLAY_NAME` or `CREATE_TIME`, ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("DISPLAY_NAME") {
            Some(Self::DisplayName)
        } else if raw.eq_ignore_ascii_case("CREATE_TIME") {
            Some(Self::CreateTime)
        } else {
            None
        }
    }

    /// Ascending comparison, ties broken by name.
    pub fn ascending(self, a: &Equipment, b: &Equipment) -> Ordering {
        let primary = match self {
            Self::DisplayName => a.spec.display_name.cmp(&b.spec.display_name),
            Self::CreateTime => a
                .metadata
                .creation_timestamp
                .cmp(&b.metadata.creation_timestamp),
        };
        primary.then_with(|| a.metadata.name.cmp(&b.metadata.name))
    }
}

/// Comparator for the equipment list endpoint.
///
/// No sort key means creation time. Only `sort_order == Some(true)` sorts
/// ascending; anything else is descending.
pub fn equipment_comparator(
    sort: Option<EquipmentSorter>,
    sort_order: Option<bool>,
) -> impl Fn(&Equipment, &Equipment) -> Ordering {
    let sorter = sort.unwrap_or(EquipmentSorter::CreateTime);
    let ascending = sort_order == Some(true);
    move |a, b| {
        let ordering = sorter.ascending(a, b);
        if ascending { ordering } else { ordering.reverse() }
    }
}

/// Display order: priority ascending (unset first), newest first, then name.
pub fn default_equipment_order(a: &Equipment, b: &Equipment) -> Ordering {
    a.spec
        .priority
        .cmp(&b.spec.priority)
        .then_with(|| {
            b.metadata
                .creation_timestamp
                .cmp(&a.metadata.creation_timestamp)
        })
        .then_with(|| a.metadata.name.cmp(&b.metadata.name))
}

/// Group order: priority ascending (unset first), oldest first, then name.
pub fn group_order(a: &EquipmentGroup, b: &EquipmentGroup) -> Ordering {
    a.spec
        .priority
        .cmp(&b.spec.priority)
        .then_with(|| {
            a.metadata
                .creation_timestamp
                .cmp(&b.metadata.creation_timestamp)
        })
        .then_with(|| a.metadata.name.cmp(&b.metadata.name))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use equipments_sdk::equipment::EquipmentSpec;

    fn item(name: &str, display: &str, age_minutes: Option<i64>, priority: Option<i32>) -> Equipment {
        let mut e = Equipment::new(name, EquipmentSpec::new(display, "https://x", "g"));
        e.metadata.creation_timestamp = age_minutes.map(|m| Utc::now() - Duration::minutes(m));
        e.spec.priority = priority;
        e
    }

    fn sorted(mut items: Vec<Equipment>, cmp: impl Fn(&Equipment, &Equipment) -> Ordering) -> Vec<String> {
        items.sort_by(cmp);
        items.into_iter().map(|e| e.metadata.name).collect()
    }

    #[test]
    fn parse_ignores_case() {
        assert_eq!(EquipmentSorter::parse("display_name"), Some(EquipmentSorter::DisplayName));
        assert_eq!(EquipmentSorter::parse("Create_Time"), Some(EquipmentSorter::CreateTime));
        assert_eq!(EquipmentSorter::parse("name"), None);
    }

    #[test]
    fn default_is_newest_first() {
        let items = vec![
            item("old", "A", Some(30), None),
            item("new", "B", Some(1), None),
            item("none", "C", None, None),
        ];
        assert_eq!(sorted(items, equipment_comparator(None, None)), vec!["new", "old", "none"]);
    }

    #[test]
    fn create_time_ascending_puts_unset_first() {
        let items = vec![
            item("new", "B", Some(1), None),
            item("none", "C", None, None),
            item("old", "A", Some(30), None),
        ];
        assert_eq!(
            sorted(items, equipment_comparator(Some(EquipmentSorter::CreateTime), Some(true))),
            vec!["none", "old", "new"]
        );
    }

    #[test]
    fn display_name_both_orders() {
        let items = || {
            vec![
                item("b", "Beta", Some(1), None),
                item("a2", "Alpha", Some(2), None),
                item("a1", "Alpha", Some(3), None),
            ]
        };
        assert_eq!(
            sorted(items(), equipment_comparator(Some(EquipmentSorter::DisplayName), Some(true))),
            vec!["a1", "a2", "b"]
        );
        assert_eq!(
            sorted(items(), equipment_comparator(Some(EquipmentSorter::DisplayName), Some(false))),
            vec!["b", "a2", "a1"]
        );
    }

    #[test]
    fn default_order_uses_priority_then_newest() {
        let items = vec![
            item("p2", "A", Some(5), Some(2)),
            item("p1-old", "B", Some(10), Some(1)),
            item("p1-new", "C", Some(1), Some(1)),
            item("unset", "D", Some(1), None),
        ];
        assert_eq!(
            sorted(items, default_equipment_order),
            vec!["unset", "p1-new", "p1-old", "p2"]
        );
    }

    #[test]
    fn group_order_is_oldest_first_within_priority() {
        let mut old = EquipmentGroup::new("old", "Old");
        old.metadata.creation_timestamp = Some(Utc::now() - Duration::hours(1));
        let mut new = EquipmentGroup::new("new", "New");
        new.metadata.creation_timestamp = Some(Utc::now());
        let mut first = EquipmentGroup::new("zzz", "Z");
        first.spec.priority = Some(0);

        let mut groups = vec![first, new, old];
        groups.sort_by(group_order);
        let names: Vec<_> = groups.iter().map(|g| g.metadata.name.as_str()).collect();
        assert_eq!(names, vec!["old", "new", "zzz"]);
    }
}
