//! Page links for paged theme routes.
//!
//! Paged routes look like `/equipments` (page 1) and
//! `/equipments/page/{n}`.

use equipments_sdk::extension::ListResult;
use serde::Serialize;

const PAGE_SEGMENT: &str = "/page/";

/// A list result plus links to the neighbouring pages.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UrlContextListResult<T> {
    #[serde(flatten)]
    pub list: ListResult<T>,
    pub prev_url: String,
    pub next_url: String,
}

impl<T> UrlContextListResult<T> {
    /// Attach page links computed from the request path. A non-empty
    /// `group` is carried as a query parameter on both links.
    pub fn new(list: ListResult<T>, path: &str, group: Option<&str>) -> Self {
        let next_url = with_group(next_page_url(path, list.total_pages), group);
        let prev_url = with_group(prev_page_url(path), group);
        Self {
            list,
            prev_url,
            next_url,
        }
    }
}

/// Canonical path of `page` under `base`. Page 1 and below map to `base`.
pub fn page_path(base: &str, page: u32) -> String {
    if page <= 1 {
        base.to_string()
    } else {
        format!("{base}{PAGE_SEGMENT}{page}")
    }
}

/// Split `/base/page/{n}` into `("/base", n)`.
fn split_page(path: &str) -> Option<(&str, u64)> {
    let index = path.rfind(PAGE_SEGMENT)?;
    let number = path[index + PAGE_SEGMENT.len()..].parse().ok()?;
    Some((&path[..index], number))
}

/// Link to the page after the one at `path`, clamped to the last page.
pub fn next_page_url(path: &str, total_pages: u64) -> String {
    let last = total_pages.max(1);
    match split_page(path) {
        Some((base, current)) => {
            format!("{base}{PAGE_SEGMENT}{}", current.saturating_add(1).min(last))
        }
        None => {
            let base = path.trim_end_matches('/');
            format!("{base}{PAGE_SEGMENT}{}", 2.min(last))
        }
    }
}

/// Link to the page before the one at `path`. Page 1 has no page suffix.
pub fn prev_page_url(path: &str) -> String {
    match split_page(path) {
        Some((base, current)) => {
            let prev = current.saturating_sub(1).max(1);
            if prev == 1 {
                if base.is_empty() { "/".to_string() } else { base.to_string() }
            } else {
                format!("{base}{PAGE_SEGMENT}{prev}")
            }
        }
        None => path.to_string(),
    }
}

/// Append `?group=...` when a group is given.
pub fn with_group(url: String, group: Option<&str>) -> String {
    match group.filter(|g| !g.trim().is_empty()) {
        Some(group) => format!("{url}?group={}", urlencoding::encode(group)),
        None => url,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn next_from_unpaged_path() {
        assert_eq!(next_page_url("/equipments", 3), "/equipments/page/2");
        assert_eq!(next_page_url("/equipments", 1), "/equipments/page/1");
        assert_eq!(next_page_url("/equipments", 0), "/equipments/page/1");
    }

    #[test]
    fn next_from_paged_path_is_clamped() {
        assert_eq!(next_page_url("/equipments/page/2", 3), "/equipments/page/3");
        assert_eq!(next_page_url("/equipments/page/3", 3), "/equipments/page/3");
        assert_eq!(next_page_url("/equipments/page/9", 3), "/equipments/page/3");
    }

    #[test]
    fn prev_links() {
        assert_eq!(prev_page_url("/equipments/page/3"), "/equipments/page/2");
        assert_eq!(prev_page_url("/equipments/page/2"), "/equipments");
        assert_eq!(prev_page_url("/equipments/page/1"), "/equipments");
        assert_eq!(prev_page_url("/equipments"), "/equipments");
    }

    #[test]
    fn page_path_is_canonical() {
        assert_eq!(page_path("/equipments", 0), "/equipments");
        assert_eq!(page_path("/equipments", 1), "/equipments");
        assert_eq!(page_path("/equipments", 4), "/equipments/page/4");
    }

    #[test]
    fn links_from_canonical_path_of_fallback_page() {
        // `/equipments/page/abc` and `/equipments/page/0` both render page 1.
        let path = page_path("/equipments", 1);
        assert_eq!(next_page_url(&path, 3), "/equipments/page/2");
        assert_eq!(prev_page_url(&path), "/equipments");
    }

    #[test]
    fn group_is_encoded() {
        assert_eq!(
            with_group("/equipments/page/2".into(), Some("my desk")),
            "/equipments/page/2?group=my%20desk"
        );
        assert_eq!(with_group("/equipments".into(), Some(" ")), "/equipments");
        assert_eq!(with_group("/equipments".into(), None), "/equipments");
    }

    #[test]
    fn url_context_flattens_list() {
        let list = ListResult::paginate((1..=25).collect::<Vec<u32>>(), 1, 10);
        let page = UrlContextListResult::new(list, "/equipments", Some("desk"));
        assert_eq!(page.next_url, "/equipments/page/2?group=desk");
        assert_eq!(page.prev_url, "/equipments?group=desk");

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["nextUrl"], "/equipments/page/2?group=desk");
        assert_eq!(json["items"].as_array().unwrap().len(), 10);
    }
}
