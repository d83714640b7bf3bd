//! Resource catalog with sort-then-binary-search lookup.
//!
//! Resources are stored in insertion order. Every lookup sorts a working copy
//! by the requested key and binary-searches it for the full run of entries
//! sharing that key, so the catalog never has to stay sorted.

use std::cmp::Ordering;

use crate::error::{CoreError, Result};
use crate::models::Resource;
use crate::validation::normalize_key;

/// Flat collection of community resources.
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    resources: Vec<Resource>,
}

impl ResourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from persisted resources, rejecting duplicates.
    pub fn from_resources(resources: impl IntoIterator<Item = Resource>) -> Result<Self> {
        let mut catalog = Self::new();
        for resource in resources {
            catalog.add(resource)?;
        }
        Ok(catalog)
    }

    /// Append `resource`. Fails when the same (location, category, title)
    /// is already present.
    pub fn add(&mut self, resource: Resource) -> Result<()> {
        if self.resources.iter().any(|r| r.same_identity(&resource)) {
            return Err(CoreError::DuplicateResource {
                location: resource.location().to_string(),
                category: resource.category().to_string(),
                title: resource.title().to_string(),
            });
        }
        self.resources.push(resource);
        Ok(())
    }

    /// Delete the resource with the given identity and return it.
    pub fn remove(&mut self, location: &str, category: &str, title: &str) -> Result<Resource> {
        let location = normalize_key(location);
        let category = normalize_key(category);
        let title = title.trim();
        let pos = self
            .resources
            .iter()
            .position(|r| r.location() == location && r.category() == category && r.title() == title)
            .ok_or_else(|| CoreError::ResourceNotFound {
                location: location.clone(),
                category: category.clone(),
                title: title.to_string(),
            })?;
        Ok(self.resources.remove(pos))
    }

    /// All resources in the (location, category) bucket. Order within the
    /// bucket is unspecified; an empty result means no match.
    pub fn find_by_location_and_category(&self, location: &str, category: &str) -> Vec<Resource> {
        let location = normalize_key(location);
        let category = normalize_key(category);
        let target = (location.as_str(), category.as_str());

        let mut working = self.resources.clone();
        working.sort_by(|a, b| a.key().cmp(&b.key()));
        equal_key_run(&working, |r| r.key().cmp(&target)).to_vec()
    }

    /// All resources at `location`, ordered by category.
    pub fn find_by_location(&self, location: &str) -> Vec<Resource> {
        let location = normalize_key(location);

        let mut working = self.resources.clone();
        working.sort_by(|a, b| a.key().cmp(&b.key()));
        equal_key_run(&working, |r| r.location().cmp(location.as_str())).to_vec()
    }

    /// Distinct locations, sorted.
    pub fn locations(&self) -> Vec<String> {
        let mut out: Vec<String> = self.resources.iter().map(|r| r.location().to_string()).collect();
        out.sort();
        out.dedup();
        out
    }

    /// Distinct categories at `location`, sorted.
    pub fn categories_in(&self, location: &str) -> Vec<String> {
        let mut out: Vec<String> = self
            .find_by_location(location)
            .into_iter()
            .map(|r| r.category().to_string())
            .collect();
        out.dedup();
        out
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    pub fn as_slice(&self) -> &[Resource] {
        &self.resources
    }
}

// ── Search ────────────────────────────────────────────────────────────────────

/// Return the contiguous run of `sorted` whose elements compare `Equal`
/// under `probe`. `probe(x)` compares element `x` against the target and
/// must be monotone over `sorted`.
pub fn equal_key_run<T, F>(sorted: &[T], probe: F) -> &[T]
where
    F: Fn(&T) -> Ordering,
{
    let start = lower_bound(sorted, &probe, 0, sorted.len());
    if start == sorted.len() || probe(&sorted[start]) != Ordering::Equal {
        return &[];
    }
    let end = upper_bound(sorted, &probe, start, sorted.len());
    &sorted[start..end]
}

/// First index in `lo..hi` whose element is not `Less` than the target.
fn lower_bound<T, F>(sorted: &[T], probe: &F, lo: usize, hi: usize) -> usize
where
    F: Fn(&T) -> Ordering,
{
    if lo >= hi {
        return lo;
    }
    let mid = lo + (hi - lo) / 2;
    if probe(&sorted[mid]) == Ordering::Less {
        lower_bound(sorted, probe, mid + 1, hi)
    } else {
        lower_bound(sorted, probe, lo, mid)
    }
}

/// First index in `lo..hi` whose element is `Greater` than the target.
fn upper_bound<T, F>(sorted: &[T], probe: &F, lo: usize, hi: usize) -> usize
where
    F: Fn(&T) -> Ordering,
{
    if lo >= hi {
        return lo;
    }
    let mid = lo + (hi - lo) / 2;
    if probe(&sorted[mid]) == Ordering::Greater {
        upper_bound(sorted, probe, lo, mid)
    } else {
        upper_bound(sorted, probe, mid + 1, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(location: &str, category: &str, title: &str) -> Resource {
        Resource::new(location, category, title).unwrap()
    }

    fn titles(found: &[Resource]) -> Vec<String> {
        let mut t: Vec<String> = found.iter().map(|r| r.title().to_string()).collect();
        t.sort();
        t
    }

    fn example_catalog() -> ResourceCatalog {
        ResourceCatalog::from_resources([
            res("SF", "Legal", "Aid A"),
            res("SF", "Legal", "Aid B"),
            res("NY", "Health", "Clinic"),
        ])
        .unwrap()
    }

    // ── add ───────────────────────────────────────────────────────────────────

    #[test]
    fn test_add_rejects_duplicate_identity() {
        let mut catalog = example_catalog();
        let err = catalog.add(res("sf", "LEGAL", " Aid A ")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateResource { .. }));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_add_same_bucket_different_title() {
        let mut catalog = example_catalog();
        catalog.add(res("SF", "Legal", "Aid C")).unwrap();
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_add_treats_inner_whitespace_as_same_bucket() {
        let mut catalog = ResourceCatalog::new();
        catalog.add(res("San Jose", "Mental Health", "Counseling Center")).unwrap();
        let err = catalog.add(res("San  Jose", "Mental  Health", "Counseling Center")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateResource { .. }));

        catalog.add(res("San Jose", "Mental   Health", "Peer Support")).unwrap();
        let found = catalog.find_by_location_and_category("san jose", "mental health");
        assert_eq!(titles(&found), vec!["Counseling Center", "Peer Support"]);
    }

    // ── find_by_location_and_category ─────────────────────────────────────────

    #[test]
    fn test_find_example_bucket() {
        let found = example_catalog().find_by_location_and_category("SF", "Legal");
        assert_eq!(found.len(), 2);
        assert_eq!(titles(&found), vec!["Aid A", "Aid B"]);
    }

    #[test]
    fn test_find_normalizes_query() {
        let found = example_catalog().find_by_location_and_category("  ny ", "HEALTH");
        assert_eq!(titles(&found), vec!["Clinic"]);
    }

    #[test]
    fn test_find_on_empty_catalog() {
        let catalog = ResourceCatalog::new();
        assert!(catalog.find_by_location_and_category("SF", "Legal").is_empty());
        assert!(catalog.find_by_location("SF").is_empty());
    }

    #[test]
    fn test_find_single_element() {
        let catalog = ResourceCatalog::from_resources([res("Cupertino", "Cultural", "Center")]).unwrap();
        assert_eq!(catalog.find_by_location_and_category("cupertino", "cultural").len(), 1);
        assert!(catalog.find_by_location_and_category("cupertino", "health").is_empty());
    }

    #[test]
    fn test_find_target_below_and_above_all() {
        let catalog = example_catalog();
        assert!(catalog.find_by_location_and_category("Albany", "Legal").is_empty());
        assert!(catalog.find_by_location_and_category("Zurich", "Legal").is_empty());
        assert!(catalog.find_by_location_and_category("SF", "Zoning").is_empty());
        assert!(catalog.find_by_location_and_category("NY", "Aaa").is_empty());
    }

    #[test]
    fn test_find_returns_full_run_for_various_sizes() {
        for n in [0usize, 1, 2, 5] {
            let mut catalog = ResourceCatalog::new();
            catalog.add(res("Boston", "Housing", "Shelter")).unwrap();
            catalog.add(res("Denver", "Legal", "Clinic")).unwrap();
            for i in 0..n {
                catalog.add(res("Chicago", "Legal", &format!("Aid {}", i))).unwrap();
            }
            catalog.add(res("Chicago", "Health", "Hospital")).unwrap();
            catalog.add(res("Chicago", "Mental Health", "Counseling")).unwrap();

            let found = catalog.find_by_location_and_category("Chicago", "Legal");
            assert_eq!(found.len(), n, "bucket of size {}", n);
            assert!(found.iter().all(|r| r.key() == ("chicago", "legal")));
        }
    }

    #[test]
    fn test_find_is_insertion_order_independent() {
        let items = vec![
            res("SF", "Legal", "Aid A"),
            res("NY", "Health", "Clinic"),
            res("SF", "Health", "General"),
            res("SF", "Legal", "Aid B"),
            res("LA", "Legal", "Aid C"),
            res("SF", "Legal", "Aid D"),
        ];
        let mut reversed = items.clone();
        reversed.reverse();
        let mut rotated = items.clone();
        rotated.rotate_left(2);

        let expected = vec!["Aid A", "Aid B", "Aid D"];
        for order in [items, reversed, rotated] {
            let catalog = ResourceCatalog::from_resources(order).unwrap();
            assert_eq!(titles(&catalog.find_by_location_and_category("SF", "Legal")), expected);
        }
    }

    // ── find_by_location / locations / categories_in ─────────────────────────

    #[test]
    fn test_find_by_location_groups_categories() {
        let mut catalog = example_catalog();
        catalog.add(res("SF", "Health", "General")).unwrap();
        let found = catalog.find_by_location("sf");
        let categories: Vec<&str> = found.iter().map(|r| r.category()).collect();
        assert_eq!(categories, vec!["health", "legal", "legal"]);
    }

    #[test]
    fn test_locations_and_categories() {
        let mut catalog = example_catalog();
        catalog.add(res("SF", "Health", "General")).unwrap();
        assert_eq!(catalog.locations(), vec!["ny", "sf"]);
        assert_eq!(catalog.categories_in("SF"), vec!["health", "legal"]);
        assert!(catalog.categories_in("LA").is_empty());
    }

    // ── remove ────────────────────────────────────────────────────────────────

    #[test]
    fn test_remove_existing_and_missing() {
        let mut catalog = example_catalog();
        let removed = catalog.remove("SF", "Legal", "Aid A").unwrap();
        assert_eq!(removed.title(), "Aid A");
        assert_eq!(catalog.len(), 2);
        assert!(matches!(
            catalog.remove("SF", "Legal", "Aid A"),
            Err(CoreError::ResourceNotFound { .. })
        ));
    }

    // ── equal_key_run ─────────────────────────────────────────────────────────

    #[test]
    fn test_equal_key_run_on_integers() {
        let sorted = [1, 2, 2, 2, 3, 5, 5, 8];
        assert_eq!(equal_key_run(&sorted, |x| x.cmp(&2)), &[2, 2, 2]);
        assert_eq!(equal_key_run(&sorted, |x| x.cmp(&5)), &[5, 5]);
        assert_eq!(equal_key_run(&sorted, |x| x.cmp(&8)), &[8]);
        assert!(equal_key_run(&sorted, |x| x.cmp(&0)).is_empty());
        assert!(equal_key_run(&sorted, |x| x.cmp(&4)).is_empty());
        assert!(equal_key_run(&sorted, |x| x.cmp(&9)).is_empty());
        let empty: [i32; 0] = [];
        assert!(equal_key_run(&empty, |x| x.cmp(&1)).is_empty());
    }
}
