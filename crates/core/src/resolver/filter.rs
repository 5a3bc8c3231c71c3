use classpack_api::ArtifactLocation;
use std::collections::BTreeSet;
use tracing::debug;

/// Drops every location whose text contains any exclusion as a literal,
/// case-sensitive substring. Empty exclusions are ignored.
pub fn apply_exclusions(locations: &mut BTreeSet<ArtifactLocation>, exclusions: &[String]) {
    locations.retain(|location| {
        let excluded = exclusions
            .iter()
            .filter(|pattern| !pattern.is_empty())
            .find(|pattern| location.as_str().contains(pattern.as_str()));
        if let Some(pattern) = excluded {
            debug!("Excluding {} (matched {:?})", location, pattern);
        }
        excluded.is_none()
    });
}

/// Keeps only `file:` locations.
pub fn retain_local(locations: &mut BTreeSet<ArtifactLocation>) {
    locations.retain(|location| {
        let local = location.is_file_scheme();
        if !local {
            debug!("Dropping non-local location {}", location);
        }
        local
    });
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn set(raw: &[&str]) -> BTreeSet<ArtifactLocation> {
        raw.iter().map(|r| ArtifactLocation::parse(r).unwrap()).collect()
    }

    #[test]
    fn test_exclusions_are_literal_and_case_sensitive() {
        let mut locations = set(&["/lib/geode-core.jar", "/lib/Geode-cq.jar", "/lib/a.b.jar"]);
        apply_exclusions(&mut locations, &["geode".to_string(), "a*b".to_string()]);
        assert_eq!(locations, set(&["/lib/Geode-cq.jar", "/lib/a.b.jar"]));
    }

    #[test]
    fn test_any_exclusion_removes() {
        let mut locations = set(&["/lib/x.jar", "/lib/y.jar", "/lib/z.jar"]);
        apply_exclusions(&mut locations, &["x.jar".to_string(), "y.jar".to_string()]);
        assert_eq!(locations, set(&["/lib/z.jar"]));
    }

    #[test]
    fn test_exclusions_are_idempotent() {
        let exclusions = vec!["lib/x".to_string()];
        let mut once = set(&["/lib/x.jar", "/lib/y.jar"]);
        apply_exclusions(&mut once, &exclusions);
        let mut twice = once.clone();
        apply_exclusions(&mut twice, &exclusions);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_exclusion_matches_nothing() {
        let mut locations = set(&["/lib/x.jar"]);
        apply_exclusions(&mut locations, &[String::new()]);
        assert_eq!(locations.len(), 1);
    }

    #[test]
    fn test_retain_local() {
        let mut locations = set(&[
            "/lib/x.jar",
            "jrt:/java.base",
            "https://repo.example.com/y.jar",
        ]);
        retain_local(&mut locations);
        assert_eq!(locations, set(&["/lib/x.jar"]));
    }
}
