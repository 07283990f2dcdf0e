//! DNS name helpers for challenge records.

/// Label prefix of every DNS-01 challenge record
pub const ACME_CHALLENGE_LABEL: &str = "_acme-challenge";

/// Maximum number of names tried when looking up the zone of a domain.
pub const MAX_ZONE_CANDIDATES: usize = 4;

/// Strip a wildcard prefix and a trailing root dot.
#[must_use]
pub fn normalize_domain(domain: &str) -> &str {
    let domain = domain.trim_end_matches('.');
    domain.strip_prefix("*.").unwrap_or(domain)
}

/// Fully qualified name of the challenge record for `domain`.
///
/// `example.com` and `*.example.com` both map to `_acme-challenge.example.com`.
#[must_use]
pub fn challenge_record_name(domain: &str) -> String {
    format!("{ACME_CHALLENGE_LABEL}.{}", normalize_domain(domain))
}

/// Zone names that may hold records for `domain`, most specific first.
///
/// The domain itself comes first, followed by its parents, one label removed
/// at a time, capped at [`MAX_ZONE_CANDIDATES`] names.
#[must_use]
pub fn zone_candidates(domain: &str) -> Vec<&str> {
    let mut candidates = Vec::with_capacity(MAX_ZONE_CANDIDATES);
    let mut current = normalize_domain(domain);

    while !current.is_empty() && candidates.len() < MAX_ZONE_CANDIDATES {
        candidates.push(current);
        match current.find('.') {
            Some(pos) => current = &current[pos + 1..],
            None => break,
        }
    }

    candidates
}

/// Name of `record` relative to `zone`.
///
/// Names outside the zone are returned unchanged. The zone apex becomes `@`.
#[must_use]
pub fn relative_record_name(record: &str, zone: &str) -> String {
    let record = record.trim_end_matches('.');
    let zone = zone.trim_end_matches('.');

    if record.eq_ignore_ascii_case(zone) {
        return "@".to_string();
    }

    let split = record.len().checked_sub(zone.len() + 1);
    match split {
        Some(pos)
            if record.as_bytes()[pos] == b'.' && record[pos + 1..].eq_ignore_ascii_case(zone) =>
        {
            record[..pos].to_string()
        }
        _ => record.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_wildcards_and_root_dot() {
        assert_eq!(normalize_domain("example.com"), "example.com");
        assert_eq!(normalize_domain("*.example.com"), "example.com");
        assert_eq!(normalize_domain("example.com."), "example.com");
        assert_eq!(normalize_domain("*.sub.example.com."), "sub.example.com");
    }

    #[test]
    fn challenge_names() {
        assert_eq!(
            challenge_record_name("example.com"),
            "_acme-challenge.example.com"
        );
        assert_eq!(
            challenge_record_name("*.example.com"),
            "_acme-challenge.example.com"
        );
        assert_eq!(
            challenge_record_name("www.example.com"),
            "_acme-challenge.www.example.com"
        );
    }

    #[test]
    fn zone_candidates_walk_up_to_four_names() {
        assert_eq!(zone_candidates("example.com"), vec!["example.com", "com"]);
        assert_eq!(
            zone_candidates("a.b.c.example.com"),
            vec!["a.b.c.example.com", "b.c.example.com", "c.example.com", "example.com"]
        );
        assert_eq!(zone_candidates("localhost"), vec!["localhost"]);
        assert!(zone_candidates("").is_empty());
    }

    #[test]
    fn relative_names() {
        assert_eq!(
            relative_record_name("_acme-challenge.example.com", "example.com"),
            "_acme-challenge"
        );
        assert_eq!(
            relative_record_name("_acme-challenge.www.example.com", "example.com"),
            "_acme-challenge.www"
        );
        assert_eq!(relative_record_name("example.com", "example.com"), "@");
        // A suffix match must fall on a label boundary
        assert_eq!(
            relative_record_name("_acme-challenge.badexample.com", "example.com"),
            "_acme-challenge.badexample.com"
        );
    }
}
