//! Property-based tests for reference normalization and SSH derivation.
//!
//! These tests use proptest to generate repository references and verify
//! that the canonicalization invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::reference::normalize;
    use crate::resolve::ssh_url;
    use proptest::prelude::*;

    // Mixed-case hosts with an alphabetic TLD, never an IP address.
    fn host() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9]{0,8}\\.[A-Za-z]{2,4}"
    }

    fn segment() -> impl Strategy<Value = String> {
        "[A-Za-z0-9_-]{1,12}"
    }

    // ============================================================================
    // normalize property tests
    // ============================================================================

    proptest! {
        /// Property: every spelling of the same repository normalizes identically
        #[test]
        fn normalize_forms_are_equivalent(
            host in host(),
            owner in segment(),
            repo in segment(),
        ) {
            let expected = format!("{}/{}/{}", host, owner, repo);
            let forms = [
                expected.clone(),
                format!("{}.git", expected),
                format!("http://{}", expected),
                format!("https://{}.git", expected),
                format!("git://{}", expected),
                format!("git@{}:{}/{}.git", host, owner, repo),
            ];
            for form in forms {
                let canonical = normalize(&form);
                prop_assert!(canonical.is_ok(), "failed to normalize '{}'", form);
                let canonical = canonical.unwrap();
                prop_assert_eq!(canonical.as_str(), expected.as_str());
            }
        }

        /// Property: normalize is idempotent
        #[test]
        fn normalize_is_idempotent(
            host in host(),
            segments in prop::collection::vec(segment(), 0..5),
        ) {
            let mut reference = host;
            for segment in &segments {
                reference.push('/');
                reference.push_str(segment);
            }
            let once = normalize(&reference).unwrap();
            let twice = normalize(once.as_str()).unwrap();
            prop_assert_eq!(once, twice);
        }

        /// Property: canonical paths never carry a scheme, a user or a `.git` suffix
        #[test]
        fn normalize_output_is_bare(
            user in "[a-z]{1,6}",
            host in host(),
            owner in segment(),
            repo in segment(),
        ) {
            let canonical = normalize(&format!("{}@{}:{}/{}.git", user, host, owner, repo)).unwrap();
            prop_assert!(!canonical.as_str().contains("://"));
            prop_assert!(!canonical.as_str().contains('@'));
            prop_assert!(!canonical.as_str().ends_with(".git"));
            prop_assert!(!canonical.as_str().contains(':'));
        }
    }

    // ============================================================================
    // ssh_url property tests
    // ============================================================================

    proptest! {
        /// Property: SSH URLs keep at most two path segments after the host
        #[test]
        fn ssh_url_keeps_two_segments(
            host in host(),
            segments in prop::collection::vec(segment(), 2..6),
        ) {
            let reference = format!("{}/{}", host, segments.join("/"));
            let canonical = normalize(&reference).unwrap();
            let url = ssh_url(&canonical, "git").unwrap();
            prop_assert_eq!(
                url,
                format!("git@{}:{}/{}.git", host, segments[0], segments[1])
            );
        }
    }
}
