/// True if every needle occurs in `haystack`. Case-sensitive.
pub fn contains_all(haystack: &str, needles: &[&str]) -> bool {
    missing(haystack, needles).is_empty()
}

/// True if every needle occurs in `haystack`, comparing lower-cased text.
pub fn contains_all_ignore_case(haystack: &str, needles: &[&str]) -> bool {
    missing_ignore_case(haystack, needles).is_empty()
}

/// True if no needle occurs in `haystack`. Case-sensitive.
pub fn contains_none(haystack: &str, needles: &[&str]) -> bool {
    present(haystack, needles).is_empty()
}

/// Needles absent from `haystack`, in the order given.
pub fn missing(haystack: &str, needles: &[&str]) -> Vec<String> {
    needles
        .iter()
        .filter(|needle| !haystack.contains(**needle))
        .map(ToString::to_string)
        .collect()
}

pub fn missing_ignore_case(haystack: &str, needles: &[&str]) -> Vec<String> {
    let lowered = haystack.to_lowercase();
    needles
        .iter()
        .filter(|needle| !lowered.contains(&needle.to_lowercase()))
        .map(ToString::to_string)
        .collect()
}

/// Needles found in `haystack`, in the order given.
pub fn present(haystack: &str, needles: &[&str]) -> Vec<String> {
    needles
        .iter()
        .filter(|needle| haystack.contains(**needle))
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIBE: &str = "Name:       hello\nNamespace:  kne2etests0\nConditions:\n  ++ Ready\n";

    #[test]
    fn contains_all_requires_every_needle() {
        assert!(contains_all(DESCRIBE, &["Name", "Namespace", "Ready"]));
        assert!(!contains_all(DESCRIBE, &["Name", "Revisions"]));
    }

    #[test]
    fn contains_all_is_case_sensitive() {
        assert!(!contains_all(DESCRIBE, &["ready"]));
        assert!(contains_all_ignore_case(DESCRIBE, &["ready", "CONDITIONS"]));
    }

    #[test]
    fn ignore_case_lowers_both_sides() {
        assert!(contains_all_ignore_case("Updating", &["updating"]));
        assert!(contains_all_ignore_case("updating", &["UPDATING"]));
    }

    #[test]
    fn needle_order_does_not_matter() {
        assert!(contains_all(DESCRIBE, &["Ready", "Name", "hello"]));
    }

    #[test]
    fn empty_needles_are_vacuously_satisfied() {
        assert!(contains_all("", &[]));
        assert!(contains_none("anything", &[]));
    }

    #[test]
    fn contains_none_rejects_any_match() {
        assert!(contains_none("No services found.\n", &["hello"]));
        assert!(!contains_none(DESCRIBE, &["absent", "hello"]));
    }

    #[test]
    fn missing_and_present_keep_needle_order() {
        assert_eq!(missing(DESCRIBE, &["URL", "Name", "Age"]), vec!["URL", "Age"]);
        assert_eq!(present(DESCRIBE, &["URL", "Ready", "hello"]), vec!["Ready", "hello"]);
        assert_eq!(missing_ignore_case(DESCRIBE, &["NAME", "url"]), vec!["url"]);
    }
}
