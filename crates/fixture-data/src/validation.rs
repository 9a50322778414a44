//! Category rules mirroring backend constraints.
//!
//! The backend models categories as a closed enum. Keeping the label list
//! here in sync with `backend/src/domain/category.rs` ensures every seeded
//! product converts cleanly.

/// Category labels accepted by the backend, in display order.
pub const KNOWN_CATEGORIES: [&str; 7] = [
    "Processor",
    "Motherboard",
    "RAM",
    "Storage",
    "Power Supply",
    "Graphics Card",
    "Chassis",
];

/// Returns `true` if `label` exactly matches a known category.
///
/// # Examples
///
/// ```
/// use fixture_data::is_known_category;
///
/// assert!(is_known_category("Graphics Card"));
/// assert!(!is_known_category("graphics card")); // Case sensitive
/// assert!(!is_known_category("Monitor"));
/// ```
#[must_use]
pub fn is_known_category(label: &str) -> bool {
    KNOWN_CATEGORIES.contains(&label)
}

/// Returns `true` if the value is empty once trimmed.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Processor")]
    #[case("Power Supply")]
    #[case("Chassis")]
    fn accepts_known_categories(#[case] label: &str) {
        assert!(is_known_category(label));
    }

    #[rstest]
    #[case("")]
    #[case("processor")]
    #[case(" Processor")]
    #[case("Monitor")]
    fn rejects_unknown_categories(#[case] label: &str) {
        assert!(!is_known_category(label));
    }

    #[rstest]
    #[case("", true)]
    #[case("   ", true)]
    #[case("\t\n", true)]
    #[case("a", false)]
    #[case("  a  ", false)]
    fn blank_detection(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_blank(value), expected);
    }
}
