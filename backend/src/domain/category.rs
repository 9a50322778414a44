//! Product categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed set of catalogue categories.
///
/// Declaration order is display order; reports iterate [`Category::ALL`].
///
/// # Examples
/// ```
/// use stockroom::domain::Category;
///
/// let category: Category = "Graphics Card".parse().expect("known label");
/// assert_eq!(category, Category::GraphicsCard);
/// assert_eq!(category.label(), "Graphics Card");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// CPUs.
    Processor,
    /// Mainboards.
    Motherboard,
    /// Memory modules.
    #[serde(rename = "RAM")]
    Ram,
    /// Drives.
    Storage,
    /// PSUs.
    #[serde(rename = "Power Supply")]
    PowerSupply,
    /// GPUs.
    #[serde(rename = "Graphics Card")]
    GraphicsCard,
    /// Cases.
    Chassis,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Self; 7] = [
        Self::Processor,
        Self::Motherboard,
        Self::Ram,
        Self::Storage,
        Self::PowerSupply,
        Self::GraphicsCard,
        Self::Chassis,
    ];

    /// Human-readable label, identical to the serialised form.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Processor => "Processor",
            Self::Motherboard => "Motherboard",
            Self::Ram => "RAM",
            Self::Storage => "Storage",
            Self::PowerSupply => "Power Supply",
            Self::GraphicsCard => "Graphics Card",
            Self::Chassis => "Chassis",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a label does not name a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn labels_match_fixture_categories() {
        let labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, fixture_data::KNOWN_CATEGORIES);
    }

    #[rstest]
    #[case(Category::Ram, "\"RAM\"")]
    #[case(Category::PowerSupply, "\"Power Supply\"")]
    #[case(Category::Chassis, "\"Chassis\"")]
    fn serialises_to_label(#[case] category: Category, #[case] expected: &str) {
        let json = serde_json::to_string(&category).expect("serialise category");
        assert_eq!(json, expected);
    }

    #[rstest]
    #[case("ram")]
    #[case("Monitor")]
    #[case("")]
    fn parse_rejects_unknown_labels(#[case] label: &str) {
        let err = label.parse::<Category>().expect_err("unknown label");
        assert_eq!(err, UnknownCategory(label.to_owned()));
    }

    #[rstest]
    fn ordering_follows_declaration() {
        let mut shuffled = vec![Category::Chassis, Category::Processor, Category::Ram];
        shuffled.sort();
        assert_eq!(shuffled, [Category::Processor, Category::Ram, Category::Chassis]);
    }
}
