//! Static toy catalog and its filters.
//!
//! DESIGN
//! ======
//! The catalog is read-only after load. Filtering is a pure function of
//! (age category, search text, skill tags) and is recomputed on every input
//! change; nothing is cached.
//!
//! Toy ages are strings like `"3m"`. They are parsed by dropping the `m` and
//! reading the leading digits, so `"18-24m"` reads as 18. A toy whose age
//! does not parse only shows up under [`AgeCategory::All`].

use std::path::Path;

use serde::{Deserialize, Serialize};

const BUILTIN_CATALOG: &str = include_str!("../../data/toys.json");

/// Maximum number of cards shown in the toys grid.
pub const GRID_LIMIT: usize = 6;

/// Every skill tag offered in the skill filter.
pub const ALL_SKILLS: [&str; 18] = [
    "Sensory Development",
    "Auditory Skills",
    "Motor Skills",
    "Visual Tracking",
    "Fine Motor Skills",
    "Problem Solving",
    "Shape Recognition",
    "Gross Motor Skills",
    "Balance",
    "Creativity",
    "Spatial Awareness",
    "Self-Recognition",
    "Tracking",
    "Cognitive Skills",
    "Imaginative Play",
    "Cause and Effect",
    "Exploration",
    "Emotional Development",
];

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

// =============================================================================
// TOY RECORD
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToyRecord {
    pub id: u32,
    pub name: String,
    /// Age bracket start, e.g. `"3m"`.
    pub age: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub milestones: Vec<String>,
    #[serde(default)]
    pub safety_notes: String,
    #[serde(default)]
    pub usage_tips: String,
    #[serde(default)]
    pub purchase_link: String,
    #[serde(default)]
    pub image: String,
}

impl ToyRecord {
    /// Age in months, or `None` if the age string has no leading number.
    #[must_use]
    pub fn age_months(&self) -> Option<u32> {
        parse_age(&self.age)
    }

    #[must_use]
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }
}

/// Parse `"3m"` style ages into months.
#[must_use]
pub fn parse_age(raw: &str) -> Option<u32> {
    let stripped = raw.replacen('m', "", 1);
    let digits: String = stripped
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

// =============================================================================
// AGE CATEGORY
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AgeCategory {
    #[default]
    ZeroToThree,
    ThreeToSix,
    SixToTwelve,
    TwelveToEighteen,
    EighteenPlus,
    All,
}

impl AgeCategory {
    /// Selectable brackets in display order (excludes `All`).
    pub const BRACKETS: [AgeCategory; 5] = [
        AgeCategory::ZeroToThree,
        AgeCategory::ThreeToSix,
        AgeCategory::SixToTwelve,
        AgeCategory::TwelveToEighteen,
        AgeCategory::EighteenPlus,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::ZeroToThree => "0-3m",
            Self::ThreeToSix => "3-6m",
            Self::SixToTwelve => "6-12m",
            Self::TwelveToEighteen => "12-18m",
            Self::EighteenPlus => "18-24m+",
            Self::All => "all",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ZeroToThree => "0-3 Month",
            Self::ThreeToSix => "3-6 Month",
            Self::SixToTwelve => "6-12 Month",
            Self::TwelveToEighteen => "12-18 Month",
            Self::EighteenPlus => "18-24 Month+",
            Self::All => "All Ages",
        }
    }

    /// Half-open month range `[start, end)`; `None` end is unbounded.
    /// `All` has no range.
    #[must_use]
    pub fn range(self) -> Option<(u32, Option<u32>)> {
        match self {
            Self::ZeroToThree => Some((0, Some(3))),
            Self::ThreeToSix => Some((3, Some(6))),
            Self::SixToTwelve => Some((6, Some(12))),
            Self::TwelveToEighteen => Some((12, Some(18))),
            Self::EighteenPlus => Some((18, None)),
            Self::All => None,
        }
    }

    /// Whether a toy of `age` months belongs to this category.
    #[must_use]
    pub fn contains(self, age: Option<u32>) -> bool {
        let Some((start, end)) = self.range() else {
            return true;
        };
        let Some(age) = age else {
            return false;
        };
        age >= start && end.is_none_or(|end| age < end)
    }

    /// Short educational note for parents browsing this bracket.
    #[must_use]
    pub fn tip(self) -> &'static str {
        match self {
            Self::ZeroToThree => {
                "At 0-3 months, babies are developing sensory awareness. Toys that make gentle sounds and have different textures help stimulate their senses."
            }
            Self::ThreeToSix => {
                "At 3-6 months, babies start reaching and grasping. Interactive toys encourage motor development and exploration."
            }
            Self::SixToTwelve => {
                "At 6-12 months, babies are sitting and crawling. Toys that promote stacking and problem-solving support cognitive growth."
            }
            Self::TwelveToEighteen => {
                "At 12-18 months, toddlers are walking and talking. Educational toys help with shape recognition and fine motor skills."
            }
            Self::EighteenPlus => {
                "At 18-24 months+, children engage in imaginative play. Building and creative toys foster creativity and spatial awareness."
            }
            Self::All => "Every toy in the catalog, across all age brackets.",
        }
    }

    /// Bracket for a baby of `months` months; `None` for negative ages.
    #[must_use]
    pub fn for_age(months: i64) -> Option<Self> {
        match months {
            0..=2 => Some(Self::ZeroToThree),
            3..=5 => Some(Self::ThreeToSix),
            6..=11 => Some(Self::SixToTwelve),
            12..=17 => Some(Self::TwelveToEighteen),
            m if m >= 18 => Some(Self::EighteenPlus),
            _ => None,
        }
    }
}

impl std::fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for AgeCategory {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "0-3m" => Ok(Self::ZeroToThree),
            "3-6m" => Ok(Self::ThreeToSix),
            "6-12m" => Ok(Self::SixToTwelve),
            "12-18m" => Ok(Self::TwelveToEighteen),
            "18-24m+" => Ok(Self::EighteenPlus),
            "all" => Ok(Self::All),
            other => Err(format!("unknown age category: {other}")),
        }
    }
}

// =============================================================================
// FILTER
// =============================================================================

/// Toys matching the age category, a case-insensitive name search, and at
/// least one of `skills` (any skill passes when `skills` is empty).
#[must_use]
pub fn filter<'a>(toys: &'a [ToyRecord], category: AgeCategory, search: &str, skills: &[String]) -> Vec<&'a ToyRecord> {
    let needle = search.to_lowercase();
    toys.iter()
        .filter(|toy| category.contains(toy.age_months()))
        .filter(|toy| needle.is_empty() || toy.name.to_lowercase().contains(&needle))
        .filter(|toy| skills.is_empty() || skills.iter().any(|skill| toy.has_skill(skill)))
        .collect()
}

// =============================================================================
// CATALOG
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct ToyCatalog {
    toys: Vec<ToyRecord>,
}

impl ToyCatalog {
    #[must_use]
    pub fn new(toys: Vec<ToyRecord>) -> Self {
        Self { toys }
    }

    /// The catalog bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled JSON is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// # Errors
    ///
    /// Returns an error if `raw` is not a JSON array of toy records.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let toys: Vec<ToyRecord> = serde_json::from_str(raw)?;
        Ok(Self { toys })
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    #[must_use]
    pub fn toys(&self) -> &[ToyRecord] {
        &self.toys
    }

    #[must_use]
    pub fn get(&self, id: u32) -> Option<&ToyRecord> {
        self.toys.iter().find(|toy| toy.id == id)
    }

    #[must_use]
    pub fn filter(&self, category: AgeCategory, search: &str, skills: &[String]) -> Vec<&ToyRecord> {
        filter(&self.toys, category, search, skills)
    }

    /// First [`GRID_LIMIT`] matches, as shown on the toys page.
    #[must_use]
    pub fn grid(&self, category: AgeCategory, search: &str, skills: &[String]) -> Vec<&ToyRecord> {
        let mut matches = self.filter(category, search, skills);
        matches.truncate(GRID_LIMIT);
        matches
    }
}

#[cfg(test)]
#[path = "toys_test.rs"]
mod tests;
