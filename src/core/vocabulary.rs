use std::ops::Range;

/// Recognized education levels, in dimension order
pub const EDUCATION_LEVELS: [&str; 4] = ["undergraduate", "graduate", "postgraduate", "professional"];

pub const DEFAULT_SKILLS: [&str; 10] = [
    "javascript",
    "react",
    "python",
    "java",
    "sql",
    "machine learning",
    "data analysis",
    "marketing",
    "design",
    "communication",
];

pub const DEFAULT_SECTORS: [&str; 7] = [
    "technology",
    "healthcare",
    "finance",
    "education",
    "marketing",
    "research",
    "consulting",
];

pub const DEFAULT_LOCATIONS: [&str; 6] = [
    "remote",
    "new york",
    "san francisco",
    "london",
    "mumbai",
    "bangalore",
];

/// One block of the feature vector layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Education,
    Skills,
    Sectors,
    Locations,
}

impl Category {
    /// Layout order of the blocks inside a feature vector
    pub const ALL: [Category; 4] = [
        Category::Education,
        Category::Skills,
        Category::Sectors,
        Category::Locations,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Education => "education",
            Category::Skills => "skills",
            Category::Sectors => "sector",
            Category::Locations => "location",
        }
    }
}

/// The shared term tables that define feature dimensions
///
/// Built once at startup and handed to encoders by reference. There is no
/// mutation API: a vocabulary with different tables is a different value, and
/// vectors produced from two different vocabularies must never be compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    education_levels: Vec<String>,
    skills: Vec<String>,
    sectors: Vec<String>,
    locations: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary with custom skill, sector and location tables
    ///
    /// Education levels are always the fixed four. Terms are lowercased and
    /// trimmed; blank terms are dropped.
    pub fn new<S: AsRef<str>>(skills: &[S], sectors: &[S], locations: &[S]) -> Self {
        Self {
            education_levels: normalize_terms(&EDUCATION_LEVELS),
            skills: normalize_terms(skills),
            sectors: normalize_terms(sectors),
            locations: normalize_terms(locations),
        }
    }

    pub fn standard() -> Self {
        Self::new(&DEFAULT_SKILLS, &DEFAULT_SECTORS, &DEFAULT_LOCATIONS)
    }

    pub fn education_levels(&self) -> &[String] {
        &self.education_levels
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn sectors(&self) -> &[String] {
        &self.sectors
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Terms of a single block
    pub fn terms(&self, category: Category) -> &[String] {
        match category {
            Category::Education => &self.education_levels,
            Category::Skills => &self.skills,
            Category::Sectors => &self.sectors,
            Category::Locations => &self.locations,
        }
    }

    /// Total number of feature dimensions
    pub fn dimension(&self) -> usize {
        self.education_levels.len() + self.skills.len() + self.sectors.len() + self.locations.len()
    }

    /// Index range a block occupies inside a feature vector
    pub fn block_range(&self, category: Category) -> Range<usize> {
        let education = self.education_levels.len();
        let skills = education + self.skills.len();
        let sectors = skills + self.sectors.len();

        match category {
            Category::Education => 0..education,
            Category::Skills => education..skills,
            Category::Sectors => skills..sectors,
            Category::Locations => sectors..self.dimension(),
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::standard()
    }
}

fn normalize_terms<S: AsRef<str>>(terms: &[S]) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_dimension() {
        let vocab = Vocabulary::standard();
        assert_eq!(vocab.dimension(), 4 + 10 + 7 + 6);
    }

    #[test]
    fn test_block_ranges_are_contiguous() {
        let vocab = Vocabulary::standard();
        assert_eq!(vocab.block_range(Category::Education), 0..4);
        assert_eq!(vocab.block_range(Category::Skills), 4..14);
        assert_eq!(vocab.block_range(Category::Sectors), 14..21);
        assert_eq!(vocab.block_range(Category::Locations), 21..27);
    }

    #[test]
    fn test_custom_terms_normalized() {
        let vocab = Vocabulary::new(&["  Rust ", ""], &["Energy"], &["Remote", "Pune"]);
        assert_eq!(vocab.skills(), &["rust".to_string()]);
        assert_eq!(vocab.sectors(), &["energy".to_string()]);
        assert_eq!(vocab.education_levels().len(), 4);
        assert_eq!(vocab.dimension(), 4 + 1 + 1 + 2);
    }
}
