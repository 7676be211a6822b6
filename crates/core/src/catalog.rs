//! Catalog keys - where question pools live.
//!
//! Diagnostics are keyed by grade level; worksheets by
//! category → subcategory → worksheet name.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory holding grade-level diagnostic files.
pub const DIAGNOSTIC_DIR: &str = "diagnostics";

/// Directory holding worksheet files.
pub const WORKSHEET_DIR: &str = "worksheets";

/// Errors raised when parsing catalog identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Unknown grade label
    #[error("Unknown grade level: {0}")]
    UnknownGrade(String),
}

/// Grade level of a diagnostic set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradeLevel {
    /// Grade 1
    Grade1,
    /// Grade 2
    Grade2,
    /// Grade 3
    Grade3,
    /// Grade 4
    Grade4,
    /// Grade 5
    Grade5,
    /// Grade 6
    Grade6,
    /// Grade 7
    Grade7,
    /// Grade 8
    Grade8,
    /// GED preparation
    Ged,
}

impl GradeLevel {
    /// All grade levels in display order.
    pub const ALL: [GradeLevel; 9] = [
        GradeLevel::Grade1,
        GradeLevel::Grade2,
        GradeLevel::Grade3,
        GradeLevel::Grade4,
        GradeLevel::Grade5,
        GradeLevel::Grade6,
        GradeLevel::Grade7,
        GradeLevel::Grade8,
        GradeLevel::Ged,
    ];

    /// Display label ("Grade 3", "GED").
    pub fn label(&self) -> &'static str {
        match self {
            GradeLevel::Grade1 => "Grade 1",
            GradeLevel::Grade2 => "Grade 2",
            GradeLevel::Grade3 => "Grade 3",
            GradeLevel::Grade4 => "Grade 4",
            GradeLevel::Grade5 => "Grade 5",
            GradeLevel::Grade6 => "Grade 6",
            GradeLevel::Grade7 => "Grade 7",
            GradeLevel::Grade8 => "Grade 8",
            GradeLevel::Ged => "GED",
        }
    }

    /// Diagnostic file name for this grade.
    pub fn file_name(&self) -> String {
        match self {
            GradeLevel::Ged => "ged_diagnostic.json".to_string(),
            other => {
                let n = GradeLevel::ALL
                    .iter()
                    .position(|g| g == other)
                    .map_or(0, |i| i + 1);
                format!("grade{}_diagnostic.json", n)
            }
        }
    }
}

impl std::fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for GradeLevel {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(' ', "");
        GradeLevel::ALL
            .iter()
            .copied()
            .find(|g| g.label().to_lowercase().replace(' ', "") == normalized)
            .ok_or_else(|| CatalogError::UnknownGrade(s.to_string()))
    }
}

/// Location of a question pool within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogKey {
    /// Grade-level diagnostic set
    Diagnostic(GradeLevel),
    /// A single worksheet
    Worksheet {
        /// Top-level category ("Grammar")
        category: String,
        /// Group within the category ("Pronouns")
        subcategory: String,
        /// Worksheet name ("Subject Pronouns")
        worksheet: String,
    },
}

impl CatalogKey {
    /// Create a worksheet key.
    pub fn worksheet(
        category: impl Into<String>,
        subcategory: impl Into<String>,
        worksheet: impl Into<String>,
    ) -> Self {
        CatalogKey::Worksheet {
            category: category.into(),
            subcategory: subcategory.into(),
            worksheet: worksheet.into(),
        }
    }

    /// Path of the pool file relative to the catalog root.
    pub fn relative_path(&self) -> PathBuf {
        match self {
            CatalogKey::Diagnostic(grade) => PathBuf::from(DIAGNOSTIC_DIR).join(grade.file_name()),
            CatalogKey::Worksheet { category, subcategory, worksheet } => PathBuf::from(WORKSHEET_DIR)
                .join(category)
                .join(subcategory)
                .join(format!("{}.json", worksheet.replace(' ', "_"))),
        }
    }
}

impl std::fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogKey::Diagnostic(grade) => write!(f, "{} diagnostic", grade),
            CatalogKey::Worksheet { category, subcategory, worksheet } => {
                write!(f, "{}/{}/{}", category, subcategory, worksheet)
            }
        }
    }
}

/// One subcategory and its worksheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    /// Subcategory name
    pub name: String,

    /// Worksheet names in display order
    pub worksheets: Vec<String>,
}

/// One category and its subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category name
    pub name: String,

    /// Subcategories in display order
    pub subcategories: Vec<Subcategory>,
}

/// Tree of available worksheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetCatalog {
    /// Categories in display order
    pub categories: Vec<Category>,
}

impl WorksheetCatalog {
    /// Look up a category by name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Whether the catalog lists the given worksheet.
    pub fn contains(&self, category: &str, subcategory: &str, worksheet: &str) -> bool {
        self.category(category)
            .and_then(|c| c.subcategories.iter().find(|s| s.name == subcategory))
            .is_some_and(|s| s.worksheets.iter().any(|w| w == worksheet))
    }

    /// Every worksheet key in catalog order.
    pub fn keys(&self) -> Vec<CatalogKey> {
        let mut keys = Vec::new();
        for category in &self.categories {
            for sub in &category.subcategories {
                for worksheet in &sub.worksheets {
                    keys.push(CatalogKey::worksheet(&category.name, &sub.name, worksheet));
                }
            }
        }
        keys
    }
}

impl Default for WorksheetCatalog {
    /// The third-grade English worksheet tree.
    fn default() -> Self {
        fn sub(name: &str, worksheets: &[&str]) -> Subcategory {
            Subcategory {
                name: name.to_string(),
                worksheets: worksheets.iter().map(|w| w.to_string()).collect(),
            }
        }

        Self {
            categories: vec![
                Category {
                    name: "Grammar".to_string(),
                    subcategories: vec![
                        sub("Pronouns", &["Subject Pronouns", "Pronoun Replacement"]),
                        sub("Verbs", &["Present Tense", "Present Progressive", "Do/Does/Did"]),
                        sub("Nouns", &["Common/Proper Nouns", "There is/There are"]),
                        sub("Prepositions", &["Preposition Practice"]),
                    ],
                },
                Category {
                    name: "Reading".to_string(),
                    subcategories: vec![
                        sub(
                            "Grasshopper Story",
                            &["Reading Passage", "Comprehension Questions", "Cloze Activity"],
                        ),
                        sub(
                            "Three Rs Story",
                            &["Reading Passage", "Vocabulary Exercise", "True/False Questions"],
                        ),
                    ],
                },
                Category {
                    name: "Writing".to_string(),
                    subcategories: vec![
                        sub("Capitalization", &["Sentence Correction", "Paragraph Correction"]),
                        sub("Alphabetical Order", &["ABC Practice"]),
                    ],
                },
                Category {
                    name: "Vocabulary".to_string(),
                    subcategories: vec![sub("General", &["Number Words Matching"])],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_file_names() {
        assert_eq!(GradeLevel::Grade1.file_name(), "grade1_diagnostic.json");
        assert_eq!(GradeLevel::Grade8.file_name(), "grade8_diagnostic.json");
        assert_eq!(GradeLevel::Ged.file_name(), "ged_diagnostic.json");
    }

    #[test]
    fn test_grade_parse() {
        assert_eq!("Grade 3".parse::<GradeLevel>().unwrap(), GradeLevel::Grade3);
        assert_eq!("ged".parse::<GradeLevel>().unwrap(), GradeLevel::Ged);
        assert_eq!(
            "Grade 9".parse::<GradeLevel>(),
            Err(CatalogError::UnknownGrade("Grade 9".to_string()))
        );
    }

    #[test]
    fn test_worksheet_path_replaces_spaces() {
        let key = CatalogKey::worksheet("Grammar", "Pronouns", "Subject Pronouns");
        assert_eq!(
            key.relative_path(),
            PathBuf::from("worksheets/Grammar/Pronouns/Subject_Pronouns.json")
        );
    }

    #[test]
    fn test_default_catalog() {
        let catalog = WorksheetCatalog::default();
        assert_eq!(catalog.categories.len(), 4);
        assert!(catalog.contains("Grammar", "Verbs", "Do/Does/Did"));
        assert!(!catalog.contains("Grammar", "Verbs", "Past Tense"));
        assert_eq!(catalog.keys().len(), 18);
    }
}
