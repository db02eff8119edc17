//! Skills collection consumed by the terminal widget.
//!
//! The collection is grouped into categories, each with an ordered list of
//! named items. The terminal only ever sees a flattened, truncated summary.

use serde::{Deserialize, Serialize};

/// Maximum number of skill names listed in the terminal summary.
pub const SUMMARY_LIMIT: usize = 10;

/// Once the collection holds more than this many items, the summary ends
/// with [`TRUNCATION_MARKER`].
pub const TRUNCATION_THRESHOLD: usize = 5;

/// Marker appended to a summary that does not list every skill.
pub const TRUNCATION_MARKER: &str = "...";

/// A single named skill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillItem {
    pub name: String,
}

impl SkillItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A group of skills, e.g. "Languages" or "Frameworks".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillCategory {
    #[serde(default)]
    pub items: Vec<SkillItem>,
}

impl SkillCategory {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: names.into_iter().map(SkillItem::new).collect(),
        }
    }
}

/// Build the comma-joined skills value shown on the terminal's first line.
///
/// Lists the first [`SUMMARY_LIMIT`] names across all categories, in order,
/// and appends [`TRUNCATION_MARKER`] when the collection holds more than
/// [`TRUNCATION_THRESHOLD`] items. Without a source the value is empty.
#[must_use]
pub fn skills_summary(source: Option<&[SkillCategory]>) -> String {
    let Some(categories) = source else {
        return String::new();
    };

    let total: usize = categories.iter().map(|c| c.items.len()).sum();
    let mut selected: Vec<&str> = categories
        .iter()
        .flat_map(|c| c.items.iter())
        .take(SUMMARY_LIMIT)
        .map(|item| item.name.as_str())
        .collect();

    if total > TRUNCATION_THRESHOLD {
        selected.push(TRUNCATION_MARKER);
    }

    selected.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("skill{i}")).collect()
    }

    #[test]
    fn test_no_source_is_empty() {
        assert_eq!(skills_summary(None), "");
    }

    #[test]
    fn test_small_source_has_no_marker() {
        let source = vec![SkillCategory::new(["Rust", "Python"]), SkillCategory::new(["Docker"])];
        assert_eq!(skills_summary(Some(&source)), "Rust, Python, Docker");

        let five = vec![SkillCategory::new(names(5))];
        assert!(!skills_summary(Some(&five)).contains(TRUNCATION_MARKER));
    }

    #[test]
    fn test_large_source_is_truncated_to_ten() {
        let source = vec![
            SkillCategory::new(names(12).into_iter().take(7)),
            SkillCategory::new(names(12).into_iter().skip(7)),
        ];

        let expected = format!("{}, ...", names(10).join(", "));
        assert_eq!(skills_summary(Some(&source)), expected);
    }

    #[test]
    fn test_six_items_lists_all_and_marks() {
        let source = vec![SkillCategory::new(names(6))];
        assert_eq!(
            skills_summary(Some(&source)),
            "skill1, skill2, skill3, skill4, skill5, skill6, ..."
        );
    }

    #[test]
    fn test_empty_categories() {
        let source = vec![SkillCategory::default(), SkillCategory::default()];
        assert_eq!(skills_summary(Some(&source)), "");
    }

    #[test]
    fn test_deserialize_shape() {
        let json = r#"[{"items":[{"name":"Rust"},{"name":"Go"}]},{"items":[]}]"#;
        let parsed: Vec<SkillCategory> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].items[1].name, "Go");
    }
}
