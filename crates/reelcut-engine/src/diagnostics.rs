//! Non-fatal conditions reported alongside a selection.

use serde::Serialize;

/// A non-fatal condition found while selecting scenes.
///
/// Diagnostics never stop the pipeline; they are returned to the caller
/// and logged at `warn` level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Fewer positive-score candidates than `min_count` existed for a section.
    UnderfilledRequirement {
        section_id: String,
        min_count: usize,
        available: usize,
    },
    /// No scene was selected for any section.
    EmptySelection,
}

impl Diagnostic {
    pub fn underfilled(section_id: impl Into<String>, min_count: usize, available: usize) -> Self {
        Self::UnderfilledRequirement {
            section_id: section_id.into(),
            min_count,
            available,
        }
    }

    /// Section the diagnostic refers to, if it is section-specific.
    pub fn section_id(&self) -> Option<&str> {
        match self {
            Diagnostic::UnderfilledRequirement { section_id, .. } => Some(section_id),
            Diagnostic::EmptySelection => None,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnderfilledRequirement {
                section_id,
                min_count,
                available,
            } => write!(
                f,
                "Section '{}' wants at least {} scenes but only {} matched",
                section_id, min_count, available
            ),
            Diagnostic::EmptySelection => write!(f, "No scenes were selected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_serialize() {
        let diagnostic = Diagnostic::underfilled("climax", 3, 1);
        assert_eq!(diagnostic.section_id(), Some("climax"));
        assert_eq!(
            diagnostic.to_string(),
            "Section 'climax' wants at least 3 scenes but only 1 matched"
        );

        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["kind"], "underfilled_requirement");
        assert_eq!(json["available"], 1);

        assert_eq!(Diagnostic::EmptySelection.section_id(), None);
    }
}
