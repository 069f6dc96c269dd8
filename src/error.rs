//! Error types for loading blueprints
//!
//! The anchoring engine itself never fails; everything here is about turning
//! a textual scene description into nodes and bindings.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlueprintError {
    #[error("failed to read blueprint: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse blueprint TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A name that does not match any `[[node]]` id
    #[error("unknown node '{name}' in {context}{}", format_suggestions(.suggestions))]
    UnknownNode {
        name: String,
        context: &'static str,
        suggestions: Vec<String>,
    },

    #[error("node '{name}' is defined more than once")]
    DuplicateNode { name: String },

    #[error("node '{name}' is its own ancestor")]
    ParentCycle { name: String },

    #[error("anchor on '{node}' needs either `edge` and `to`, or `fill = true`")]
    IncompleteAnchor { node: String },

    #[error("anchor on '{node}' cannot combine `fill` with `edge`/`to`")]
    ConflictingAnchor { node: String },

    #[error("anchor on '{node}' refers to its parent, but it has none")]
    NoParent { node: String },

    #[error("invalid geometry for node '{node}': {reason}")]
    InvalidGeometry { node: String, reason: String },
}

impl BlueprintError {
    /// Create an unknown-node error, suggesting close matches from `known`
    pub fn unknown<'a>(
        name: impl Into<String>,
        context: &'static str,
        known: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let name = name.into();
        let suggestions = find_similar(known, &name, 2);
        Self::UnknownNode {
            name,
            context,
            suggestions,
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}

/// Edit distance between two strings, counted in chars
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0usize; b_chars.len() + 1];

    for (i, a_char) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != *b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b_chars.len()]
}

/// Up to three names within `max_distance` edits of `target`, closest first
fn find_similar<'a>(
    known: impl IntoIterator<Item = &'a str>,
    target: &str,
    max_distance: usize,
) -> Vec<String> {
    let mut candidates: Vec<(&str, usize)> = known
        .into_iter()
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist <= max_distance && dist > 0).then_some((name, dist))
        })
        .collect();

    candidates.sort_by(|(a, da), (b, db)| da.cmp(db).then_with(|| a.cmp(b)));
    candidates
        .into_iter()
        .map(|(name, _)| name.to_string())
        .take(3)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_same() {
        assert_eq!(levenshtein_distance("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_edits() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("panel", "panels"), 1);
    }

    #[test]
    fn test_unknown_node_suggests_close_names() {
        let err = BlueprintError::unknown("pannel", "anchor", ["panel", "label", "title"]);
        assert_eq!(
            err.to_string(),
            "unknown node 'pannel' in anchor (did you mean panel?)"
        );
    }

    #[test]
    fn test_unknown_node_without_suggestions() {
        let err = BlueprintError::unknown("zzz", "update", ["panel"]);
        assert_eq!(err.to_string(), "unknown node 'zzz' in update");
    }
}
