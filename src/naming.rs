//! Document filename parsing.
//!
//! Book documents are named by a kebab-case slug (`avoid-optional.md`). A
//! document without a `#` heading is titled after its stem.
//!
//! - `avoid-optional` → "avoid optional"
//! - `2024-retrospective` → "2024 retrospective"
//! - `index` → "index"

/// Fallback title for a document stem: dashes become spaces, nothing else
/// changes.
pub fn title_from_stem(stem: &str) -> String {
    stem.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashes_become_spaces() {
        assert_eq!(title_from_stem("avoid-optional"), "avoid optional");
        assert_eq!(title_from_stem("ts-vs-js"), "ts vs js");
    }

    #[test]
    fn single_word() {
        assert_eq!(title_from_stem("allowjs"), "allowjs");
    }

    #[test]
    fn leading_number_is_kept() {
        assert_eq!(title_from_stem("2024-retrospective"), "2024 retrospective");
        assert_eq!(title_from_stem("001"), "001");
    }

    #[test]
    fn case_preserved() {
        assert_eq!(title_from_stem("README"), "README");
    }
}
