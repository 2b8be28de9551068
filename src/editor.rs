//! Offset-keyed string editing.
//!
//! [`RangeEditor`] collects replacements addressed by byte ranges of an
//! original text and renders the edited text in one pass. Ranges always
//! refer to the original text, so replacements can be registered in any
//! order without shifting each other.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::error::ConflictError;

/// A replacement of one byte range of the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementRange {
    /// First replaced byte.
    pub start: usize,
    /// One past the last replaced byte.
    pub end: usize,
    /// Text written in place of the range.
    pub text: String,
}

impl ReplacementRange {
    /// Creates a replacement of `range` by `text`.
    pub fn new(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            start: range.start,
            end: range.end,
            text: text.into(),
        }
    }

    /// The replaced byte range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    fn overlaps(&self, other: &Range<usize>) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Editor for replacing non-overlapping ranges of a text.
///
/// The original text is borrowed and never modified.
///
/// # Example
///
/// ```rust
/// use classalias::RangeEditor;
///
/// let mut editor = RangeEditor::new("<div *btn *card>");
/// editor.overwrite(10..15, "p-4").unwrap();
/// editor.overwrite(5..9, "px-2 py-1").unwrap();
///
/// assert_eq!(editor.apply(), "<div px-2 py-1 p-4>");
/// assert!(editor.overwrite(6..12, "x").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RangeEditor<'a> {
    original: &'a str,
    ranges: BTreeMap<usize, ReplacementRange>,
}

impl<'a> RangeEditor<'a> {
    /// Creates an editor over `original` with no replacements.
    pub fn new(original: &'a str) -> Self {
        Self {
            original,
            ranges: BTreeMap::new(),
        }
    }

    /// Returns the text being edited.
    pub fn original(&self) -> &'a str {
        self.original
    }

    /// Registers a replacement of `range` by `text`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConflictError`] if `range` overlaps a registered range.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds, reversed, or does not fall on
    /// UTF-8 character boundaries of the original text.
    pub fn overwrite(
        &mut self,
        range: Range<usize>,
        text: impl Into<String>,
    ) -> Result<(), ConflictError> {
        self.insert(ReplacementRange::new(range, text))
    }

    /// Registers several replacements at once.
    ///
    /// Either every replacement is registered or, on conflict, none is.
    ///
    /// # Errors
    ///
    /// Returns a [`ConflictError`] if any replacement overlaps a registered
    /// range or another replacement of the batch.
    pub fn overwrite_all<I>(&mut self, replacements: I) -> Result<(), ConflictError>
    where
        I: IntoIterator<Item = ReplacementRange>,
    {
        let mut staged = self.clone();
        for replacement in replacements {
            staged.insert(replacement)?;
        }
        self.ranges = staged.ranges;
        Ok(())
    }

    fn insert(&mut self, replacement: ReplacementRange) -> Result<(), ConflictError> {
        let range = replacement.range();
        assert!(
            range.start <= range.end
                && self.original.is_char_boundary(range.start)
                && self.original.is_char_boundary(range.end),
            "replacement range {:?} is not a valid range of the original text",
            range
        );

        if let Some(existing) = self.conflict_with(&range) {
            return Err(ConflictError {
                existing: existing.range(),
                conflicting: range,
            });
        }

        self.ranges.insert(range.start, replacement);
        Ok(())
    }

    fn conflict_with(&self, range: &Range<usize>) -> Option<&ReplacementRange> {
        // Registered ranges are sorted and disjoint, so only the last one
        // starting at or before `range.start` and the first one after it
        // can touch `range`. Equal starts always conflict, empty ranges
        // included.
        let before = self.ranges.range(..=range.start).next_back();
        let after = self.ranges.range(range.start + 1..).next();

        [before, after]
            .into_iter()
            .flatten()
            .map(|(_, r)| r)
            .find(|r| r.overlaps(range) || r.start == range.start)
    }

    /// Returns true if any replacement is registered.
    pub fn has_changed(&self) -> bool {
        !self.ranges.is_empty()
    }

    /// Returns the number of registered replacements.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns true if no replacement is registered.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Iterates over the registered replacements in ascending order.
    pub fn replacements(&self) -> impl Iterator<Item = &ReplacementRange> {
        self.ranges.values()
    }

    /// Renders the edited text.
    ///
    /// Bytes outside every replacement are copied unchanged.
    pub fn apply(&self) -> String {
        let extra: usize = self.ranges.values().map(|r| r.text.len()).sum();
        let mut out = String::with_capacity(self.original.len() + extra);
        let mut cursor = 0;

        for replacement in self.ranges.values() {
            out.push_str(&self.original[cursor..replacement.start]);
            out.push_str(&replacement.text);
            cursor = replacement.end;
        }
        out.push_str(&self.original[cursor..]);

        out
    }
}

impl std::fmt::Display for RangeEditor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.apply())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_replacements_is_identity() {
        let editor = RangeEditor::new("<div class=\"a\">");
        assert_eq!(editor.apply(), "<div class=\"a\">");
        assert!(!editor.has_changed());
        assert!(editor.is_empty());
    }

    #[test]
    fn test_order_independent() {
        let text = "aa *x bb *y cc";
        let mut forward = RangeEditor::new(text);
        forward.overwrite(3..5, "X1 X2").unwrap();
        forward.overwrite(9..11, "Y").unwrap();

        let mut backward = RangeEditor::new(text);
        backward.overwrite(9..11, "Y").unwrap();
        backward.overwrite(3..5, "X1 X2").unwrap();

        assert_eq!(forward.apply(), "aa X1 X2 bb Y cc");
        assert_eq!(forward.apply(), backward.apply());
    }

    #[test]
    fn test_adjacent_ranges_allowed() {
        let mut editor = RangeEditor::new("abcdef");
        editor.overwrite(0..2, "X").unwrap();
        editor.overwrite(2..4, "Y").unwrap();
        assert_eq!(editor.apply(), "XYef");
    }

    #[test]
    fn test_overlap_rejected() {
        let mut editor = RangeEditor::new("abcdef");
        editor.overwrite(1..4, "X").unwrap();

        let err = editor.overwrite(3..5, "Y").unwrap_err();
        assert_eq!(
            err,
            ConflictError {
                existing: 1..4,
                conflicting: 3..5
            }
        );
        assert!(editor.overwrite(0..2, "Z").is_err());
        assert!(editor.overwrite(2..3, "Z").is_err());
        assert!(editor.overwrite(0..6, "Z").is_err());
        assert!(editor.overwrite(1..4, "Z").is_err());
        assert_eq!(editor.len(), 1);
    }

    #[test]
    fn test_empty_insertions() {
        let mut editor = RangeEditor::new("abc");
        editor.overwrite(1..1, "X").unwrap();
        assert!(editor.overwrite(1..1, "Y").is_err());
        assert!(editor.overwrite(0..2, "Y").is_err());
        editor.overwrite(1..3, "Z").unwrap_err();
        assert_eq!(editor.apply(), "aXbc");
    }

    #[test]
    fn test_overwrite_all_is_atomic() {
        let mut editor = RangeEditor::new("abcdef");
        editor.overwrite(0..1, "A").unwrap();

        let result = editor.overwrite_all(vec![
            ReplacementRange::new(2..3, "C"),
            ReplacementRange::new(4..6, "EF"),
            ReplacementRange::new(5..6, "F"),
        ]);
        assert!(result.is_err());
        assert_eq!(editor.len(), 1);
        assert_eq!(editor.apply(), "Abcdef");

        editor
            .overwrite_all(vec![
                ReplacementRange::new(4..6, "EF"),
                ReplacementRange::new(2..3, "C"),
            ])
            .unwrap();
        assert_eq!(editor.apply(), "AbCdEF");
    }

    #[test]
    fn test_multibyte_text_preserved() {
        let text = "<p title=\"héllo\" *x>ü</p>";
        let start = text.find("*x").unwrap();
        let mut editor = RangeEditor::new(text);
        editor.overwrite(start..start + 2, "m-1").unwrap();
        assert_eq!(editor.to_string(), "<p title=\"héllo\" m-1>ü</p>");
    }

    #[test]
    #[should_panic(expected = "not a valid range")]
    fn test_range_inside_char_panics() {
        let mut editor = RangeEditor::new("é");
        let _ = editor.overwrite(1..2, "x");
    }

    #[test]
    fn test_replacements_sorted() {
        let mut editor = RangeEditor::new("0123456789");
        editor.overwrite(7..8, "b").unwrap();
        editor.overwrite(1..2, "a").unwrap();
        let starts: Vec<_> = editor.replacements().map(|r| r.start).collect();
        assert_eq!(starts, vec![1, 7]);
        assert_eq!(editor.original(), "0123456789");
    }
}
