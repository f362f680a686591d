//! Ready-made leaf widgets.

use sizekit_core::Size;
use unicode_width::UnicodeWidthStr;

use crate::sizeable::{LayoutState, Sizeable};

/// A widget with a constant natural size.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fixed {
    size: Size,
    state: LayoutState,
}

impl Fixed {
    /// Leaf that always requests `size`, expandable on both axes.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            state: LayoutState::new(),
        }
    }

    /// Change the natural size. Takes effect on the next request.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}

impl Sizeable for Fixed {
    fn layout_state(&self) -> &LayoutState {
        &self.state
    }

    fn layout_state_mut(&mut self) -> &mut LayoutState {
        &mut self.state
    }

    fn compute_size(&mut self) -> Size {
        self.size
    }

    fn kind(&self) -> &'static str {
        "fixed"
    }
}

/// Text whose natural size follows its display width.
///
/// Each line is measured in terminal columns (wide glyphs count double),
/// then scaled by the size of one glyph cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String,
    glyph: Size,
    state: LayoutState,
}

impl Label {
    /// Label measured in 1x1 glyph cells.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            glyph: Size::new(1, 1),
            state: LayoutState::new(),
        }
    }

    /// Set the size of one glyph cell.
    #[must_use]
    pub fn glyph(mut self, glyph: Size) -> Self {
        self.glyph = glyph;
        self
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. The new size shows up on the next request.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Sizeable for Label {
    fn layout_state(&self) -> &LayoutState {
        &self.state
    }

    fn layout_state_mut(&mut self) -> &mut LayoutState {
        &mut self.state
    }

    fn compute_size(&mut self) -> Size {
        let (columns, rows) = self.text.lines().fold((0usize, 0usize), |(columns, rows), line| {
            (columns.max(UnicodeWidthStr::width(line)), rows + 1)
        });
        let columns = u32::try_from(columns).unwrap_or(u32::MAX);
        let rows = u32::try_from(rows).unwrap_or(u32::MAX);
        Size::new(
            columns.saturating_mul(self.glyph.width),
            rows.saturating_mul(self.glyph.height),
        )
    }

    fn kind(&self) -> &'static str {
        "label"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizekit_core::SizeAllocation;

    #[test]
    fn fixed_reports_its_size() {
        let mut leaf = Fixed::new(Size::new(7, 3));
        assert_eq!(leaf.request_size(), Size::new(7, 3));
        leaf.set_size(Size::new(1, 1));
        assert_eq!(leaf.requested_size(), Some(Size::new(7, 3)));
        assert_eq!(leaf.request_size(), Size::new(1, 1));
    }

    #[test]
    fn label_measures_widest_line() {
        let mut label = Label::new("hello\nhi\nworld!");
        assert_eq!(label.request_size(), Size::new(6, 3));
    }

    #[test]
    fn label_counts_wide_glyphs_double() {
        let mut label = Label::new("日本").glyph(Size::new(8, 16));
        assert_eq!(label.request_size(), Size::new(32, 16));
    }

    #[test]
    fn empty_label_is_zero() {
        let mut label = Label::new("");
        assert_eq!(label.request_size(), Size::ZERO);
        label.set_text("ab");
        assert_eq!(label.text(), "ab");
        assert_eq!(label.request_size(), Size::new(2, 1));
    }

    #[test]
    fn label_allocation_follows_protocol() {
        let mut label = Label::new("abc");
        label.request_size();
        label
            .allocate_size(SizeAllocation::from_parts(2, 2, 10, 1))
            .unwrap();
        assert_eq!(
            label.allocated_size(),
            Some(SizeAllocation::from_parts(2, 2, 10, 1))
        );
    }
}
