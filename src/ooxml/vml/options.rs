/// Configuration for geometry resolution.
///
/// Two generations of the text-box reader disagreed on where
/// `mso-position-vertical-relative` falls back to when a shape does not set
/// it. The order is selected here, once, when the tree is built.
///
/// # Examples
///
/// ```rust
/// use vml_textbox::ooxml::vml::{ResolveOptions, VerticalRelativeOrder};
///
/// // Create with defaults
/// let options = ResolveOptions::default();
/// assert_eq!(options.vertical_relative_order, VerticalRelativeOrder::DrawingFirst);
///
/// // Or customize
/// let options = ResolveOptions::new()
///     .with_vertical_relative_order(VerticalRelativeOrder::HeightRelativeFirst);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Fallback order for the vertical relative-from frame
    pub vertical_relative_order: VerticalRelativeOrder,
}

impl ResolveOptions {
    /// Create a new `ResolveOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback order for `mso-position-vertical-relative`.
    #[inline]
    pub fn with_vertical_relative_order(mut self, order: VerticalRelativeOrder) -> Self {
        self.vertical_relative_order = order;
        self
    }
}

/// Fallback order used when a shape does not declare
/// `mso-position-vertical-relative` itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerticalRelativeOrder {
    /// Enclosing drawing anchor, then the nearest shape-like ancestor.
    #[default]
    DrawingFirst,
    /// `mso-height-relative`, then the nearest shape-like ancestor; the
    /// drawing anchor is consulted only by the outermost shape-like node.
    HeightRelativeFirst,
}
