/// A span which uniquely specifies a range of characters across all input files
///
/// Every input file occupies its own offset range, see [`crate::InputFiles`].
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, PartialOrd, Ord, Default)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    /// The span of synthesized trees which have no source
    pub const EMPTY: Span = Span { start: 0, len: 0 };

    /// Creates a new `Span` from the starting character and its length
    pub fn new(start: usize, len: usize) -> Self {
        Span { start, len }
    }

    /// Returns the start of this span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the end of this span
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Returns the length of this span
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns, whether this span is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Constructs a new span which ranges from the start of this span to the end of the other span
    pub fn until(&self, other: Span) -> Self {
        assert!(
            self.start <= other.end(),
            "Span length must not be negative"
        );
        Span::new(self.start, other.end() - self.start)
    }

    /// Moves this span `offset` characters to the left
    pub fn relative_to(&self, offset: usize) -> Self {
        Span::new(self.start - offset, self.len)
    }

    /// Converts the byte offsets of this (file-relative) span to character offsets in `text`.
    /// `annotate_snippets` counts characters, not bytes.
    pub fn char_bounds(&self, text: &str) -> (usize, usize) {
        let start = text
            .get(..self.start)
            .map_or(self.start, |prefix| prefix.chars().count());
        let len = text
            .get(self.start..self.end())
            .map_or(self.len, |content| content.chars().count());
        (start, start + len)
    }

    /// Returns a tuple of the format (start_index, end_index)
    pub fn as_tuple(&self) -> (usize, usize) {
        (self.start, self.end())
    }
}

#[cfg(test)]
mod tests {

    use crate::Span;

    #[test]
    fn span_correct() {
        let span = Span::new(0, 1);

        assert_eq!(span.start(), 0);
        assert_eq!(span.end(), 1);
        assert_eq!(span.len(), 1);
        assert_eq!(span.as_tuple(), (0, 1));
    }

    #[test]
    fn span_until() {
        let span = Span::new(2, 3).until(Span::new(7, 2));
        assert_eq!(span, Span::new(2, 7));
    }

    #[test]
    fn span_char_bounds() {
        let text = "val ä = b";
        // 'ä' is two bytes long
        let span = Span::new(8, 1);
        assert_eq!(span.char_bounds(text), (7, 8));
    }
}
