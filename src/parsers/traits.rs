use super::section::Table;

/// One pass over a report that picks out its dashed-delimited tables.
pub trait SectionExtractor {
    /// Collect the tables this pass owns, in source order.
    fn extract<I, S>(lines: I) -> Vec<Table>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>;

    /// Whether the content holds the section this pass looks for at all.
    fn is_supported(content: &str) -> bool;
}
