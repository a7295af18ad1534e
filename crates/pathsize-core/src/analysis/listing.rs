/// Sorted listing: a directory's immediate children, smallest first,
/// followed by a summary row for the directory itself.
use crate::error::Result;
use crate::model::{humanize, ColumnWidths, PathNode, PathRegistry};
use std::fmt;

/// One row in the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    /// Canonical path of the entry.
    pub path: String,
    /// Cumulative size in bytes.
    pub size: u64,
    /// `size` rendered by [`humanize`].
    pub human_size: String,
}

impl ListingRow {
    fn of(node: &PathNode, registry: &PathRegistry) -> Result<Self> {
        let size = node.size(registry)?;
        Ok(Self {
            path: node.path().to_string(),
            size,
            human_size: humanize(size),
        })
    }
}

/// Listing of one node: children ascending by size, then the node itself.
#[derive(Debug, Clone)]
pub struct ListingReport {
    /// Children sorted ascending by size. Ties keep enumeration order.
    pub entries: Vec<ListingRow>,
    /// Summary row for the listed node.
    pub total: ListingRow,
    widths: ColumnWidths,
}

impl ListingReport {
    /// Build the listing for `node` with the default column widths.
    ///
    /// Forces the size of every child (and so of the whole subtree).
    pub fn build(node: &PathNode, registry: &PathRegistry) -> Result<Self> {
        Self::build_with(node, registry, ColumnWidths::default())
    }

    pub fn build_with(
        node: &PathNode,
        registry: &PathRegistry,
        widths: ColumnWidths,
    ) -> Result<Self> {
        let mut entries = node
            .children(registry)
            .iter()
            .map(|child| ListingRow::of(child, registry))
            .collect::<Result<Vec<_>>>()?;
        // Stable: equal sizes stay in enumeration order.
        entries.sort_by_key(|row| row.size);

        Ok(Self {
            entries,
            total: ListingRow::of(node, registry)?,
            widths,
        })
    }

    /// Keep only the `n` largest children, still in ascending order.
    pub fn top(mut self, n: usize) -> Self {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.drain(..skip);
        self
    }

    /// Rendered lines: one per child, a blank separator, then the summary.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .entries
            .iter()
            .map(|row| self.widths.format_row(&row.path, &row.human_size))
            .collect();
        lines.push(String::new());
        lines.push(
            self.widths
                .format_row(&self.total.path, &self.total.human_size),
        );
        lines
    }
}

impl fmt::Display for ListingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
