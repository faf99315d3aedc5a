//! Search-as-you-type filtering for the ticket, lot and spot tables.

use std::io::BufRead;

use crate::error::ParkingError;

/// Heading of the block shown when a search matches nothing.
pub const EMPTY_STATE_TITLE: &str = "No results found";
/// Hint under [`EMPTY_STATE_TITLE`].
pub const EMPTY_STATE_HINT: &str = "Try adjusting your search terms";

/// Trait providing line-based loading of table rows.
pub trait RowSource {
    /// Reads one row per non-empty line, keeping the line text as the row text.
    fn read_rows<R: BufRead>(reader: R) -> Result<Vec<String>, ParkingError>;
}

impl RowSource for Vec<String> {
    fn read_rows<R: BufRead>(reader: R) -> Result<Vec<String>, ParkingError> {
        let mut rows = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(ParkingError::Io)?;
            if line.trim().is_empty() {
                continue;
            }
            rows.push(line);
        }
        Ok(rows)
    }
}

/// Result of matching a query against every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// One flag per input row, in order.
    pub visible: Vec<bool>,
    pub visible_count: usize,
    /// Whether the empty-state block replaces the table.
    pub show_empty_state: bool,
}

/// Case-insensitive substring match of `query` against each row's text.
///
/// An empty query matches every row.
pub fn filter_rows<S: AsRef<str>>(rows: &[S], query: &str) -> SearchOutcome {
    let needle = query.to_lowercase();
    let visible: Vec<bool> = rows
        .iter()
        .map(|row| row.as_ref().to_lowercase().contains(&needle))
        .collect();
    let visible_count = visible.iter().filter(|shown| **shown).count();

    SearchOutcome {
        show_empty_state: visible_count == 0 && !needle.is_empty(),
        visible,
        visible_count,
    }
}

/// A table bound to its search box.
///
/// Holds the rows and the display state that the keystroke handler toggles.
#[derive(Debug, Clone)]
pub struct SearchView {
    rows: Vec<String>,
    row_visible: Vec<bool>,
    table_visible: bool,
    empty_state_visible: bool,
    last: SearchOutcome,
}

impl SearchView {
    pub fn new(rows: Vec<String>) -> Self {
        let last = filter_rows(rows.as_slice(), "");
        Self {
            row_visible: last.visible.clone(),
            rows,
            table_visible: true,
            empty_state_visible: false,
            last,
        }
    }

    /// Re-filters the table for the current content of the search box.
    pub fn on_input(&mut self, query: &str) -> &SearchOutcome {
        let outcome = filter_rows(self.rows.as_slice(), query);
        self.row_visible.clone_from(&outcome.visible);
        self.empty_state_visible = outcome.show_empty_state;
        self.table_visible = !outcome.show_empty_state;
        self.last = outcome;
        &self.last
    }

    /// Rows currently displayed, in table order.
    pub fn visible_rows(&self) -> Vec<&str> {
        self.rows
            .iter()
            .zip(&self.row_visible)
            .filter(|(_, shown)| **shown)
            .map(|(row, _)| row.as_str())
            .collect()
    }

    pub fn is_row_visible(&self, index: usize) -> bool {
        self.row_visible.get(index).copied().unwrap_or(false)
    }

    pub fn table_visible(&self) -> bool {
        self.table_visible
    }

    pub fn empty_state_visible(&self) -> bool {
        self.empty_state_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn filters_case_insensitively() {
        let rows = ["Alice A12", "Bob B07"];
        let outcome = filter_rows(&rows, "a12");
        assert_eq!(outcome.visible, vec![true, false]);
        assert_eq!(outcome.visible_count, 1);
        assert!(!outcome.show_empty_state);
    }

    #[test]
    fn no_match_shows_empty_state() {
        let rows = ["Alice A12", "Bob B07"];
        let outcome = filter_rows(&rows, "zzz");
        assert_eq!(outcome.visible, vec![false, false]);
        assert!(outcome.show_empty_state);
    }

    #[test]
    fn empty_query_shows_everything_and_no_empty_state() {
        let rows: [&str; 0] = [];
        let outcome = filter_rows(rows.as_slice(), "");
        assert_eq!(outcome.visible_count, 0);
        assert!(!outcome.show_empty_state);

        let outcome = filter_rows(&["x", "y"], "");
        assert_eq!(outcome.visible_count, 2);
    }

    #[test]
    fn view_toggles_table_and_empty_state() {
        let mut view = SearchView::new(vec!["Alice A12".into(), "Bob B07".into()]);
        view.on_input("A12");
        assert_eq!(view.visible_rows(), vec!["Alice A12"]);
        assert!(view.is_row_visible(0));
        assert!(!view.is_row_visible(1));
        assert!(view.table_visible());
        assert!(!view.empty_state_visible());

        view.on_input("zzz");
        assert!(view.visible_rows().is_empty());
        assert!(!view.table_visible());
        assert!(view.empty_state_visible());

        view.on_input("");
        assert_eq!(view.visible_rows().len(), 2);
        assert!(view.table_visible());
        assert!(!view.empty_state_visible());
    }

    #[test]
    fn reads_rows_skipping_blank_lines() {
        let input = Cursor::new("Alice A12\n\n  \nBob B07\n");
        let rows = Vec::<String>::read_rows(input).unwrap();
        assert_eq!(rows, vec!["Alice A12".to_string(), "Bob B07".to_string()]);
    }
}
