//! In-memory credential table with per-row edit state.
//!
//! The state of a row only decides what happens on the next save:
//! `Deleted` rows are left out, everything else is written.  States are
//! never persisted and are reset to `Unchanged` after every successful
//! load or save.

use crate::errors::{Result, VaultError};

/// Lifecycle of one data row since the last load or save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowState {
    /// Loaded or saved, not touched since.
    #[default]
    Unchanged,
    /// Inserted since the last save.
    New,
    /// A previously saved row with at least one edited cell.
    Modified,
    /// A previously saved row marked for removal on the next save.
    Deleted,
}

#[derive(Debug, Clone)]
struct Row {
    cells: Vec<String>,
    state: RowState,
}

/// A header row plus data rows, each data row tracking its `RowState`.
#[derive(Debug, Clone, Default)]
pub struct VaultTable {
    header: Vec<String>,
    rows: Vec<Row>,
}

impl VaultTable {
    /// Build a table with the given column names and no data rows.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Result<Self> {
        let header: Vec<String> = columns.into_iter().map(Into::into).collect();
        if header.is_empty() {
            return Err(VaultError::NoColumns);
        }
        Ok(Self {
            header,
            rows: Vec::new(),
        })
    }

    /// Build a table from decoded rows (`rows[0]` is the header).
    /// Every data row starts out `Unchanged`.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let mut iter = rows.into_iter();
        let header = iter.next().unwrap_or_default();
        Self {
            header,
            rows: iter
                .map(|cells| Row {
                    cells,
                    state: RowState::Unchanged,
                })
                .collect(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Number of data rows, including rows marked `Deleted`.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Result<&[String]> {
        self.rows
            .get(index)
            .map(|r| r.cells.as_slice())
            .ok_or(VaultError::RowNotFound(index))
    }

    pub fn state(&self, index: usize) -> Result<RowState> {
        self.rows
            .get(index)
            .map(|r| r.state)
            .ok_or(VaultError::RowNotFound(index))
    }

    /// Iterate over `(index, state, cells)` for every data row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, RowState, &[String])> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, r)| (i, r.state, r.cells.as_slice()))
    }

    /// Rows where any cell contains `needle` (case-sensitive).
    /// An empty needle matches every row, and a row with no text yet
    /// always matches so a freshly added row stays visible.
    pub fn filter<'a>(
        &'a self,
        needle: &'a str,
    ) -> impl Iterator<Item = (usize, RowState, &'a [String])> + 'a {
        self.iter().filter(move |(_, _, cells)| {
            needle.is_empty()
                || cells.iter().all(|c| c.is_empty())
                || cells.iter().any(|c| c.contains(needle))
        })
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| VaultError::ColumnNotFound(name.to_string()))
    }

    /// True if any row is not `Unchanged`.
    pub fn needs_save(&self) -> bool {
        self.rows.iter().any(|r| r.state != RowState::Unchanged)
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Append a row.  Missing cells are padded with empty strings; extra
    /// cells are rejected.
    pub fn add_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) -> Result<usize> {
        let mut cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        if cells.len() > self.header.len() {
            return Err(VaultError::TooManyValues {
                expected: self.header.len(),
                found: cells.len(),
            });
        }
        cells.resize(self.header.len(), String::new());

        self.rows.push(Row {
            cells,
            state: RowState::New,
        });
        Ok(self.rows.len() - 1)
    }

    /// Replace one cell.  Returns `false` if the text was already equal.
    pub fn set_cell(&mut self, index: usize, column: usize, value: &str) -> Result<bool> {
        let width = self.header.len();
        let row = self
            .rows
            .get_mut(index)
            .ok_or(VaultError::RowNotFound(index))?;
        let cell = row
            .cells
            .get_mut(column)
            .ok_or_else(|| VaultError::ColumnNotFound(format!("#{column} of {width}")))?;

        if cell == value {
            return Ok(false);
        }
        *cell = value.to_string();

        if row.state == RowState::Unchanged {
            row.state = RowState::Modified;
        }
        Ok(true)
    }

    /// Delete a row.  A never-saved row disappears at once; a saved row
    /// becomes a `Deleted` tombstone until the next save.
    pub fn delete_row(&mut self, index: usize) -> Result<()> {
        match self.state(index)? {
            RowState::New => {
                self.rows.remove(index);
            }
            RowState::Unchanged | RowState::Modified => {
                self.rows[index].state = RowState::Deleted;
            }
            RowState::Deleted => {}
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Persistence support
    // ------------------------------------------------------------------

    /// The rows a save writes: header first, then every non-`Deleted` row.
    pub fn retained_rows(&self) -> Vec<Vec<String>> {
        std::iter::once(self.header.clone())
            .chain(
                self.rows
                    .iter()
                    .filter(|r| r.state != RowState::Deleted)
                    .map(|r| r.cells.clone()),
            )
            .collect()
    }

    /// Drop tombstones and mark every remaining row `Unchanged`.
    pub fn mark_saved(&mut self) {
        self.rows.retain(|r| r.state != RowState::Deleted);
        for row in &mut self.rows {
            row.state = RowState::Unchanged;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> VaultTable {
        VaultTable::from_rows(vec![
            vec!["Account".into(), "Username".into()],
            vec!["bank".into(), "alice".into()],
            vec!["mail".into(), "bob".into()],
        ])
    }

    #[test]
    fn loaded_rows_start_unchanged() {
        let t = loaded();
        assert_eq!(t.state(0).unwrap(), RowState::Unchanged);
        assert!(!t.needs_save());
    }

    #[test]
    fn editing_saved_row_marks_modified() {
        let mut t = loaded();
        assert!(t.set_cell(0, 1, "carol").unwrap());
        assert_eq!(t.state(0).unwrap(), RowState::Modified);
        assert!(t.needs_save());
    }

    #[test]
    fn editing_to_same_text_is_noop() {
        let mut t = loaded();
        assert!(!t.set_cell(0, 1, "alice").unwrap());
        assert_eq!(t.state(0).unwrap(), RowState::Unchanged);
    }

    #[test]
    fn editing_new_row_keeps_it_new() {
        let mut t = loaded();
        let i = t.add_row(["shop"]).unwrap();
        t.set_cell(i, 1, "dave").unwrap();
        assert_eq!(t.state(i).unwrap(), RowState::New);
        assert_eq!(t.row(i).unwrap(), ["shop", "dave"]);
    }

    #[test]
    fn deleting_new_row_removes_it() {
        let mut t = loaded();
        let i = t.add_row(["x", "y"]).unwrap();
        t.delete_row(i).unwrap();
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn deleting_saved_row_leaves_tombstone() {
        let mut t = loaded();
        t.set_cell(1, 0, "post").unwrap();
        t.delete_row(1).unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.state(1).unwrap(), RowState::Deleted);

        let retained = t.retained_rows();
        assert_eq!(retained.len(), 2);
        assert_eq!(retained[1], ["bank", "alice"]);
    }

    #[test]
    fn mark_saved_resets_states_and_drops_tombstones() {
        let mut t = loaded();
        t.delete_row(0).unwrap();
        t.add_row(["new", "row"]).unwrap();
        t.mark_saved();

        assert_eq!(t.len(), 2);
        assert!(t.iter().all(|(_, s, _)| s == RowState::Unchanged));
        assert!(!t.needs_save());
    }

    #[test]
    fn add_row_rejects_too_many_cells() {
        let mut t = loaded();
        let result = t.add_row(["a", "b", "c"]);
        assert!(matches!(
            result,
            Err(VaultError::TooManyValues {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn table_without_columns_is_rejected() {
        let result = VaultTable::new(Vec::<String>::new());
        assert!(matches!(result, Err(VaultError::NoColumns)));
    }

    #[test]
    fn filter_matches_any_cell() {
        let t = loaded();
        let hits: Vec<usize> = t.filter("bo").map(|(i, _, _)| i).collect();
        assert_eq!(hits, vec![1]);
        assert_eq!(t.filter("").count(), 2);
        assert_eq!(t.filter("BOB").count(), 0);
    }

    #[test]
    fn filter_keeps_blank_rows_visible() {
        let mut t = loaded();
        let blank = t.add_row(std::iter::empty::<String>()).unwrap();
        let half = t.add_row(["", "eve"]).unwrap();

        let hits: Vec<usize> = t.filter("bo").map(|(i, _, _)| i).collect();
        assert_eq!(hits, vec![1, blank]);
        assert!(!hits.contains(&half));
    }

    #[test]
    fn out_of_range_row_is_error() {
        let mut t = loaded();
        assert!(matches!(t.delete_row(9), Err(VaultError::RowNotFound(9))));
        assert!(t.column_index("Password").is_err());
    }
}
