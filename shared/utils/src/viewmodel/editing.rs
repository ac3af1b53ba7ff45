//! Local column and task edits.
//!
//! Client-side only: nothing here is sent to the backend, and a fresh board
//! payload replaces every edit. Each operation touches only the column it
//! targets and reports whether it changed anything.

use aqs_models::{Column, Task};
use chrono::{Local, NaiveDate};

/// The first column receives new tasks and cannot be deleted.
pub const PROTECTED_COLUMN_INDEX: usize = 0;

/// Append a draft task to the first column. Blank titles are ignored.
pub fn add_task(columns: &mut [Column], title: &str, created: NaiveDate) -> bool {
    let title = title.trim();
    if title.is_empty() {
        return false;
    }

    match columns.get_mut(PROTECTED_COLUMN_INDEX) {
        Some(column) => {
            column.push_task(Task::draft(title, created));
            true
        }
        None => false,
    }
}

/// [`add_task`] stamped with today's local date.
pub fn add_task_today(columns: &mut [Column], title: &str) -> bool {
    add_task(columns, title, Local::now().date_naive())
}

pub fn rename_column(columns: &mut [Column], index: usize, new_title: impl Into<String>) -> bool {
    match columns.get_mut(index) {
        Some(column) => {
            column.title = new_title.into();
            true
        }
        None => false,
    }
}

/// Remove and return the column at `index`, unless it is the protected first
/// column or out of range.
pub fn delete_column(columns: &mut Vec<Column>, index: usize) -> Option<Column> {
    if index == PROTECTED_COLUMN_INDEX || index >= columns.len() {
        return None;
    }
    Some(columns.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqs_models::{ColumnId, EntityId, TagColor};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn board() -> Vec<Column> {
        vec![
            Column::new(ColumnId::Label(EntityId::Number(1)), "Open", TagColor::Open, Vec::new()),
            Column::new(ColumnId::Label(EntityId::Number(2)), "Review", TagColor::Review, Vec::new()),
            Column::new(ColumnId::generate(), "Unknown", TagColor::Default, Vec::new()),
        ]
    }

    #[test]
    fn test_add_task_goes_to_first_column() {
        let mut columns = board();
        let before = columns.clone();

        assert!(add_task(&mut columns, "  Inspect crane ", date()));
        assert_eq!(columns[0].count(), 1);
        assert_eq!(columns[0].tasks()[0].title, "Inspect crane");
        assert_eq!(columns[0].tasks()[0].created_date, "15/06/2024");
        assert!(columns[0].tasks()[0].is_draft());
        assert_eq!(columns[1..], before[1..]);
    }

    #[test]
    fn test_add_blank_task_is_noop() {
        let mut columns = board();
        let before = columns.clone();

        assert!(!add_task(&mut columns, "", date()));
        assert!(!add_task(&mut columns, "   ", date()));
        assert_eq!(columns, before);
    }

    #[test]
    fn test_add_task_without_columns() {
        let mut columns: Vec<Column> = Vec::new();
        assert!(!add_task_today(&mut columns, "Orphan"));
    }

    #[test]
    fn test_rename_column() {
        let mut columns = board();
        let before = columns.clone();

        assert!(rename_column(&mut columns, 1, "In Review"));
        assert_eq!(columns[1].title, "In Review");
        assert_eq!(columns[1].color_key, TagColor::Review);
        assert_eq!(columns[0], before[0]);
        assert_eq!(columns[2], before[2]);

        assert!(!rename_column(&mut columns, 9, "Nope"));
    }

    #[test]
    fn test_delete_first_column_is_noop() {
        let mut columns = board();
        let before = columns.clone();

        assert!(delete_column(&mut columns, 0).is_none());
        assert_eq!(columns, before);
    }

    #[test]
    fn test_delete_column() {
        let mut columns = board();
        let removed = delete_column(&mut columns, 1).unwrap();

        assert_eq!(removed.title, "Review");
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].title, "Open");
        assert_eq!(columns[1].title, "Unknown");
        assert!(delete_column(&mut columns, 5).is_none());
    }
}
