//! Board Normalizer
//!
//! Builds Kanban columns from the login-board payload. Only the first board of
//! a list is shown. Labels become columns and their tickets become task cards,
//! deduplicated by ticket id with the first occurrence kept.

use std::collections::HashSet;

use aqs_models::payload::lenient;
use aqs_models::{
    format_day_month_year, unwrap_data_envelope, BoardView, Column, ColumnId, EntityId, TagColor,
    Task, PLACEHOLDER_TAG, UNKNOWN_COLUMN_TITLE, UNTITLED_TASK,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{AqsError, AqsResult};

/// Which board, if any, a payload designates.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardSelection {
    /// Nothing has arrived yet.
    Pending,
    /// An empty list of boards.
    NoBoards,
    /// The selected board is `null` or not an object.
    Invalid,
    Board(Map<String, Value>),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBoard {
    #[serde(default, deserialize_with = "lenient::raw_list")]
    labels: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLabel {
    #[serde(default, deserialize_with = "lenient::entity_id")]
    label_id: Option<EntityId>,
    #[serde(default, deserialize_with = "lenient::text")]
    label_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::raw_list")]
    tickets: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTicket {
    #[serde(default, deserialize_with = "lenient::entity_id")]
    ticket_id: Option<EntityId>,
    #[serde(default, deserialize_with = "lenient::text")]
    ticket_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    ticket_no: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    ticket_description: Option<String>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    ticket_created_date: Option<DateTime<Utc>>,
}

/// Pick the active board. A `{ "data": ... }` envelope is unwrapped first and
/// only the first board of a list is considered.
pub fn select_board(raw: Value) -> BoardSelection {
    match unwrap_data_envelope(raw) {
        Value::Null => BoardSelection::Pending,
        Value::Array(boards) => match boards.into_iter().next() {
            None => BoardSelection::NoBoards,
            Some(Value::Object(board)) => BoardSelection::Board(board),
            Some(_) => BoardSelection::Invalid,
        },
        Value::Object(board) => BoardSelection::Board(board),
        _ => BoardSelection::Invalid,
    }
}

/// Shape the active board into columns.
///
/// Payloads without a usable board give no columns. A `null` label entry fails
/// the whole board.
pub fn try_normalize_board(raw: Value) -> AqsResult<Vec<Column>> {
    match select_board(raw) {
        BoardSelection::Board(board) => shape_board(board),
        _ => Ok(Vec::new()),
    }
}

/// Like [`try_normalize_board`], degrading a failed board to no columns.
pub fn normalize_board(raw: Value) -> Vec<Column> {
    match try_normalize_board(raw) {
        Ok(columns) => columns,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding board that could not be processed");
            Vec::new()
        }
    }
}

/// Full page state for a board payload.
pub fn derive_board_view(raw: Value) -> BoardView {
    match select_board(raw) {
        BoardSelection::Pending => BoardView::Loading,
        BoardSelection::NoBoards => BoardView::NoBoards,
        BoardSelection::Invalid => BoardView::Invalid,
        BoardSelection::Board(board) => match shape_board(board) {
            Ok(columns) if columns.is_empty() => BoardView::Empty,
            Ok(columns) => BoardView::Ready(columns),
            Err(e) => {
                tracing::error!(error = %e, "Error processing board data");
                BoardView::Failed(e.user_message())
            }
        },
    }
}

fn shape_board(board: Map<String, Value>) -> AqsResult<Vec<Column>> {
    let board: RawBoard = serde_json::from_value(Value::Object(board))?;

    let columns = board
        .labels
        .into_iter()
        .enumerate()
        .map(|(index, label)| shape_label(index, label))
        .collect::<AqsResult<Vec<_>>>()?;

    tracing::debug!(columns = columns.len(), "Derived board columns");
    Ok(columns)
}

fn shape_label(index: usize, label: Value) -> AqsResult<Column> {
    if label.is_null() {
        return Err(AqsError::processing(format!("label {} is null", index)));
    }
    // Scalars and arrays carry no fields and shape as an empty "Unknown" column.
    let label = lenient::record::<RawLabel>(label);

    let name = label.label_name.filter(|name| !name.is_empty());
    let color = name
        .as_deref()
        .map(TagColor::for_label)
        .unwrap_or(TagColor::Default);
    let id = label
        .label_id
        .map(ColumnId::Label)
        .unwrap_or_else(ColumnId::generate);
    let title = name.unwrap_or_else(|| UNKNOWN_COLUMN_TITLE.to_string());

    Ok(Column::new(id, title, color, shape_tickets(label.tickets)))
}

/// Drop tickets without a usable id, then keep the first ticket per id.
fn shape_tickets(tickets: Vec<Value>) -> Vec<Task> {
    let mut seen = HashSet::new();

    tickets
        .into_iter()
        .map(lenient::record::<RawTicket>)
        .filter_map(|ticket| {
            let id = ticket.ticket_id.clone()?;
            seen.insert(id.key()).then(|| shape_ticket(id, ticket))
        })
        .collect()
}

fn shape_ticket(ticket_id: EntityId, ticket: RawTicket) -> Task {
    let title = [ticket.ticket_name, ticket.ticket_no]
        .into_iter()
        .flatten()
        .find(|candidate| !candidate.is_empty())
        .unwrap_or_else(|| UNTITLED_TASK.to_string());

    Task {
        ticket_id: Some(ticket_id),
        title,
        description: ticket.ticket_description.unwrap_or_default(),
        created_date: ticket
            .ticket_created_date
            .map(|at| format_day_month_year(at.date_naive()))
            .unwrap_or_default(),
        tags: vec![PLACEHOLDER_TAG.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ticket_ids(column: &Column) -> Vec<Option<EntityId>> {
        column.tasks().iter().map(|t| t.ticket_id.clone()).collect()
    }

    #[test]
    fn test_single_label_scenario() {
        let columns = normalize_board(json!({
            "labels": [{
                "labelId": 1,
                "labelName": "Open",
                "tickets": [{"ticketId": 5, "ticketName": "Fix pump"}]
            }]
        }));

        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].title, "Open");
        assert_eq!(columns[0].id, ColumnId::Label(EntityId::Number(1)));
        assert_eq!(columns[0].color_key, TagColor::Open);
        assert_eq!(columns[0].count(), 1);
        assert_eq!(columns[0].tasks()[0].ticket_id, Some(EntityId::Number(5)));
        assert_eq!(columns[0].tasks()[0].title, "Fix pump");
        assert_eq!(columns[0].tasks()[0].tags, vec!["PO".to_string()]);
    }

    #[test]
    fn test_duplicate_tickets_first_wins() {
        let columns = normalize_board(json!({
            "labels": [{
                "labelName": "Review",
                "tickets": [
                    {"ticketId": 1, "ticketName": "first"},
                    {"ticketId": 1, "ticketName": "second"},
                    {"ticketId": 2}
                ]
            }]
        }));

        assert_eq!(columns[0].count(), 2);
        assert_eq!(
            ticket_ids(&columns[0]),
            vec![Some(EntityId::Number(1)), Some(EntityId::Number(2))]
        );
        assert_eq!(columns[0].tasks()[0].title, "first");
    }

    #[test]
    fn test_numeric_and_string_ids_deduplicate() {
        let columns = normalize_board(json!({
            "labels": [{"tickets": [{"ticketId": 8}, {"ticketId": "8"}, {"ticketId": 0}]}]
        }));
        assert_eq!(
            ticket_ids(&columns[0]),
            vec![Some(EntityId::Number(8)), Some(EntityId::Number(0))]
        );
    }

    #[test]
    fn test_tickets_without_usable_id_are_dropped() {
        let columns = normalize_board(json!({
            "labels": [{"tickets": [
                {"ticketName": "no id"},
                {"ticketId": null},
                {"ticketId": true},
                {"ticketId": {"nested": 1}},
                {"ticketId": ""},
                null,
                42,
                {"ticketId": 3}
            ]}]
        }));
        assert_eq!(ticket_ids(&columns[0]), vec![Some(EntityId::Number(3))]);
    }

    #[test]
    fn test_label_fallbacks() {
        let columns = normalize_board(json!({
            "labels": [
                {"labelName": "", "tickets": "not a list"},
                {"labelId": 0, "labelName": "Backlog"},
                {}
            ]
        }));

        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].title, "Unknown");
        assert_eq!(columns[0].color_key, TagColor::Default);
        assert!(columns[0].id.is_generated());
        assert_eq!(columns[0].count(), 0);
        assert_eq!(columns[1].id, ColumnId::Label(EntityId::Number(0)));
        assert_eq!(columns[1].color_key, TagColor::Default);
        assert_ne!(columns[0].id, columns[2].id);
    }

    #[test]
    fn test_ticket_title_and_date_fallbacks() {
        let columns = normalize_board(json!({
            "labels": [{"tickets": [
                {"ticketId": 1, "ticketName": "", "ticketNo": "TK-1", "ticketCreatedDate": "2024-03-09T10:15:00"},
                {"ticketId": 2, "ticketNo": 77},
                {"ticketId": 3, "ticketCreatedDate": "garbage", "ticketDescription": "Leaking"}
            ]}]
        }));

        let tasks = columns[0].tasks();
        assert_eq!(tasks[0].title, "TK-1");
        assert_eq!(tasks[0].created_date, "09/03/2024");
        assert_eq!(tasks[1].title, "77");
        assert_eq!(tasks[1].created_date, "");
        assert_eq!(tasks[2].title, "Untitled");
        assert_eq!(tasks[2].created_date, "");
        assert_eq!(tasks[2].description, "Leaking");
    }

    #[test]
    fn test_first_board_selected() {
        let columns = normalize_board(json!([
            {"labels": [{"labelName": "Open"}]},
            {"labels": [{"labelName": "Done"}, {"labelName": "HR"}]}
        ]));
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].title, "Open");
    }

    #[test]
    fn test_data_envelope_unwrapped() {
        let columns = normalize_board(json!({"data": [{"labels": [{"labelName": "Done"}]}]}));
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].color_key, TagColor::Done);
    }

    #[test]
    fn test_board_without_labels_is_empty() {
        assert!(normalize_board(json!({"boardName": "Ops"})).is_empty());
        assert!(normalize_board(json!({"labels": null})).is_empty());
        assert!(normalize_board(Value::Null).is_empty());
    }

    #[test]
    fn test_null_label_fails_whole_board() {
        let raw = json!({"labels": [{"labelName": "Open"}, null]});
        let err = try_normalize_board(raw.clone()).unwrap_err();
        assert!(matches!(err, AqsError::Processing { .. }));
        assert!(normalize_board(raw.clone()).is_empty());
        assert_eq!(
            derive_board_view(raw),
            BoardView::Failed(crate::error::BOARD_PROCESSING_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_scalar_labels_become_unknown_columns() {
        let view = derive_board_view(json!({"labels": [{"labelName": "Open"}, 5, "x", []]}));
        let columns = view.columns();

        assert_eq!(columns.len(), 4);
        assert_eq!(columns[0].title, "Open");
        for column in &columns[1..] {
            assert_eq!(column.title, "Unknown");
            assert_eq!(column.color_key, TagColor::Default);
            assert!(column.id.is_generated());
            assert_eq!(column.count(), 0);
        }
    }

    #[test]
    fn test_board_view_states() {
        assert_eq!(derive_board_view(Value::Null), BoardView::Loading);
        assert_eq!(derive_board_view(json!([])), BoardView::NoBoards);
        assert_eq!(derive_board_view(json!([null])), BoardView::Invalid);
        assert_eq!(derive_board_view(json!(5)), BoardView::Invalid);
        assert_eq!(derive_board_view(json!({"labels": []})), BoardView::Empty);
        assert_eq!(derive_board_view(json!({"data": null})), BoardView::Empty);

        let view = derive_board_view(json!({"labels": [{"labelName": "Open"}]}));
        assert_eq!(view.columns().len(), 1);
    }

    #[test]
    fn test_select_board() {
        assert_eq!(select_board(json!([])), BoardSelection::NoBoards);
        assert_eq!(select_board(json!(["board"])), BoardSelection::Invalid);
        assert!(matches!(
            select_board(json!([{"labels": []}, 3])),
            BoardSelection::Board(_)
        ));
    }
}
