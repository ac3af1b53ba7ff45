//! Kanban board view-models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::id::EntityId;
use crate::timestamp::format_day_month_year;

/// Tag attached to every task card until tags come from ticket metadata.
pub const PLACEHOLDER_TAG: &str = "PO";
pub const UNKNOWN_COLUMN_TITLE: &str = "Unknown";
pub const UNTITLED_TASK: &str = "Untitled";
pub const DRAFT_TASK_DESCRIPTION: &str = "New task description";

/// Fixed tag/label colour table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TagColor {
    Hr,
    Finance,
    Po,
    Open,
    InProgress,
    Review,
    Done,
    Approved,
    Default,
}

impl TagColor {
    /// Exact, case-sensitive match on a label or tag name.
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "HR" => Some(Self::Hr),
            "Finance" => Some(Self::Finance),
            "PO" => Some(Self::Po),
            "Open" => Some(Self::Open),
            "In Progress" => Some(Self::InProgress),
            "Review" => Some(Self::Review),
            "Done" => Some(Self::Done),
            "Approved" => Some(Self::Approved),
            _ => None,
        }
    }

    /// Column header colour for a label name.
    pub fn for_label(name: &str) -> Self {
        Self::lookup(name).unwrap_or(Self::Default)
    }

    pub fn hex(self) -> &'static str {
        match self {
            Self::Hr => "#D6FFCF",
            Self::Finance => "#CFE2FF",
            Self::Po => "#FFCFCF",
            Self::Open | Self::Default => "#D2F4FF",
            Self::InProgress => "#FFEECF",
            Self::Review => "#E4CFFF",
            Self::Done | Self::Approved => "#DAFFCF",
        }
    }

    /// Chip colour for a task tag; unknown tags render grey.
    pub fn chip_hex(tag: &str) -> &'static str {
        Self::lookup(tag).map(Self::hex).unwrap_or("#888888")
    }
}

/// Column identity: the backend label id, or a token minted during derivation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ColumnId {
    Label(EntityId),
    Generated(Uuid),
}

impl ColumnId {
    pub fn generate() -> Self {
        Self::Generated(Uuid::new_v4())
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(id) => write!(f, "{}", id),
            Self::Generated(token) => write!(f, "{}", token.simple()),
        }
    }
}

/// A task card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// `None` for drafts added locally that the backend has never seen.
    pub ticket_id: Option<EntityId>,
    pub title: String,
    pub description: String,
    /// `dd/mm/yyyy`, or empty when the ticket carried no creation date.
    pub created_date: String,
    pub tags: Vec<String>,
}

impl Task {
    /// A local draft card.
    pub fn draft(title: impl Into<String>, created: NaiveDate) -> Self {
        Self {
            ticket_id: None,
            title: title.into(),
            description: DRAFT_TASK_DESCRIPTION.to_string(),
            created_date: format_day_month_year(created),
            tags: vec![PLACEHOLDER_TAG.to_string()],
        }
    }

    pub fn is_draft(&self) -> bool {
        self.ticket_id.is_none()
    }
}

/// A board column. `count` always equals the number of tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub color_key: TagColor,
    tasks: Vec<Task>,
    count: usize,
}

impl Column {
    pub fn new(id: ColumnId, title: impl Into<String>, color_key: TagColor, tasks: Vec<Task>) -> Self {
        let count = tasks.len();
        Self {
            id,
            title: title.into(),
            color_key,
            tasks,
            count,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn push_task(&mut self, task: Task) {
        self.tasks.push(task);
        self.count = self.tasks.len();
    }

    pub fn color_hex(&self) -> &'static str {
        self.color_key.hex()
    }
}

/// What the board page should show.
///
/// `Loading`, `NoBoards`, `Empty` and `Ready` keep "nothing fetched yet",
/// "no board at all" and "a board with zero columns" apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "camelCase")]
pub enum BoardView {
    Loading,
    /// The board could not be fetched: no logged-in user, or the request failed.
    Unavailable(String),
    NoBoards,
    Invalid,
    /// The payload arrived but could not be shaped into columns.
    Failed(String),
    Empty,
    Ready(Vec<Column>),
}

impl BoardView {
    pub fn columns(&self) -> &[Column] {
        match self {
            Self::Ready(columns) => columns,
            _ => &[],
        }
    }

    pub fn columns_mut(&mut self) -> Option<&mut Vec<Column>> {
        match self {
            Self::Ready(columns) => Some(columns),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Human-readable status line for every state that shows no columns.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Loading => Some("Loading board data..."),
            Self::Unavailable(message) => Some(message.as_str()),
            Self::NoBoards => Some("No boards found for this user."),
            Self::Invalid => Some("Board data is invalid."),
            Self::Failed(message) => Some(message.as_str()),
            Self::Empty => Some("Board data loaded but no columns found. Please refresh the page."),
            Self::Ready(_) => None,
        }
    }
}

impl Default for BoardView {
    fn default() -> Self {
        Self::Loading
    }
}
