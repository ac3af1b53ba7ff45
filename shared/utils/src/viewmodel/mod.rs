//! View-model Derivation
//!
//! Pure shaping of raw backend payloads into the structures the BOQ dashboard
//! and the Kanban board render. Every entry point is total over JSON input:
//! odd shapes degrade to empty or partial view-models, never to a panic.

pub mod board;
pub mod boq;
pub mod editing;


pub use board::{derive_board_view, normalize_board, select_board, try_normalize_board, BoardSelection};
pub use boq::{first_boq, normalize_boq, normalize_projects, BoqCard};
pub use editing::{add_task, add_task_today, delete_column, rename_column, PROTECTED_COLUMN_INDEX};
