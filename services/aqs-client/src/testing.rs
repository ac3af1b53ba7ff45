//! In-memory API double for unit tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use aqs_models::EntityId;
use aqs_utils::{AqsError, AqsResult};
use serde_json::Value;

use crate::api::{BoardApi, BoqApi};

#[derive(Default)]
pub struct FakeApi {
    projects: Option<AqsResult<Value>>,
    lists: HashMap<String, AqsResult<Value>>,
    details: HashMap<String, AqsResult<Value>>,
    boards: HashMap<String, AqsResult<Value>>,
    detail_calls: AtomicUsize,
    board_calls: AtomicUsize,
}

fn failure() -> AqsResult<Value> {
    Err(AqsError::transport("Fake API", "Network Error"))
}

fn lookup(map: &HashMap<String, AqsResult<Value>>, id: &EntityId) -> AqsResult<Value> {
    map.get(&id.key())
        .cloned()
        .unwrap_or_else(|| Err(AqsError::transport("Fake API", format!("{} not found", id))))
}

impl FakeApi {
    pub fn with_projects(mut self, payload: Value) -> Self {
        self.projects = Some(Ok(payload));
        self
    }

    pub fn with_failing_projects(mut self) -> Self {
        self.projects = Some(failure());
        self
    }

    pub fn with_list(mut self, project_id: i64, payload: Value) -> Self {
        self.lists.insert(project_id.to_string(), Ok(payload));
        self
    }

    pub fn with_failing_list(mut self, project_id: i64) -> Self {
        self.lists.insert(project_id.to_string(), failure());
        self
    }

    pub fn with_details(mut self, boq_id: i64, payload: Value) -> Self {
        self.details.insert(boq_id.to_string(), Ok(payload));
        self
    }

    pub fn with_failing_details(mut self, boq_id: i64) -> Self {
        self.details.insert(boq_id.to_string(), failure());
        self
    }

    pub fn with_board(mut self, employee_id: i64, payload: Value) -> Self {
        self.boards.insert(employee_id.to_string(), Ok(payload));
        self
    }

    pub fn with_failing_board(mut self, employee_id: i64) -> Self {
        self.boards.insert(employee_id.to_string(), failure());
        self
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn board_calls(&self) -> usize {
        self.board_calls.load(Ordering::SeqCst)
    }
}

impl BoqApi for FakeApi {
    fn approved_projects(&self) -> impl Future<Output = AqsResult<Value>> + Send {
        let result = self.projects.clone().unwrap_or_else(|| Ok(Value::Array(Vec::new())));
        async move { result }
    }

    fn approved_boq_list(
        &self,
        project_id: &EntityId,
    ) -> impl Future<Output = AqsResult<Value>> + Send {
        let result = lookup(&self.lists, project_id);
        async move { result }
    }

    fn approved_boq_details(
        &self,
        boq_id: &EntityId,
    ) -> impl Future<Output = AqsResult<Value>> + Send {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let result = lookup(&self.details, boq_id);
        async move {
            tokio::task::yield_now().await;
            result
        }
    }
}

impl BoardApi for FakeApi {
    fn login_board_details(
        &self,
        employee_id: &EntityId,
    ) -> impl Future<Output = AqsResult<Value>> + Send {
        self.board_calls.fetch_add(1, Ordering::SeqCst);
        let result = lookup(&self.boards, employee_id);
        async move { result }
    }
}
