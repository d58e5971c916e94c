// In-memory collaborators for editor and badge flow tests
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use kansa_admin::{Notifier, Prompts};
use kansa_client::{
    ClientError, ClientResult, CurrentUser, InvoiceRequest, LogEntry, MembershipApi,
    UpgradeRequest,
};
use kansa_printer::{BadgePrinter, PrintError, PrintResult};
use serde_json::{Value, json};
use shared::Record;

pub fn record(value: Value) -> Record {
    Record::from_value(value).unwrap()
}

pub fn adult() -> Record {
    record(json!({
        "id": 12,
        "membership": "Adult",
        "member_number": 345,
        "legal_name": "Alice Example",
        "preferred_name": "Ali",
        "email": "alice@example.org"
    }))
}

// ========== MembershipApi ==========

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    GetPerson(i64),
    GetLog(i64),
    UpdatePerson(i64, Record),
    MarkPrinted(i64),
    Upgrade(i64, UpgradeRequest),
    CreateInvoice(InvoiceRequest),
    KeyLogin(String, String),
    CurrentUser,
    Logout,
}

#[derive(Default)]
pub struct MockApi {
    pub calls: Mutex<Vec<ApiCall>>,
    pub people: Mutex<HashMap<i64, Record>>,
    pub fail_update: bool,
    pub fail_mark_printed: bool,
    pub fail_get: bool,
}

impl MockApi {
    pub fn with_person(self, record: Record) -> Self {
        if let Some(id) = record.id() {
            self.people.lock().unwrap().insert(id, record);
        }
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn push(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn server_error() -> ClientError {
        ClientError::Api {
            status: 500,
            message: "database unavailable".into(),
        }
    }
}

#[async_trait]
impl MembershipApi for MockApi {
    async fn get_person(&self, id: i64) -> ClientResult<Record> {
        self.push(ApiCall::GetPerson(id));
        if self.fail_get {
            return Err(Self::server_error());
        }
        self.people
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("people/{}", id)))
    }

    async fn get_log(&self, id: i64) -> ClientResult<Vec<LogEntry>> {
        self.push(ApiCall::GetLog(id));
        Ok(vec![serde_json::from_value(json!({
            "timestamp": "2017-08-09 10:00:00",
            "author": "admin@example.org",
            "description": "Update"
        }))
        .unwrap()])
    }

    async fn update_person(&self, id: i64, changes: &Record) -> ClientResult<Value> {
        self.push(ApiCall::UpdatePerson(id, changes.clone()));
        if self.fail_update {
            return Err(Self::server_error());
        }
        Ok(json!({"status": "success"}))
    }

    async fn mark_printed(&self, id: i64) -> ClientResult<Value> {
        self.push(ApiCall::MarkPrinted(id));
        if self.fail_mark_printed {
            return Err(Self::server_error());
        }
        Ok(json!({"status": "success"}))
    }

    async fn upgrade(&self, id: i64, request: &UpgradeRequest) -> ClientResult<Value> {
        self.push(ApiCall::Upgrade(id, request.clone()));
        Ok(json!({"status": "success"}))
    }

    async fn create_invoice(&self, request: &InvoiceRequest) -> ClientResult<Value> {
        self.push(ApiCall::CreateInvoice(request.clone()));
        Ok(json!({"status": "success"}))
    }

    async fn key_login(&self, email: &str, key: &str) -> ClientResult<Value> {
        self.push(ApiCall::KeyLogin(email.into(), key.into()));
        Ok(json!({"status": "success"}))
    }

    async fn current_user(&self) -> ClientResult<CurrentUser> {
        self.push(ApiCall::CurrentUser);
        Err(ClientError::Unauthorized)
    }

    async fn logout(&self) -> ClientResult<Value> {
        self.push(ApiCall::Logout);
        Ok(json!({"status": "success"}))
    }
}

// ========== BadgePrinter ==========

#[derive(Default)]
pub struct MockPrinter {
    pub jobs: RefCell<Vec<(String, Option<String>, Record)>>,
    pub fail: bool,
}

impl MockPrinter {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn job_count(&self) -> usize {
        self.jobs.borrow().len()
    }
}

impl BadgePrinter for MockPrinter {
    async fn print_badge(&self, unit: &str, name: Option<&str>, record: &Record) -> PrintResult<()> {
        self.jobs
            .borrow_mut()
            .push((unit.to_string(), name.map(str::to_string), record.clone()));
        if self.fail {
            return Err(PrintError::Connection("printer unit offline".into()));
        }
        Ok(())
    }
}

// ========== Prompts / Notifier ==========

pub struct MockPrompts {
    pub answer: bool,
    pub confirms: RefCell<Vec<String>>,
    pub alerts: RefCell<Vec<String>>,
}

impl MockPrompts {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            confirms: RefCell::new(Vec::new()),
            alerts: RefCell::new(Vec::new()),
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl Default for MockPrompts {
    fn default() -> Self {
        Self::answering(true)
    }
}

impl Prompts for MockPrompts {
    fn confirm(&self, text: &str) -> bool {
        self.confirms.borrow_mut().push(text.to_string());
        self.answer
    }

    fn alert(&self, text: &str) {
        self.alerts.borrow_mut().push(text.to_string());
    }
}

#[derive(Default)]
pub struct MockNotifier {
    pub messages: RefCell<Vec<String>>,
}

impl MockNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for MockNotifier {
    fn show_message(&self, text: &str) {
        self.messages.borrow_mut().push(text.to_string());
    }
}
