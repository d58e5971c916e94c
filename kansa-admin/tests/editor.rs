// kansa-admin/tests/editor.rs
// Editing session: load, edit, save, close and the admin-only actions

mod common;

use common::{ApiCall, MockApi, MockNotifier, MockPrinter, MockPrompts, adult, record};
use kansa_admin::{
    AdminError, EditorConfig, MemberEditor, RegistrationState, SubmitRelease,
};
use kansa_client::{InvoiceItem, UpgradeRequest};
use serde_json::{Map, json};
use shared::{Membership, Record};

type Editor = MemberEditor<MockApi, MockPrinter, MockPrompts, MockNotifier>;

fn editor_with(api: MockApi, registration: RegistrationState, config: EditorConfig) -> Editor {
    MemberEditor::new(
        api,
        MockPrinter::default(),
        MockPrompts::default(),
        MockNotifier::default(),
        registration,
        config,
    )
}

fn editor(api: MockApi) -> Editor {
    editor_with(
        api,
        RegistrationState::new(false, Some("10.0.0.7#desk")),
        EditorConfig::default(),
    )
}

fn list_entry() -> Record {
    record(json!({"id": 12, "legal_name": "Alice Example", "email": "alice@example.org"}))
}

#[tokio::test]
async fn test_receive_fetches_detailed_record_once() {
    let mut ed = editor(MockApi::default().with_person(adult()));

    ed.receive(list_entry()).await.unwrap();
    assert_eq!(ed.reconciler().baseline(), Some(&adult()));
    assert_eq!(ed.title().as_deref(), Some("Member #345 (Adult)"));
    assert!(ed.changes().is_empty());

    ed.receive(adult()).await.unwrap();
    assert_eq!(ed.api().calls(), vec![ApiCall::GetPerson(12)]);
}

#[tokio::test]
async fn test_receive_fetch_failure_alerts() {
    let api = MockApi {
        fail_get: true,
        ..Default::default()
    };
    let mut ed = editor(api);

    let err = ed.receive(list_entry()).await.unwrap_err();
    assert!(matches!(err, AdminError::Transport(_)));
    assert_eq!(ed.prompts().alerts(), vec!["Member fetch failed! database unavailable"]);
    // list record stays open
    assert!(ed.is_open());
}

#[tokio::test]
async fn test_apply_sends_only_changed_fields() {
    let mut ed = editor(MockApi::default().with_person(adult()));
    ed.receive(adult()).await.unwrap();

    ed.set_field(&["city"], "Helsinki");
    ed.set_field(&["email"], "ali@example.org");

    let apply = ed.actions().pop().unwrap();
    assert_eq!(apply.label, "Apply");
    assert!(apply.enabled);

    ed.apply().await.unwrap();

    let expected = Record::new()
        .with("city", "Helsinki")
        .with("email", "ali@example.org");
    assert!(ed.api().calls().contains(&ApiCall::UpdatePerson(12, expected)));
    assert_eq!(ed.notifier().messages(), vec!["Data saved for Ali"]);
    assert!(!ed.is_open());
    assert!(ed.actions().is_empty());
}

#[tokio::test]
async fn test_apply_without_changes_is_refused() {
    let mut ed = editor(MockApi::default().with_person(adult()));
    ed.receive(adult()).await.unwrap();

    let err = ed.apply().await.unwrap_err();
    assert!(matches!(err, AdminError::NothingToCommit));
    assert!(ed.prompts().alerts().is_empty());
    assert!(ed.is_open());
}

#[tokio::test]
async fn test_save_failure_alerts_and_reenables_apply() {
    let api = MockApi {
        fail_update: true,
        ..Default::default()
    }
    .with_person(adult());
    let mut ed = editor(api);
    ed.receive(adult()).await.unwrap();
    ed.set_field(&["city"], "Turku");

    let err = ed.apply().await.unwrap_err();
    assert!(matches!(err, AdminError::Transport(_)));
    assert_eq!(
        ed.prompts().alerts(),
        vec!["Member save failed! database unavailable"]
    );
    assert!(ed.is_open());
    assert!(!ed.reconciler().is_submitting());
    assert!(ed.actions().last().unwrap().enabled);
}

#[tokio::test]
async fn test_manual_release_keeps_guard_after_failure() {
    let api = MockApi {
        fail_update: true,
        ..Default::default()
    }
    .with_person(adult());
    let mut ed = editor_with(
        api,
        RegistrationState::default(),
        EditorConfig::default().with_submit_release(SubmitRelease::Manual),
    );
    ed.receive(adult()).await.unwrap();
    ed.set_field(&["city"], "Turku");

    assert!(ed.apply().await.is_err());
    let apply = ed.actions().pop().unwrap();
    assert_eq!(apply.label, "Working...");
    assert!(!apply.enabled);

    ed.reconciler_mut().reset_submitting();
    assert!(ed.actions().last().unwrap().enabled);
}

#[tokio::test]
async fn test_second_commit_while_guard_held_sends_nothing() {
    let mut ed = editor(MockApi::default().with_person(adult()));
    ed.receive(adult()).await.unwrap();
    ed.set_field(&["city"], "Oulu");

    let pending = ed.reconciler_mut().begin_commit().unwrap();
    assert_eq!(pending.id, 12);

    let api = MockApi::default();
    let err = ed.reconciler_mut().commit(&api).await.unwrap_err();
    assert!(matches!(err, AdminError::AlreadySubmitting));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_successful_commit_keeps_guard() {
    let mut ed = editor(MockApi::default().with_person(adult()));
    ed.receive(adult()).await.unwrap();
    ed.set_field(&["city"], "Oulu");

    let api = MockApi::default();
    ed.reconciler_mut().commit(&api).await.unwrap();
    let again = ed.reconciler_mut().commit(&api).await;
    assert!(matches!(again, Err(AdminError::AlreadySubmitting)));
    assert_eq!(api.count(|c| matches!(c, ApiCall::UpdatePerson(..))), 1);
}

#[tokio::test]
async fn test_view_log() {
    let mut ed = editor(MockApi::default().with_person(adult()));
    ed.receive(adult()).await.unwrap();

    let log = ed.view_log().await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].author.as_deref(), Some("admin@example.org"));
    assert!(ed.api().calls().contains(&ApiCall::GetLog(12)));
}

#[tokio::test]
async fn test_upgrade_notifies() {
    let mut ed = editor(MockApi::default().with_person(adult()));
    ed.receive(adult()).await.unwrap();

    let request = UpgradeRequest {
        membership: Some(Membership::FirstWorldcon),
        ..Default::default()
    };
    ed.upgrade(request.clone()).await.unwrap();
    assert!(ed.api().calls().contains(&ApiCall::Upgrade(12, request)));
    assert_eq!(ed.notifier().messages(), vec!["Alice Example upgraded"]);
}

#[tokio::test]
async fn test_invoice_uses_record_email() {
    let mut ed = editor(MockApi::default().with_person(adult()));
    ed.receive(adult()).await.unwrap();

    let item = InvoiceItem {
        category: "upgrades".into(),
        kind: "paper_pubs".into(),
        amount: 1000,
        comments: None,
        data: Map::new(),
    };
    ed.create_invoice(item.clone()).await.unwrap();

    let calls = ed.api().calls();
    let Some(ApiCall::CreateInvoice(request)) = calls.last() else {
        panic!("no invoice call: {:?}", calls);
    };
    assert_eq!(request.email, "alice@example.org");
    assert_eq!(request.items, vec![item]);
    assert_eq!(ed.notifier().messages(), vec!["Invoice created for Alice Example"]);
}

#[tokio::test]
async fn test_locked_desk_refuses_admin_actions() {
    let mut ed = editor_with(
        MockApi::default().with_person(adult()),
        RegistrationState::new(true, Some("10.0.0.7#desk")),
        EditorConfig::default(),
    );
    ed.receive(adult()).await.unwrap();

    let labels: Vec<String> = ed.actions().into_iter().map(|a| a.label).collect();
    assert_eq!(labels, ["Print badge", "Close", "Apply"]);

    assert!(matches!(ed.view_log().await, Err(AdminError::Locked)));
    assert!(matches!(
        ed.upgrade(UpgradeRequest::default()).await,
        Err(AdminError::Locked)
    ));
    assert_eq!(ed.api().count(|c| !matches!(c, ApiCall::GetPerson(_))), 0);
}

#[tokio::test]
async fn test_close_discards_draft() {
    let mut ed = editor(MockApi::default().with_person(adult()));
    ed.receive(adult()).await.unwrap();
    ed.set_field(&["city"], "Tampere");

    ed.close();
    assert!(!ed.is_open());
    assert!(ed.changes().is_empty());
    assert!(matches!(ed.view_log().await, Err(AdminError::NotOpen)));
}
