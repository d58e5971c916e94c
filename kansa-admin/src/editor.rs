//! Member editing session
//!
//! One `MemberEditor` backs the member dialog. It is opened by
//! [`MemberEditor::receive`] and ends on close, apply or a completed badge
//! flow.

use kansa_client::{InvoiceItem, InvoiceRequest, LogEntry, MembershipApi, UpgradeRequest};
use kansa_printer::BadgePrinter;
use serde_json::Value;
use shared::Record;
use tracing::{debug, error, info};

use crate::actions::{Action, ActionContext, derive_actions, offers_badge};
use crate::badge_flow::{BadgeFlow, BadgeFlowState, BadgePlan, FlowContext};
use crate::config::{EditorConfig, RegistrationState};
use crate::error::{AdminError, AdminResult};
use crate::ports::{Notifier, Prompts};
use crate::reconciler::Reconciler;

/// Commit the session's changes, telling the operator how it went
///
/// Transport failures are alerted and returned; guard and validation
/// refusals are returned without an alert.
pub(crate) async fn save_with_feedback<A, U, N>(
    reconciler: &mut Reconciler,
    api: &A,
    prompts: &U,
    notifier: &N,
) -> AdminResult<Value>
where
    A: MembershipApi + ?Sized,
    U: Prompts + ?Sized,
    N: Notifier + ?Sized,
{
    let name = reconciler
        .baseline()
        .map(|b| b.display_name().to_string())
        .unwrap_or_default();

    match reconciler.commit(api).await {
        Ok(response) => {
            notifier.show_message(&format!("Data saved for {}", name));
            Ok(response)
        }
        Err(e @ AdminError::Transport(_)) => {
            error!(error = %e, "Member save failed!");
            prompts.alert(&format!("Member save failed! {}", e.operator_message()));
            Err(e)
        }
        Err(e) => Err(e),
    }
}

pub struct MemberEditor<A, B, U, N> {
    api: A,
    printer: B,
    prompts: U,
    notifier: N,
    registration: RegistrationState,
    reconciler: Reconciler,
    /// Id of the last detailed record requested
    fetched_id: Option<i64>,
}

impl<A, B, U, N> MemberEditor<A, B, U, N>
where
    A: MembershipApi,
    B: BadgePrinter,
    U: Prompts,
    N: Notifier,
{
    pub fn new(
        api: A,
        printer: B,
        prompts: U,
        notifier: N,
        registration: RegistrationState,
        config: EditorConfig,
    ) -> Self {
        Self {
            api,
            printer,
            prompts,
            notifier,
            registration,
            reconciler: Reconciler::new(config.submit_release),
            fetched_id: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn printer(&self) -> &B {
        &self.printer
    }

    pub fn prompts(&self) -> &U {
        &self.prompts
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn registration(&self) -> &RegistrationState {
        &self.registration
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    pub fn reconciler_mut(&mut self) -> &mut Reconciler {
        &mut self.reconciler
    }

    pub fn is_open(&self) -> bool {
        self.reconciler.baseline().is_some()
    }

    /// Open (or refresh) the session with a record from a list view
    ///
    /// The detailed record is fetched once per distinct id and replaces the
    /// list record as baseline.
    pub async fn receive(&mut self, record: Record) -> AdminResult<()> {
        let id = record.id();
        self.reconciler.seed(record);

        let Some(id) = id else {
            return Ok(());
        };
        if self.fetched_id == Some(id) {
            return Ok(());
        }
        self.fetched_id = Some(id);

        match self.api.get_person(id).await {
            Ok(detailed) => {
                debug!(id, "Fetched member record");
                self.reconciler.seed(detailed);
                Ok(())
            }
            Err(e) => {
                error!(id, error = %e, "Member fetch failed!");
                self.prompts
                    .alert(&format!("Member fetch failed! {}", e.operator_message()));
                Err(e.into())
            }
        }
    }

    pub fn set_field(&mut self, path: &[&str], value: impl Into<Value>) {
        self.reconciler.set_field(path, value);
    }

    pub fn changes(&self) -> Record {
        self.reconciler.changes()
    }

    /// Actions for the open record; none when no record is open
    pub fn actions(&self) -> Vec<Action> {
        let Some(record) = self.reconciler.baseline() else {
            return Vec::new();
        };
        derive_actions(&ActionContext {
            record,
            draft_valid: self.reconciler.is_valid(),
            locked: self.registration.locked,
            printer_configured: self.registration.printer_configured(),
            has_changes: self.reconciler.has_changes(),
            submitting: self.reconciler.is_submitting(),
        })
    }

    pub fn title(&self) -> Option<String> {
        self.reconciler.baseline().map(Record::title)
    }

    pub fn last_modified(&self) -> Option<&str> {
        self.reconciler.baseline().and_then(Record::last_modified)
    }

    /// Save the changes and close the session
    pub async fn apply(&mut self) -> AdminResult<Value> {
        let response =
            save_with_feedback(&mut self.reconciler, &self.api, &self.prompts, &self.notifier)
                .await?;
        self.close();
        Ok(response)
    }

    /// Close the session, dropping any unsaved changes
    pub fn close(&mut self) {
        self.reconciler.discard();
        self.fetched_id = None;
    }

    /// Fetch the audit log for the open record
    pub async fn view_log(&self) -> AdminResult<Vec<LogEntry>> {
        let id = self.unlocked_id()?;
        self.alerting(self.api.get_log(id).await, "Log fetch failed!")
    }

    pub async fn upgrade(&self, request: UpgradeRequest) -> AdminResult<Value> {
        let id = self.unlocked_id()?;
        let response = self.alerting(self.api.upgrade(id, &request).await, "Upgrade failed!")?;
        let legal_name = self.baseline_text("legal_name");
        info!(id, membership = ?request.membership, "Member upgraded");
        self.notifier.show_message(&format!("{} upgraded", legal_name));
        Ok(response)
    }

    /// Invoice the open record's email for a single item
    pub async fn create_invoice(&self, item: InvoiceItem) -> AdminResult<Value> {
        let id = self.unlocked_id()?;
        let request = InvoiceRequest {
            email: self.baseline_text("email"),
            items: vec![item],
        };
        let response =
            self.alerting(self.api.create_invoice(&request).await, "Invoice creation failed!")?;
        info!(id, "Invoice created");
        self.notifier
            .show_message(&format!("Invoice created for {}", self.baseline_text("legal_name")));
        Ok(response)
    }

    /// Run the badge print / day pass claim flow for the open record
    ///
    /// Returns the terminal state; `Done` also means the session is closed.
    pub async fn print_badge(&mut self) -> AdminResult<BadgeFlowState> {
        let target = self
            .registration
            .printer
            .clone()
            .ok_or(AdminError::PrinterNotConfigured)?;
        let baseline = self.reconciler.baseline().ok_or(AdminError::NotOpen)?;
        if !offers_badge(baseline, true) {
            return Err(AdminError::ActionUnavailable("print badge".into()));
        }
        if self.reconciler.is_submitting() || !self.reconciler.is_valid() {
            return Err(AdminError::ActionUnavailable("print badge".into()));
        }

        let plan = BadgePlan::from_session(baseline, self.reconciler.has_changes(), target)?;
        let mut flow = BadgeFlow::new(plan);
        let mut ctx = FlowContext {
            api: &self.api,
            printer: &self.printer,
            prompts: &self.prompts,
            notifier: &self.notifier,
            reconciler: &mut self.reconciler,
        };
        flow.run(&mut ctx).await?;
        self.fetched_id = None;
        Ok(flow.state())
    }

    fn unlocked_id(&self) -> AdminResult<i64> {
        if self.registration.locked {
            return Err(AdminError::Locked);
        }
        let baseline = self.reconciler.baseline().ok_or(AdminError::NotOpen)?;
        baseline.id().ok_or(AdminError::MissingId)
    }

    fn baseline_text(&self, key: &str) -> String {
        self.reconciler
            .baseline()
            .map(|b| b.text(key).to_string())
            .unwrap_or_default()
    }

    fn alerting<T>(
        &self,
        result: kansa_client::ClientResult<T>,
        what: &str,
    ) -> AdminResult<T> {
        result.map_err(|e| {
            error!(error = %e, "{}", what);
            self.prompts
                .alert(&format!("{} {}", what, e.operator_message()));
            AdminError::from(e)
        })
    }
}
