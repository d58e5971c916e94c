//! Badge print / day pass claim sequence
//!
//! ```text
//! Idle -> [Confirming] -> [Printing] -> MarkingPrinted -> [Saving] -> Closing -> Done
//!              \               \              \               \
//!               +---------------+--------------+---------------+--> Aborted
//! ```
//!
//! Confirming runs only for a repeat print, Printing is skipped for day
//! passes and Saving runs only when the session had unsaved changes when the
//! flow started. Each step awaits the previous one; nothing is retried.

use std::fmt;

use kansa_client::MembershipApi;
use kansa_printer::{BadgePrinter, PrinterTarget};
use serde::Serialize;
use shared::Record;
use shared::util::format_timestamp;
use tracing::{debug, error, info};

use crate::editor::save_with_feedback;
use crate::error::{AdminError, AdminResult};
use crate::ports::{Notifier, Prompts};
use crate::reconciler::Reconciler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeFlowState {
    Idle,
    Confirming,
    Printing,
    MarkingPrinted,
    Saving,
    Closing,
    Done,
    Aborted,
}

impl BadgeFlowState {
    pub fn is_terminal(self) -> bool {
        matches!(self, BadgeFlowState::Done | BadgeFlowState::Aborted)
    }
}

impl fmt::Display for BadgeFlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BadgeFlowState::Idle => "idle",
            BadgeFlowState::Confirming => "confirming",
            BadgeFlowState::Printing => "printing",
            BadgeFlowState::MarkingPrinted => "marking_printed",
            BadgeFlowState::Saving => "saving",
            BadgeFlowState::Closing => "closing",
            BadgeFlowState::Done => "done",
            BadgeFlowState::Aborted => "aborted",
        };
        f.write_str(s)
    }
}

/// Everything the flow needs to know, captured when it starts
#[derive(Debug, Clone, PartialEq)]
pub struct BadgePlan {
    pub id: i64,
    pub daypass: bool,
    /// `badge_print_time` of the baseline, if already printed or claimed
    pub previous_print: Option<String>,
    pub has_changes: bool,
    pub target: PrinterTarget,
    /// Name used in the completion message
    pub display_name: String,
}

impl BadgePlan {
    pub fn from_session(
        baseline: &Record,
        has_changes: bool,
        target: PrinterTarget,
    ) -> AdminResult<Self> {
        let id = baseline.id().ok_or(AdminError::MissingId)?;
        Ok(Self {
            id,
            daypass: baseline.daypass(),
            previous_print: baseline.badge_print_time().map(str::to_string),
            has_changes,
            target,
            display_name: baseline.display_name().to_string(),
        })
    }

    /// Prompt shown before a repeat print or claim
    pub fn confirmation_text(&self) -> Option<String> {
        let previous = self.previous_print.as_deref()?;
        let what = if self.daypass {
            "Daypass was already claimed at:"
        } else {
            "Badge was already printed at:"
        };
        Some(["Are you sure?", "", what, &format_timestamp(previous)].join("\n"))
    }

    pub fn completion_message(&self) -> String {
        let done = if self.daypass {
            "Daypass claimed"
        } else {
            "Badge printed"
        };
        format!("{} for {}", done, self.display_name)
    }

    fn first_action(&self) -> BadgeFlowState {
        if self.daypass {
            BadgeFlowState::MarkingPrinted
        } else {
            BadgeFlowState::Printing
        }
    }
}

/// Collaborators a flow step may touch
pub struct FlowContext<'a, A: ?Sized, B, U, N> {
    pub api: &'a A,
    pub printer: &'a B,
    pub prompts: &'a U,
    pub notifier: &'a N,
    pub reconciler: &'a mut Reconciler,
}

#[derive(Debug, Clone)]
pub struct BadgeFlow {
    plan: BadgePlan,
    state: BadgeFlowState,
}

impl BadgeFlow {
    pub fn new(plan: BadgePlan) -> Self {
        Self {
            plan,
            state: BadgeFlowState::Idle,
        }
    }

    pub fn state(&self) -> BadgeFlowState {
        self.state
    }

    pub fn plan(&self) -> &BadgePlan {
        &self.plan
    }

    /// Advance one transition and return the new state
    ///
    /// A terminal state is returned unchanged. On error the flow is left in
    /// `Aborted`.
    pub async fn step<A, B, U, N>(
        &mut self,
        ctx: &mut FlowContext<'_, A, B, U, N>,
    ) -> AdminResult<BadgeFlowState>
    where
        A: MembershipApi + ?Sized,
        B: BadgePrinter,
        U: Prompts,
        N: Notifier,
    {
        let next = match self.state {
            BadgeFlowState::Done | BadgeFlowState::Aborted => return Ok(self.state),

            BadgeFlowState::Idle => {
                if self.plan.previous_print.is_some() {
                    BadgeFlowState::Confirming
                } else {
                    self.plan.first_action()
                }
            }

            BadgeFlowState::Confirming => {
                let text = self.plan.confirmation_text().unwrap_or_default();
                if !ctx.prompts.confirm(&text) {
                    debug!(id = self.plan.id, "Repeat badge print declined");
                    return self.abort(AdminError::ConfirmationDeclined);
                }
                self.plan.first_action()
            }

            BadgeFlowState::Printing => {
                let target = &self.plan.target;
                let result = ctx
                    .printer
                    .print_badge(&target.unit, target.name.as_deref(), ctx.reconciler.draft())
                    .await;
                if let Err(e) = result {
                    error!(id = self.plan.id, printer = %target, error = %e, "Badge print failed!");
                    ctx.prompts.alert(&format!("Badge print failed! {}", e));
                    return self.abort(e.into());
                }
                BadgeFlowState::MarkingPrinted
            }

            BadgeFlowState::MarkingPrinted => {
                if let Err(e) = ctx.api.mark_printed(self.plan.id).await {
                    error!(id = self.plan.id, error = %e, "Marking badge printed failed!");
                    ctx.prompts
                        .alert(&format!("Marking badge printed failed! {}", e.operator_message()));
                    return self.abort(e.into());
                }
                if self.plan.has_changes {
                    BadgeFlowState::Saving
                } else {
                    BadgeFlowState::Closing
                }
            }

            BadgeFlowState::Saving => {
                if let Err(e) =
                    save_with_feedback(ctx.reconciler, ctx.api, ctx.prompts, ctx.notifier).await
                {
                    return self.abort(e);
                }
                BadgeFlowState::Closing
            }

            BadgeFlowState::Closing => {
                ctx.reconciler.discard();
                ctx.notifier.show_message(&self.plan.completion_message());
                info!(id = self.plan.id, daypass = self.plan.daypass, "Badge flow complete");
                BadgeFlowState::Done
            }
        };

        debug!(id = self.plan.id, from = %self.state, to = %next, "Badge flow transition");
        self.state = next;
        Ok(next)
    }

    /// Drive the flow until it reaches `Done` or `Aborted`
    pub async fn run<A, B, U, N>(&mut self, ctx: &mut FlowContext<'_, A, B, U, N>) -> AdminResult<()>
    where
        A: MembershipApi + ?Sized,
        B: BadgePrinter,
        U: Prompts,
        N: Notifier,
    {
        while !self.state.is_terminal() {
            self.step(ctx).await?;
        }
        Ok(())
    }

    fn abort(&mut self, err: AdminError) -> AdminResult<BadgeFlowState> {
        debug!(id = self.plan.id, from = %self.state, "Badge flow aborted");
        self.state = BadgeFlowState::Aborted;
        Err(err)
    }
}
