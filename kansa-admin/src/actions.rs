//! Operator actions for an open member record
//!
//! Actions are plain descriptors; the UI decides how to draw them and calls
//! back into the editor when one is chosen.

use serde::Serialize;
use shared::{Membership, Record};
use shared::models::truthy;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    /// Print a badge, or claim a day pass when `daypass` is set
    PrintBadge { daypass: bool, reprint: bool },
    ViewLog { id: Option<i64> },
    Upgrade {
        membership: Option<Membership>,
        paper_pubs: bool,
        /// `legal_name <email>`
        name: String,
    },
    NewInvoice { email: String },
    Close,
    Apply,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    pub kind: ActionKind,
    pub label: String,
    pub enabled: bool,
}

impl Action {
    fn new(kind: ActionKind, label: impl Into<String>, enabled: bool) -> Self {
        Self {
            kind,
            label: label.into(),
            enabled,
        }
    }
}

/// Inputs for [`derive_actions`]
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    /// Baseline record as last loaded from the server
    pub record: &'a Record,
    pub draft_valid: bool,
    pub locked: bool,
    pub printer_configured: bool,
    pub has_changes: bool,
    pub submitting: bool,
}

/// Label for the print/claim action
pub fn badge_action_label(daypass: bool, reprint: bool, has_changes: bool) -> String {
    let mut label = String::new();
    if has_changes {
        label.push_str("Save & ");
    }
    if reprint {
        label.push_str("Re-");
    }
    label.push_str(if daypass { "Claim daypass" } else { "Print badge" });
    label
}

/// Whether the record qualifies for a badge or day pass at this desk
pub(crate) fn offers_badge(record: &Record, printer_configured: bool) -> bool {
    if !printer_configured {
        return false;
    }
    match record.membership() {
        Some(Membership::Supporter) => false,
        Some(Membership::NonMember) | None => record.daypass(),
        Some(_) => true,
    }
}

/// Actions offered for the record, in display order
pub fn derive_actions(ctx: &ActionContext<'_>) -> Vec<Action> {
    let record = ctx.record;
    let mut actions = Vec::with_capacity(6);

    if offers_badge(record, ctx.printer_configured) {
        let daypass = record.daypass();
        let reprint = record.badge_print_time().is_some();
        actions.push(Action::new(
            ActionKind::PrintBadge { daypass, reprint },
            badge_action_label(daypass, reprint, ctx.has_changes),
            !ctx.submitting && ctx.draft_valid,
        ));
    }

    if !ctx.locked {
        let legal_name = record.text("legal_name");
        let email = record.text("email");
        actions.push(Action::new(
            ActionKind::ViewLog { id: record.id() },
            "View log",
            true,
        ));
        actions.push(Action::new(
            ActionKind::Upgrade {
                membership: record.membership(),
                paper_pubs: record.get("paper_pubs").is_some_and(truthy),
                name: format!("{} <{}>", legal_name, email),
            },
            "Upgrade",
            true,
        ));
        actions.push(Action::new(
            ActionKind::NewInvoice {
                email: email.to_string(),
            },
            "New invoice",
            true,
        ));
    }

    actions.push(Action::new(ActionKind::Close, "Close", true));
    actions.push(Action::new(
        ActionKind::Apply,
        if ctx.submitting { "Working..." } else { "Apply" },
        !ctx.submitting && ctx.has_changes && ctx.draft_valid,
    ));

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx(record: &Record) -> ActionContext<'_> {
        ActionContext {
            record,
            draft_valid: true,
            locked: false,
            printer_configured: true,
            has_changes: false,
            submitting: false,
        }
    }

    fn labels(actions: &[Action]) -> Vec<&str> {
        actions.iter().map(|a| a.label.as_str()).collect()
    }

    fn adult() -> Record {
        Record::from_value(json!({
            "id": 3,
            "membership": "Adult",
            "legal_name": "Alice Example",
            "email": "alice@example.org"
        }))
        .unwrap()
    }

    #[test]
    fn test_label_table() {
        assert_eq!(badge_action_label(false, false, false), "Print badge");
        assert_eq!(badge_action_label(false, true, false), "Re-Print badge");
        assert_eq!(badge_action_label(false, false, true), "Save & Print badge");
        assert_eq!(badge_action_label(true, false, false), "Claim daypass");
        assert_eq!(badge_action_label(true, true, true), "Save & Re-Claim daypass");
    }

    #[test]
    fn test_unlocked_order() {
        let record = adult();
        let actions = derive_actions(&ctx(&record));
        assert_eq!(
            labels(&actions),
            ["Print badge", "View log", "Upgrade", "New invoice", "Close", "Apply"]
        );
        let apply = actions.last().unwrap();
        assert!(!apply.enabled);
    }

    #[test]
    fn test_locked_hides_admin_actions() {
        let record = adult();
        let actions = derive_actions(&ActionContext {
            locked: true,
            ..ctx(&record)
        });
        assert_eq!(labels(&actions), ["Print badge", "Close", "Apply"]);
    }

    #[test]
    fn test_print_requires_printer() {
        let record = adult();
        let actions = derive_actions(&ActionContext {
            printer_configured: false,
            ..ctx(&record)
        });
        assert_eq!(actions[0].kind, ActionKind::ViewLog { id: Some(3) });
    }

    #[test]
    fn test_supporter_and_non_member() {
        let supporter = adult().with("membership", "Supporter");
        assert!(!offers_badge(&supporter, true));

        let non_member = adult().with("membership", "NonMember");
        assert!(!offers_badge(&non_member, true));

        let day_visitor = non_member.with("daypass", "Sat");
        assert!(offers_badge(&day_visitor, true));
    }

    #[test]
    fn test_working_state() {
        let record = adult().with("badge_print_time", "2017-08-11T14:05:00Z");
        let actions = derive_actions(&ActionContext {
            has_changes: true,
            submitting: true,
            ..ctx(&record)
        });
        assert_eq!(actions[0].label, "Save & Re-Print badge");
        assert!(!actions[0].enabled);
        let apply = actions.last().unwrap();
        assert_eq!(apply.label, "Working...");
        assert!(!apply.enabled);
    }

    #[test]
    fn test_apply_enabled_with_valid_changes() {
        let record = adult();
        let actions = derive_actions(&ActionContext {
            has_changes: true,
            ..ctx(&record)
        });
        assert!(actions.last().unwrap().enabled);

        let invalid = derive_actions(&ActionContext {
            has_changes: true,
            draft_valid: false,
            ..ctx(&record)
        });
        assert!(!invalid.last().unwrap().enabled);
        assert!(!invalid[0].enabled);
    }

    #[test]
    fn test_upgrade_descriptor() {
        let record = adult();
        let actions = derive_actions(&ctx(&record));
        assert_eq!(
            actions[2].kind,
            ActionKind::Upgrade {
                membership: Some(Membership::Adult),
                paper_pubs: false,
                name: "Alice Example <alice@example.org>".into(),
            }
        );
    }
}
