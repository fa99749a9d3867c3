//! The slot-compliance rule table and evaluator.
//!
//! One fixed table maps a slot type to its minimum duration and allowed
//! clinicians. The evaluator, the compliance sweep and the alternative-slot
//! finder all read this table; it is the single source of truth for what a
//! compliant slot looks like.

use crate::models::SlotRecord;
use crate::services::identity::{self, B12_CLINICIAN, CKD_REVIEWER, HCA_TEAM};

#[derive(Debug, Clone, PartialEq)]
pub enum AllowedClinicians {
    /// Any of a fixed set of named clinicians (exact name, case-insensitive).
    AnyOf(&'static [&'static str]),
    /// Exactly one named clinician.
    Exactly(&'static str),
    /// Any member of the nursing team (surname substring match).
    AnyNurse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotRule {
    /// Lowercase slot type this rule applies to; matching is exact after
    /// trimming and lowercasing, never fuzzy.
    pub slot_type: &'static str,
    pub min_duration_minutes: Option<f64>,
    pub allowed: AllowedClinicians,
}

static RULES: [SlotRule; 8] = [
    SlotRule {
        slot_type: "blood clinic",
        min_duration_minutes: Some(10.0),
        allowed: AllowedClinicians::AnyOf(&HCA_TEAM),
    },
    SlotRule {
        slot_type: "ecg",
        min_duration_minutes: Some(30.0),
        allowed: AllowedClinicians::AnyOf(&HCA_TEAM),
    },
    SlotRule {
        slot_type: "wound check",
        min_duration_minutes: Some(30.0),
        allowed: AllowedClinicians::AnyNurse,
    },
    SlotRule {
        slot_type: "annual review multiple",
        min_duration_minutes: Some(45.0),
        allowed: AllowedClinicians::AnyNurse,
    },
    SlotRule {
        slot_type: "hyperten annual review",
        min_duration_minutes: Some(30.0),
        allowed: AllowedClinicians::AnyOf(&HCA_TEAM),
    },
    SlotRule {
        slot_type: "hyperten or ckd review",
        min_duration_minutes: Some(30.0),
        allowed: AllowedClinicians::Exactly(CKD_REVIEWER),
    },
    SlotRule {
        slot_type: "flu clinic",
        min_duration_minutes: None,
        allowed: AllowedClinicians::AnyOf(&HCA_TEAM),
    },
    SlotRule {
        slot_type: "b12",
        min_duration_minutes: Some(10.0),
        allowed: AllowedClinicians::Exactly(B12_CLINICIAN),
    },
];

/// Look up the rule for a slot type, if one exists. Unmatched types carry no
/// requirements at all - the table is an allow-list, not a deny-list.
pub fn rule_for_slot_type(slot_type: &str) -> Option<&'static SlotRule> {
    let normalized = slot_type.trim().to_lowercase();
    RULES.iter().find(|rule| rule.slot_type == normalized)
}

/// Evaluate one slot against the rule table.
///
/// Total function: a record with missing fields behaves as if those fields
/// were empty, and a missing duration never satisfies a minimum. The duration
/// check and the clinician check fail independently, so one slot can carry
/// zero, one or two messages from the same rule.
pub fn evaluate_slot(slot: &SlotRecord) -> Vec<String> {
    let Some(rule) = rule_for_slot_type(&slot.slot_type) else {
        return Vec::new();
    };

    let mut violations = Vec::new();

    if let Some(minimum) = rule.min_duration_minutes {
        let satisfied = slot
            .duration_minutes
            .map(|duration| duration.is_finite() && duration >= minimum)
            .unwrap_or(false);

        if !satisfied {
            let found = match slot.duration_minutes {
                Some(duration) if duration.is_finite() => format!("{} minutes", duration),
                _ => "no duration".to_string(),
            };
            violations.push(format!(
                "Duration must be at least {} minutes (found {})",
                minimum, found
            ));
        }
    }

    if !clinician_allowed(&rule.allowed, &slot.clinician_name) {
        let found = slot.clinician_name.trim();
        let found = if found.is_empty() { "no clinician" } else { found };
        violations.push(format!(
            "Slot held by {} but expected {}",
            found,
            describe_allowed(&rule.allowed)
        ));
    }

    violations
}

fn clinician_allowed(allowed: &AllowedClinicians, name: &str) -> bool {
    let candidate = name.trim().to_lowercase();
    match allowed {
        AllowedClinicians::Exactly(expected) => candidate == expected.to_lowercase(),
        AllowedClinicians::AnyOf(names) => {
            names.iter().any(|expected| candidate == expected.to_lowercase())
        }
        AllowedClinicians::AnyNurse => identity::is_nurse_name(name),
    }
}

fn describe_allowed(allowed: &AllowedClinicians) -> String {
    match allowed {
        AllowedClinicians::Exactly(name) => (*name).to_string(),
        AllowedClinicians::AnyOf(names) => names.join(" or "),
        AllowedClinicians::AnyNurse => "a member of the nursing team".to_string(),
    }
}
