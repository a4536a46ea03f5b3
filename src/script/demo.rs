//! Bundled conversations used by the demo host and the tests.

use super::types::{Script, Turn};
use crate::error::ScriptError;

pub fn churn() -> Result<Script, ScriptError> {
    Script::new(
        "churn",
        vec![
            Turn::initiator("Why are churn rates rising?"),
            Turn::agent("Usage dropped 20% before cancellation.").with_metric("Impact", "20%"),
            Turn::outcome("Alert resolved.").with_metric("Resolved", "Yes"),
        ],
    )
}

pub fn inventory() -> Result<Script, ScriptError> {
    Script::new(
        "inventory",
        vec![
            Turn::initiator("Which SKUs will stock out this week?"),
            Turn::agent("Three SKUs fall below safety stock by Thursday.")
                .with_metric("At risk", "3 SKUs")
                .with_metric("Lead time", "5 days"),
            Turn::initiator("Can we expedite the reorder?"),
            Turn::agent("A rush order covers two of them if placed today.")
                .with_action("Place rush order"),
            Turn::outcome("Reorder placed.")
                .with_metric("Stockouts avoided", "2")
                .with_metric("Cost", "+4%"),
        ],
    )
}

pub fn onboarding() -> Result<Script, ScriptError> {
    Script::new(
        "onboarding",
        vec![
            Turn::initiator("Where do new users drop off?"),
            Turn::agent("42% leave at the workspace invite step.").with_metric("Drop-off", "42%"),
            Turn::outcome("Invite step made optional.")
                .with_metric("Completion", "+18%")
                .with_action("View funnel"),
        ],
    )
}

pub fn all() -> Result<Vec<Script>, ScriptError> {
    Ok(vec![churn()?, inventory()?, onboarding()?])
}
