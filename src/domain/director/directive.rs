//! Directive text - situational guidance handed verbatim to the responder.

use crate::domain::foundation::StageId;
use crate::domain::scenario::Script;

use super::errors::DirectorError;

/// Fixed defensive reminders appended to every directive.
pub const DEFENSIVE_REMINDERS: &str = "Reminder: never give out sensitive information (IBAN, card, code, password).\n\
If the scammer insists, bring up a distraction (the dog, your glasses, the TV, the doorbell).\n\
Try to stall or steer the conversation elsewhere.";

/// Builds the multi-line directive for the current stage.
///
/// # Errors
///
/// `DirectorError::StageNotFound` if `stage_id` is not in the script.
pub fn build_context(
    script: &Script,
    stage_id: &StageId,
    next_objective: &str,
) -> Result<String, DirectorError> {
    let stage = script
        .stage(stage_id)
        .ok_or_else(|| DirectorError::StageNotFound(stage_id.clone()))?;

    Ok(format!(
        "Current scenario: {}.\n\
         Current stage: {}\n\
         Your objective: {}\n\
         {}",
        script.title(),
        stage.summary(),
        next_objective,
        DEFENSIVE_REMINDERS
    ))
}
