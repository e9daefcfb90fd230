//! Director update - the per-turn directive.

use serde::Serialize;

use crate::domain::foundation::{ScriptId, StageId};
use crate::domain::scenario::{ConversationHistory, Script};

use super::directive::build_context;
use super::errors::DirectorError;
use super::progress::determine_stage;
use super::risk::{score_risk, RiskLevel};

/// Merged result of one analysis pass. Recomputed every turn, never stored
/// across turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorUpdate {
    pub script_id: ScriptId,
    pub stage_id: StageId,
    pub completed_stages: Vec<StageId>,
    pub next_objective_for_victim: String,
    pub dynamic_context_from_director: String,
    pub risk_level: RiskLevel,
}

impl DirectorUpdate {
    /// The "nothing completed" update at the entry stage.
    ///
    /// Used when analysis fails so the turn loop can keep going.
    pub fn entry(script: &Script, risk_level: RiskLevel) -> Self {
        let stage = script.entry_stage();
        let objective = stage.objective().to_string();
        let context = build_context(script, stage.stage_id(), &objective).unwrap_or_default();

        Self {
            script_id: script.script_id().clone(),
            stage_id: stage.stage_id().clone(),
            completed_stages: Vec::new(),
            next_objective_for_victim: objective,
            dynamic_context_from_director: context,
            risk_level,
        }
    }
}

/// Analyzes the history against the script.
///
/// # Errors
///
/// `DirectorError` when the stage reported by the progress analysis cannot be
/// found in the script. Unreachable for validated scripts.
pub fn analyze_conversation(
    history: &ConversationHistory,
    script: &Script,
) -> Result<DirectorUpdate, DirectorError> {
    let progress = determine_stage(history, script);
    let stage = script
        .stage(&progress.current)
        .ok_or_else(|| DirectorError::StageLookup(progress.current.clone()))?;

    let next_objective = stage.objective().to_string();
    let context = build_context(script, &progress.current, &next_objective)?;
    let risk_level = score_risk(history);

    Ok(DirectorUpdate {
        script_id: script.script_id().clone(),
        stage_id: progress.current,
        completed_stages: progress.completed,
        next_objective_for_victim: next_objective,
        dynamic_context_from_director: context,
        risk_level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scenario::{ScriptDocument, StageDocument, Turn, DEFAULT_OBJECTIVE};

    fn stage(id: &str, signal: &str, objectives: &[&str]) -> StageDocument {
        StageDocument {
            stage_id: id.to_string(),
            summary: format!("{} summary", id),
            success_signals: vec![signal.to_string()],
            victim_objectives: objectives.iter().map(|o| o.to_string()).collect(),
        }
    }

    fn support_script() -> Script {
        Script::new(ScriptDocument {
            script_id: "microsoft_support".to_string(),
            title: "Fake Microsoft support".to_string(),
            description: String::new(),
            stages: vec![
                stage("virus_alert", "virus", &["Feign belief in the virus story"]),
                stage("remote_install", "anydesk", &["Struggle to find the keyboard"]),
            ],
        })
        .unwrap()
    }

    #[test]
    fn virus_then_anydesk_scenario() {
        let history: ConversationHistory = vec![
            Turn::scammer("you have a virus"),
            Turn::victim("oh no"),
            Turn::scammer("install anydesk"),
        ]
        .into_iter()
        .collect();

        let update = analyze_conversation(&history, &support_script()).unwrap();

        assert_eq!(update.script_id.as_str(), "microsoft_support");
        assert_eq!(update.stage_id, "remote_install");
        assert_eq!(update.completed_stages, vec![StageId::new("virus_alert").unwrap()]);
        assert_eq!(update.risk_level, RiskLevel::High);
        assert_eq!(update.next_objective_for_victim, "Struggle to find the keyboard");
        assert!(update
            .dynamic_context_from_director
            .contains("Your objective: Struggle to find the keyboard"));
    }

    #[test]
    fn empty_history_targets_entry_stage() {
        let update = analyze_conversation(&ConversationHistory::new(), &support_script()).unwrap();

        assert_eq!(update.stage_id, "virus_alert");
        assert!(update.completed_stages.is_empty());
        assert_eq!(update.risk_level, RiskLevel::Low);
        assert_eq!(update.next_objective_for_victim, "Feign belief in the virus story");
    }

    #[test]
    fn stage_without_objectives_uses_default() {
        let script = Script::new(ScriptDocument {
            script_id: "s".to_string(),
            title: "t".to_string(),
            description: String::new(),
            stages: vec![stage("only", "hello", &[])],
        })
        .unwrap();

        let update = analyze_conversation(&ConversationHistory::new(), &script).unwrap();
        assert_eq!(update.next_objective_for_victim, DEFAULT_OBJECTIVE);
    }

    #[test]
    fn entry_update_has_nothing_completed() {
        let update = DirectorUpdate::entry(&support_script(), RiskLevel::Moderate);

        assert_eq!(update.stage_id, "virus_alert");
        assert!(update.completed_stages.is_empty());
        assert_eq!(update.risk_level, RiskLevel::Moderate);
        assert!(update.dynamic_context_from_director.contains("Fake Microsoft support"));
    }

    #[test]
    fn update_serializes_risk_as_integer() {
        let update = analyze_conversation(&ConversationHistory::new(), &support_script()).unwrap();
        let json = serde_json::to_value(&update).unwrap();

        assert_eq!(json["risk_level"], 0);
        assert_eq!(json["stage_id"], "virus_alert");
    }
}
