//! Scam script definition.
//!
//! A script is loaded once per session and never mutated. Stages are totally
//! ordered: the director only ever walks them from the first one.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{ScriptId, StageId, ValidationError};

/// Objective handed to the victim when a stage lists none.
pub const DEFAULT_OBJECTIVE: &str = "Stay cautious";

/// Immutable scenario definition.
///
/// Construct through [`Script::new`] or deserialize from a [`ScriptDocument`];
/// both paths validate, so a `Script` always has at least one stage and
/// unique stage ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScriptDocument", into = "ScriptDocument")]
pub struct Script {
    script_id: ScriptId,
    title: String,
    description: String,
    stages: Vec<Stage>,
}

/// One phase of a scam script.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    stage_id: StageId,
    summary: String,
    success_signals: Vec<String>,
    victim_objectives: Vec<String>,
}

/// Wire shape of a script, as stored in JSON or YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptDocument {
    pub script_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub stages: Vec<StageDocument>,
}

/// Wire shape of a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDocument {
    pub stage_id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub success_signals: Vec<String>,
    #[serde(default)]
    pub victim_objectives: Vec<String>,
}

impl Script {
    /// Validates a document and builds the script.
    ///
    /// # Errors
    ///
    /// - empty script id or stage id
    /// - no stages
    /// - duplicate stage ids
    /// - blank success signals (a blank signal would match any history)
    pub fn new(document: ScriptDocument) -> Result<Self, ValidationError> {
        let script_id = ScriptId::new(document.script_id)?;

        if document.stages.is_empty() {
            return Err(ValidationError::empty_field("stages"));
        }

        let mut seen = HashSet::new();
        let mut stages = Vec::with_capacity(document.stages.len());
        for stage in document.stages {
            let stage = Stage::new(stage)?;
            if !seen.insert(stage.stage_id.clone()) {
                return Err(ValidationError::duplicate("stage_id", stage.stage_id.as_str()));
            }
            stages.push(stage);
        }

        Ok(Self {
            script_id,
            title: document.title,
            description: document.description,
            stages,
        })
    }

    pub fn script_id(&self) -> &ScriptId {
        &self.script_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Stages in script order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// The first stage. Construction guarantees at least one stage.
    pub fn entry_stage(&self) -> &Stage {
        &self.stages[0]
    }

    /// Looks up a stage by id.
    pub fn stage(&self, stage_id: &StageId) -> Option<&Stage> {
        self.stages.iter().find(|s| &s.stage_id == stage_id)
    }
}

impl TryFrom<ScriptDocument> for Script {
    type Error = ValidationError;

    fn try_from(document: ScriptDocument) -> Result<Self, Self::Error> {
        Script::new(document)
    }
}

impl From<Script> for ScriptDocument {
    fn from(script: Script) -> Self {
        Self {
            script_id: script.script_id.as_str().to_string(),
            title: script.title,
            description: script.description,
            stages: script.stages.into_iter().map(StageDocument::from).collect(),
        }
    }
}

impl Stage {
    fn new(document: StageDocument) -> Result<Self, ValidationError> {
        let stage_id = StageId::new(document.stage_id)?;

        if document.success_signals.iter().any(|s| s.trim().is_empty()) {
            return Err(ValidationError::invalid_format(
                "success_signals",
                format!("stage '{}' contains a blank signal", stage_id),
            ));
        }

        Ok(Self {
            stage_id,
            summary: document.summary,
            success_signals: document.success_signals,
            victim_objectives: document.victim_objectives,
        })
    }

    pub fn stage_id(&self) -> &StageId {
        &self.stage_id
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn success_signals(&self) -> &[String] {
        &self.success_signals
    }

    pub fn victim_objectives(&self) -> &[String] {
        &self.victim_objectives
    }

    /// The tactical objective for the victim: the first listed, or
    /// [`DEFAULT_OBJECTIVE`] when the stage has none.
    pub fn objective(&self) -> &str {
        self.victim_objectives
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_OBJECTIVE)
    }
}

impl From<Stage> for StageDocument {
    fn from(stage: Stage) -> Self {
        Self {
            stage_id: stage.stage_id.as_str().to_string(),
            summary: stage.summary,
            success_signals: stage.success_signals,
            victim_objectives: stage.victim_objectives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_doc(id: &str, signals: &[&str], objectives: &[&str]) -> StageDocument {
        StageDocument {
            stage_id: id.to_string(),
            summary: format!("Summary of {}", id),
            success_signals: signals.iter().map(|s| s.to_string()).collect(),
            victim_objectives: objectives.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn doc(stages: Vec<StageDocument>) -> ScriptDocument {
        ScriptDocument {
            script_id: "tech_support".to_string(),
            title: "Fake tech support".to_string(),
            description: "Caller pretends to be from support".to_string(),
            stages,
        }
    }

    #[test]
    fn builds_valid_script() {
        let script = Script::new(doc(vec![
            stage_doc("hook", &["virus"], &["Ask silly questions"]),
            stage_doc("install", &["anydesk"], &[]),
        ]))
        .unwrap();

        assert_eq!(script.script_id().as_str(), "tech_support");
        assert_eq!(script.stages().len(), 2);
        assert_eq!(script.entry_stage().stage_id(), &"hook");
    }

    #[test]
    fn rejects_script_without_stages() {
        let err = Script::new(doc(vec![])).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("stages"));
    }

    #[test]
    fn rejects_duplicate_stage_ids() {
        let err = Script::new(doc(vec![
            stage_doc("hook", &["virus"], &[]),
            stage_doc("hook", &["anydesk"], &[]),
        ]))
        .unwrap_err();

        assert!(matches!(err, ValidationError::Duplicate { .. }));
    }

    #[test]
    fn rejects_blank_signal() {
        let err = Script::new(doc(vec![stage_doc("hook", &["  "], &[])])).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn rejects_empty_script_id() {
        let mut document = doc(vec![stage_doc("hook", &["virus"], &[])]);
        document.script_id = String::new();

        assert!(Script::new(document).is_err());
    }

    #[test]
    fn objective_defaults_when_stage_has_none() {
        let script = Script::new(doc(vec![
            stage_doc("hook", &["virus"], &["Feign belief", "Ask questions"]),
            stage_doc("install", &["anydesk"], &[]),
        ]))
        .unwrap();

        assert_eq!(script.stages()[0].objective(), "Feign belief");
        assert_eq!(script.stages()[1].objective(), DEFAULT_OBJECTIVE);
    }

    #[test]
    fn looks_up_stage_by_id() {
        let script = Script::new(doc(vec![
            stage_doc("hook", &["virus"], &[]),
            stage_doc("install", &["anydesk"], &[]),
        ]))
        .unwrap();
        let install = StageId::new("install").unwrap();
        let missing = StageId::new("payment").unwrap();

        assert_eq!(script.stage(&install).map(|s| s.summary()), Some("Summary of install"));
        assert!(script.stage(&missing).is_none());
    }

    #[test]
    fn deserializes_and_validates_json() {
        let json = r#"{
            "script_id": "bank_fraud",
            "title": "Fake bank advisor",
            "stages": [
                {"stage_id": "contact", "summary": "Advisor calls", "success_signals": ["banque"], "victim_objectives": ["Be polite"]}
            ]
        }"#;

        let script: Script = serde_json::from_str(json).unwrap();
        assert_eq!(script.title(), "Fake bank advisor");
        assert_eq!(script.description(), "");

        let invalid = r#"{"script_id": "x", "title": "t", "stages": []}"#;
        assert!(serde_json::from_str::<Script>(invalid).is_err());
    }

    #[test]
    fn serializes_back_to_document_shape() {
        let script = Script::new(doc(vec![stage_doc("hook", &["virus"], &["Stall"])])).unwrap();

        let value = serde_json::to_value(&script).unwrap();
        assert_eq!(value["script_id"], "tech_support");
        assert_eq!(value["stages"][0]["success_signals"][0], "virus");
    }
}
