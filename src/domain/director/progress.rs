//! Stage progress - walks the script in order against the history.

use regex::Regex;
use serde::Serialize;

use crate::domain::foundation::StageId;
use crate::domain::scenario::{ConversationHistory, Script, Stage};

/// Where the conversation stands in the script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageProgress {
    /// The stage being played.
    pub current: StageId,
    /// Stages already passed, always a prefix of the script order.
    pub completed: Vec<StageId>,
}

/// Determines the current stage and the completed stages.
///
/// Stages are evaluated strictly in order from the first. A stage is reached
/// when any of its success signals appears as a whole word (case-insensitive)
/// in any turn. Evaluation halts at the first stage with no matching signal,
/// which becomes the current stage; later stages are never checked.
///
/// When every stage has been reached the last one stays current: it has no
/// successor to hand over to, so it is not reported as completed.
pub fn determine_stage(history: &ConversationHistory, script: &Script) -> StageProgress {
    let stages = script.stages();
    let mut completed = Vec::new();

    for (index, stage) in stages.iter().enumerate() {
        let is_last = index + 1 == stages.len();
        if is_last || !stage_reached(stage, history) {
            return StageProgress {
                current: stage.stage_id().clone(),
                completed,
            };
        }
        completed.push(stage.stage_id().clone());
    }

    // Only reachable for a script without stages, which validation rejects.
    StageProgress {
        current: script.entry_stage().stage_id().clone(),
        completed,
    }
}

/// True if any success signal of the stage occurs in any turn.
fn stage_reached(stage: &Stage, history: &ConversationHistory) -> bool {
    stage
        .success_signals()
        .iter()
        .filter_map(|signal| signal_matcher(signal))
        .any(|matcher| history.turns().iter().any(|t| matcher.is_match(&t.content)))
}

/// Whole-word, case-insensitive matcher for a literal signal.
///
/// The signal must be bounded by a non-word character or the text edge on
/// each side, which also works for signals such as `c++` or `n°`.
fn signal_matcher(signal: &str) -> Option<Regex> {
    let pattern = format!(r"(?i)(?:^|\W){}(?:$|\W)", regex::escape(signal.trim()));
    match Regex::new(&pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!(signal, error = %e, "Skipping unusable success signal");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scenario::{ScriptDocument, StageDocument, Turn};
    use proptest::prelude::*;

    fn script(stages: &[(&str, &[&str])]) -> Script {
        Script::new(ScriptDocument {
            script_id: "test".to_string(),
            title: "Test script".to_string(),
            description: String::new(),
            stages: stages
                .iter()
                .map(|(id, signals)| StageDocument {
                    stage_id: id.to_string(),
                    summary: format!("{} summary", id),
                    success_signals: signals.iter().map(|s| s.to_string()).collect(),
                    victim_objectives: vec![],
                })
                .collect(),
        })
        .unwrap()
    }

    fn history(lines: &[&str]) -> ConversationHistory {
        lines.iter().map(|l| Turn::scammer(*l)).collect()
    }

    fn ids(ids: &[&str]) -> Vec<StageId> {
        ids.iter().map(|id| StageId::new(*id).unwrap()).collect()
    }

    fn three_stage_script() -> Script {
        script(&[
            ("hook", &["virus"]),
            ("install", &["anydesk", "teamviewer"]),
            ("payment", &["carte"]),
        ])
    }

    #[test]
    fn empty_history_starts_at_first_stage() {
        let progress = determine_stage(&ConversationHistory::new(), &three_stage_script());

        assert_eq!(progress.current, "hook");
        assert!(progress.completed.is_empty());
    }

    #[test]
    fn unmatched_first_stage_stays_current() {
        let progress = determine_stage(&history(&["Hello, how are you?"]), &three_stage_script());

        assert_eq!(progress.current, "hook");
        assert!(progress.completed.is_empty());
    }

    #[test]
    fn signals_with_punctuation_edges_match() {
        let script = script(&[("lang", &["c++"]), ("account", &["n°"]), ("end", &["bye"])]);

        let progress = determine_stage(&history(&["Do you code in C++?"]), &script);
        assert_eq!(progress.completed, ids(&["lang"]));

        let progress = determine_stage(
            &history(&["C++ is installed", "Donnez-moi votre n° client"]),
            &script,
        );
        assert_eq!(progress.completed, ids(&["lang", "account"]));

        let progress = determine_stage(&history(&["n°"]), &script);
        assert!(progress.completed.is_empty());
    }

    #[test]
    fn matched_stage_advances_to_next() {
        let progress = determine_stage(&history(&["Your computer has a VIRUS!"]), &three_stage_script());

        assert_eq!(progress.current, "install");
        assert_eq!(progress.completed, ids(&["hook"]));
    }

    #[test]
    fn later_stage_is_not_checked_before_earlier_one() {
        // "carte" would complete payment, but install is still pending
        let progress = determine_stage(
            &history(&["you have a virus", "give me your carte"]),
            &three_stage_script(),
        );

        assert_eq!(progress.current, "install");
        assert_eq!(progress.completed, ids(&["hook"]));
    }

    #[test]
    fn skipping_first_stage_completes_nothing() {
        let progress = determine_stage(&history(&["install anydesk now"]), &three_stage_script());

        assert_eq!(progress.current, "hook");
        assert!(progress.completed.is_empty());
    }

    #[test]
    fn signals_match_whole_words_only() {
        let progress = determine_stage(&history(&["an antivirus scan"]), &three_stage_script());

        assert_eq!(progress.current, "hook");
    }

    #[test]
    fn any_signal_of_a_stage_is_enough() {
        let progress = determine_stage(
            &history(&["a virus", "please open TeamViewer"]),
            &three_stage_script(),
        );

        assert_eq!(progress.current, "payment");
        assert_eq!(progress.completed, ids(&["hook", "install"]));
    }

    #[test]
    fn final_stage_stays_current_once_reached() {
        let two_stages = script(&[("hook", &["virus"]), ("install", &["anydesk"])]);
        let progress = determine_stage(
            &history(&["you have a virus", "oh no", "install anydesk"]),
            &two_stages,
        );

        assert_eq!(progress.current, "install");
        assert_eq!(progress.completed, ids(&["hook"]));
    }

    #[test]
    fn signals_found_in_victim_lines_count() {
        let mut h = ConversationHistory::new();
        h.push_scammer("Hello");
        h.push_victim("Is it a virus?");

        let progress = determine_stage(&h, &three_stage_script());
        assert_eq!(progress.completed, ids(&["hook"]));
    }

    #[test]
    fn multi_word_signals_are_matched_literally() {
        let s = script(&[("hook", &["prise en main"]), ("end", &[])]);

        let progress = determine_stage(&history(&["une prise en main à distance"]), &s);
        assert_eq!(progress.completed, ids(&["hook"]));

        let progress = determine_stage(&history(&["prise de main"]), &s);
        assert!(progress.completed.is_empty());
    }

    proptest! {
        #[test]
        fn completed_stages_are_a_prefix_of_script_order(
            lines in proptest::collection::vec(
                prop_oneof![
                    Just("virus"), Just("anydesk"), Just("carte"),
                    Just("hello"), Just("teamviewer"), Just("nothing here"),
                ],
                0..8,
            )
        ) {
            let s = three_stage_script();
            let progress = determine_stage(&history(&lines), &s);
            let order: Vec<StageId> = s.stages().iter().map(|st| st.stage_id().clone()).collect();

            prop_assert_eq!(&progress.completed[..], &order[..progress.completed.len()]);
            prop_assert_eq!(&progress.current, &order[progress.completed.len()]);
        }
    }
}
