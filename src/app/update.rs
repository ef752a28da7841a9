use crate::app::ViewState;
use crate::error::ContractViolation;
use crate::model::{Intervention, InterventionId, ProgressNote};

/// Every named transition of the panel state.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    SelectIntervention(InterventionId),
    OpenNewInterventionForm,
    CancelNewInterventionForm,
    OpenNewProgressNoteForm,
    CancelNewProgressNoteForm,
    CommitNewIntervention(Intervention),
    CommitNewProgressNote(ProgressNote),
}

/// Single entry point for state transitions following Elm Architecture.
/// No I/O, no rendering. On error the state is left exactly as it was.
pub fn update(state: &mut ViewState, action: PanelAction) -> Result<(), ContractViolation> {
    match action {
        PanelAction::SelectIntervention(id) => state.select_intervention(id),
        PanelAction::OpenNewInterventionForm => state.open_new_intervention_form(),
        PanelAction::CancelNewInterventionForm => state.cancel_new_intervention_form(),
        PanelAction::OpenNewProgressNoteForm => state.open_new_progress_note_form(),
        PanelAction::CancelNewProgressNoteForm => state.cancel_new_progress_note_form(),
        PanelAction::CommitNewIntervention(intervention) => {
            state.commit_new_intervention(intervention)
        }
        PanelAction::CommitNewProgressNote(note) => return state.commit_new_progress_note(note),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StudentId;

    #[test]
    fn update_commit_intervention_prepends_and_selects() {
        let mut state = ViewState::new(StudentId::new("s1"), vec![Intervention::new("a")]);

        update(
            &mut state,
            PanelAction::CommitNewIntervention(Intervention::new("c")),
        )
        .unwrap();

        let ids: Vec<_> = state.interventions.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
        assert_eq!(state.selected_intervention_id, Some("c".into()));
    }

    #[test]
    fn update_open_form_clears_note_flag() {
        let mut state = ViewState::new(StudentId::new("s1"), vec![Intervention::new("a")]);
        state.is_adding_progress_note = true;

        update(&mut state, PanelAction::OpenNewInterventionForm).unwrap();

        assert!(!state.is_adding_progress_note);
        assert!(state.is_showing_new_intervention_form);
        assert!(state.selected_intervention_id.is_none());
    }

    #[test]
    fn update_propagates_contract_violation() {
        let mut state = ViewState::new(StudentId::new("s1"), vec![]);
        let result = update(
            &mut state,
            PanelAction::CommitNewProgressNote(ProgressNote::new("n")),
        );
        assert_eq!(result, Err(ContractViolation::NoSelectedIntervention));
    }
}
