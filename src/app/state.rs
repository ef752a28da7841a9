use crate::error::ContractViolation;
use crate::model::{Intervention, InterventionId, ProgressNote, StudentId};

/// UI state of one student's interventions panel.
/// Owned by the controller and mutated only through the transitions below.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Fixed at construction
    pub student_id: StudentId,

    /// Newest first: created interventions are prepended
    pub interventions: Vec<Intervention>,

    /// May name an id that is no longer (or never was) in `interventions`
    pub selected_intervention_id: Option<InterventionId>,

    pub is_showing_new_intervention_form: bool,

    /// Only meaningful while an intervention is selected
    pub is_adding_progress_note: bool,
}

impl ViewState {
    /// Seed state from server-provided data.
    /// With nothing to show, the new-intervention form starts open.
    pub fn new(student_id: StudentId, interventions: Vec<Intervention>) -> Self {
        let is_showing_new_intervention_form = interventions.is_empty();
        let mut state = Self {
            student_id,
            interventions,
            selected_intervention_id: None,
            is_showing_new_intervention_form,
            is_adding_progress_note: false,
        };
        state.selected_intervention_id = state.default_selection();
        state
    }

    /// First intervention in display order, if any.
    pub fn default_selection(&self) -> Option<InterventionId> {
        self.interventions.first().map(|i| i.id.clone())
    }

    /// "No selection" and "selection not found" are deliberately indistinguishable.
    pub fn selected_intervention(&self) -> Option<&Intervention> {
        let id = self.selected_intervention_id.as_ref()?;
        self.interventions.iter().find(|i| &i.id == id)
    }

    fn selected_intervention_mut(&mut self) -> Option<&mut Intervention> {
        let id = self.selected_intervention_id.as_ref()?;
        self.interventions.iter_mut().find(|i| &i.id == id)
    }

    pub fn is_selected(&self, id: &InterventionId) -> bool {
        self.selected_intervention_id.as_ref() == Some(id)
    }

    /// No existence check: the UI only emits ids it rendered.
    pub fn select_intervention(&mut self, id: InterventionId) {
        self.selected_intervention_id = Some(id);
        self.is_adding_progress_note = false;
        self.is_showing_new_intervention_form = false;
    }

    pub fn open_new_intervention_form(&mut self) {
        self.selected_intervention_id = None;
        self.is_showing_new_intervention_form = true;
        self.is_adding_progress_note = false;
    }

    pub fn cancel_new_intervention_form(&mut self) {
        self.is_showing_new_intervention_form = false;
        self.selected_intervention_id = self.default_selection();
    }

    pub fn open_new_progress_note_form(&mut self) {
        self.is_adding_progress_note = true;
    }

    pub fn cancel_new_progress_note_form(&mut self) {
        self.is_adding_progress_note = false;
    }

    /// Prepend a saved intervention and select it.
    pub fn commit_new_intervention(&mut self, intervention: Intervention) {
        self.interventions.insert(0, intervention);
        self.selected_intervention_id = self.default_selection();
        self.is_showing_new_intervention_form = false;
    }

    /// Append a saved note to the selected intervention.
    /// Leaves the state untouched when nothing is selected.
    pub fn commit_new_progress_note(
        &mut self,
        note: ProgressNote,
    ) -> Result<(), ContractViolation> {
        let intervention = self
            .selected_intervention_mut()
            .ok_or(ContractViolation::NoSelectedIntervention)?;
        intervention.progress_notes.push(note);
        self.is_adding_progress_note = false;
        Ok(())
    }
}
