//! The interventions panel controller.
//!
//! Owns `ViewState` for one student, routes host events through a delegation table
//! built once at mount, and reflects every change onto its `Surface`. Successful saves
//! commit and fully re-render; rejected saves only patch the originating form's error
//! container so unsaved input survives.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::app::{update, PanelAction, ViewState};
use crate::error::{PanelError, SaveRejected};
use crate::event::{DomEvent, Element, EventBinder, Handler};
use crate::model::{Educator, Intervention, InterventionId, ProgressNote, StudentId};
use crate::view::{self, FormKind, Surface, TemplateSet};

/// Construction contract for the controller.
#[derive(Debug)]
pub struct PanelOptions {
    pub student_id: StudentId,
    /// Server order; first one is selected initially
    pub interventions: Vec<Intervention>,
    pub templates: TemplateSet,
    /// Passed through unmodified to the new-progress-note area
    pub educators: Vec<Educator>,
    /// Forwarded verbatim to the date-picker initializer
    pub datepicker_options: Option<Value>,
}

pub struct InterventionsController<S: Surface> {
    state: ViewState,
    binder: EventBinder,
    templates: TemplateSet,
    educators: Vec<Educator>,
    datepicker_options: Option<Value>,
    surface: S,
}

impl<S: Surface> InterventionsController<S> {
    /// Seed state, bind listeners and render into `surface`.
    pub fn mount(options: PanelOptions, surface: S) -> Self {
        let PanelOptions {
            student_id,
            interventions,
            templates,
            educators,
            datepicker_options,
        } = options;

        let mut controller = Self {
            state: ViewState::new(student_id, interventions),
            binder: EventBinder::standard(),
            templates,
            educators,
            datepicker_options,
            surface,
        };
        tracing::debug!(
            student_id = %controller.state.student_id,
            interventions = controller.state.interventions.len(),
            bindings = controller.binder.bindings().len(),
            "mounted interventions panel"
        );
        controller.render();
        controller
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct access for host-side changes such as typed form input.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn binder(&self) -> &EventBinder {
        &self.binder
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Route one bubbling event to its handlers and run them to completion.
    /// Events matching no binding are ignored.
    pub fn handle_event(&mut self, event: &DomEvent) -> Result<(), PanelError> {
        let routed = self.binder.route(event);
        if routed.is_empty() {
            tracing::trace!(kind = ?event.kind, "event matched no binding");
        }
        for (handler, current_target) in routed {
            tracing::debug!(?handler, "handling event");
            self.dispatch(handler, current_target, event.payload.as_ref())?;
        }
        Ok(())
    }

    fn dispatch(
        &mut self,
        handler: Handler,
        current_target: &Element,
        payload: Option<&Value>,
    ) -> Result<(), PanelError> {
        match handler {
            Handler::OpenNewIntervention => self.transition(PanelAction::OpenNewInterventionForm),
            Handler::CancelNewIntervention => {
                self.transition(PanelAction::CancelNewInterventionForm)
            }
            Handler::SelectIntervention => {
                let id = current_target
                    .data("id")
                    .filter(|id| !id.is_empty())
                    .ok_or(PanelError::MissingDataId)?;
                self.transition(PanelAction::SelectIntervention(InterventionId::new(id)))
            }
            Handler::OpenNewProgressNote => self.transition(PanelAction::OpenNewProgressNoteForm),
            Handler::CancelNewProgressNote => {
                self.transition(PanelAction::CancelNewProgressNoteForm)
            }
            Handler::NewInterventionSaved => {
                let intervention: Intervention = parse_payload(handler, payload)?;
                self.on_new_intervention_saved(intervention)
            }
            Handler::ProgressNoteSaved => {
                let note: ProgressNote = parse_payload(handler, payload)?;
                self.on_progress_note_saved(note)
            }
            Handler::NewInterventionRejected => {
                let rejected: SaveRejected = parse_payload(handler, payload)?;
                self.on_save_rejected(FormKind::NewIntervention, &rejected);
                Ok(())
            }
            Handler::ProgressNoteRejected => {
                let rejected: SaveRejected = parse_payload(handler, payload)?;
                self.on_save_rejected(FormKind::NewProgressNote, &rejected);
                Ok(())
            }
        }
    }

    pub fn on_new_intervention_saved(&mut self, intervention: Intervention) -> Result<(), PanelError> {
        tracing::info!(intervention_id = %intervention.id, "intervention saved");
        self.transition(PanelAction::CommitNewIntervention(intervention))
    }

    pub fn on_progress_note_saved(&mut self, note: ProgressNote) -> Result<(), PanelError> {
        tracing::info!(progress_note_id = %note.id, "progress note saved");
        self.transition(PanelAction::CommitNewProgressNote(note))
    }

    /// Targeted patch: state and every other region stay as they are.
    pub fn on_save_rejected(&mut self, form: FormKind, rejected: &SaveRejected) {
        tracing::info!(form = form.class_name(), errors = rejected.errors.len(), "save rejected");
        let markup = view::render_error_list(&self.templates, &rejected.errors);
        if !self.surface.patch_errors(form, &markup) {
            tracing::warn!(form = form.class_name(), "no error container for rejected form");
        }
    }

    /// Apply a transition and fully re-render. A rejected transition renders nothing.
    pub fn transition(&mut self, action: PanelAction) -> Result<(), PanelError> {
        if let Err(violation) = update(&mut self.state, action) {
            tracing::error!(%violation, "transition rejected");
            return Err(violation.into());
        }
        self.render();
        Ok(())
    }

    /// Full projection of the current state onto the surface.
    pub fn render(&mut self) {
        let projection = view::project(&self.state, &self.templates, &self.educators);
        view::apply(&projection, &mut self.surface, self.datepicker_options.as_ref());
        tracing::debug!(
            selected = ?self.state.selected_intervention_id,
            showing_form = self.state.is_showing_new_intervention_form,
            adding_note = self.state.is_adding_progress_note,
            "rendered panel"
        );
    }
}

fn parse_payload<T: DeserializeOwned>(
    handler: Handler,
    payload: Option<&Value>,
) -> Result<T, PanelError> {
    let payload = payload.ok_or(PanelError::MissingPayload { handler })?;
    serde_json::from_value(payload.clone())
        .map_err(|source| PanelError::MalformedPayload { handler, source })
}
