//! Render projection for the interventions panel.
//!
//! Two paths that must stay separate: `project`/`apply` rebuild the whole panel from
//! state, `render_error_list` produces the fragment for a form's error container and
//! never touches anything else.

use serde_json::{json, Map, Value};

use crate::app::ViewState;
use crate::event::Selector;
use crate::model::{Educator, Intervention};

pub mod html;
pub mod surface;
pub mod templates;

pub use surface::{FormKind, MarkupDocument, Region, Surface};
pub use templates::{TemplateKey, TemplateSet};

/// Elements the date-picker initializer attaches to.
pub const DATEPICKER_SELECTOR: &str = ".datepicker";

/// Detail-pane content when the student has no interventions at all.
pub const ZERO_INTERVENTIONS: &str = r#"<div class="zero-interventions">No interventions.</div>"#;

/// Class applied to the cell of the selected intervention.
pub const ACTIVATED_CLASS: &str = "activated";

/// Markup for every region, computed from state alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub shell: String,
    pub intervention_cells: String,
    pub intervention_details: String,
    pub new_intervention_form: String,
    pub progress_notes: String,
    pub new_progress_note_area: String,
}

impl Projection {
    pub fn region(&self, region: Region) -> &str {
        match region {
            Region::InterventionCellList => &self.intervention_cells,
            Region::InterventionDetailsList => &self.intervention_details,
            Region::NewInterventionContainer => &self.new_intervention_form,
            Region::ProgressNotesList => &self.progress_notes,
            Region::NewProgressNoteArea => &self.new_progress_note_area,
        }
    }
}

/// Pure full projection: same state and templates always give the same markup.
pub fn project(state: &ViewState, templates: &TemplateSet, educators: &[Educator]) -> Projection {
    Projection {
        shell: templates.render(TemplateKey::Shell, &json!({})),
        intervention_cells: render_intervention_cells(state, templates),
        intervention_details: render_intervention_details(state, templates),
        new_intervention_form: render_new_intervention_form(state, templates),
        progress_notes: render_progress_notes(state, templates),
        new_progress_note_area: render_new_progress_note_area(state, templates, educators),
    }
}

/// Replace the surface's markup with `projection` and re-attach date pickers,
/// whose previous attachments went away with the old markup.
pub fn apply<S: Surface + ?Sized>(
    projection: &Projection,
    surface: &mut S,
    datepicker_options: Option<&Value>,
) {
    surface.replace_root(&projection.shell);
    for region in Region::ALL {
        surface.fill_region(region, projection.region(region));
    }

    let empty = Value::Object(Map::new());
    let options = datepicker_options.unwrap_or(&empty);
    if let Some(selector) = Selector::parse(DATEPICKER_SELECTOR) {
        surface.attach_widgets(&selector, options);
    }
}

/// Fragment for a form's error container.
pub fn render_error_list(templates: &TemplateSet, errors: &[String]) -> String {
    templates.render(TemplateKey::ErrorList, &json!({ "errors": errors }))
}

pub fn render_intervention_cells(state: &ViewState, templates: &TemplateSet) -> String {
    state
        .interventions
        .iter()
        .map(|intervention| {
            let activated = if state.is_selected(&intervention.id) {
                ACTIVATED_CLASS
            } else {
                ""
            };
            let mut view_model = record_view_model(intervention);
            view_model.insert("activatedClass".to_string(), json!(activated));
            templates.render(TemplateKey::InterventionCell, &Value::Object(view_model))
        })
        .collect()
}

pub fn render_intervention_details(state: &ViewState, templates: &TemplateSet) -> String {
    if state.interventions.is_empty() {
        return ZERO_INTERVENTIONS.to_string();
    }
    match state.selected_intervention() {
        Some(intervention) => templates.render(
            TemplateKey::InterventionDetails,
            &Value::Object(record_view_model(intervention)),
        ),
        None => String::new(),
    }
}

pub fn render_new_intervention_form(state: &ViewState, templates: &TemplateSet) -> String {
    if !state.is_showing_new_intervention_form {
        return String::new();
    }
    templates.render(
        TemplateKey::NewInterventionForm,
        &json!({ "studentId": state.student_id }),
    )
}

pub fn render_progress_notes(state: &ViewState, templates: &TemplateSet) -> String {
    let Some(intervention) = state.selected_intervention() else {
        return String::new();
    };
    intervention
        .progress_notes
        .iter()
        .map(|note| {
            let view_model = serde_json::to_value(note).unwrap_or(Value::Null);
            templates.render(TemplateKey::ProgressNote, &view_model)
        })
        .collect()
}

/// Always rendered; the template decides between the trigger and the form.
pub fn render_new_progress_note_area(
    state: &ViewState,
    templates: &TemplateSet,
    educators: &[Educator],
) -> String {
    templates.render(
        TemplateKey::NewProgressNoteArea,
        &json!({
            "interventionId": state.selected_intervention_id,
            "isAddingProgressNote": state.is_adding_progress_note,
            "educators": educators,
        }),
    )
}

fn record_view_model(intervention: &Intervention) -> Map<String, Value> {
    match serde_json::to_value(intervention) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
