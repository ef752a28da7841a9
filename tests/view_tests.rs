use interventions_panel::app::ViewState;
use interventions_panel::event::{DomEvent, Selector};
use interventions_panel::model::{Educator, Intervention, ProgressNote, StudentId};
use interventions_panel::view::{
    self, html, FormKind, MarkupDocument, Region, Surface, TemplateKey, TemplateSet,
};
use interventions_panel::{InterventionsController, PanelOptions};
use serde_json::{json, Value};

/// Surface that records every call in order.
#[derive(Default)]
struct RecordingSurface {
    calls: Vec<String>,
}

impl Surface for RecordingSurface {
    fn replace_root(&mut self, markup: &str) {
        self.calls.push(format!("root:{}", markup));
    }

    fn fill_region(&mut self, region: Region, markup: &str) {
        self.calls.push(format!("{}:{}", region.class_name(), markup));
    }

    fn patch_errors(&mut self, form: FormKind, markup: &str) -> bool {
        self.calls.push(format!("errors:{}:{}", form.class_name(), markup));
        true
    }

    fn attach_widgets(&mut self, selector: &Selector, options: &Value) {
        self.calls.push(format!("widgets:{}:{}", selector, options));
    }
}

fn tagged_templates() -> TemplateSet {
    TemplateSet::builder()
        .with(TemplateKey::Shell, |_| "S".to_string())
        .with(TemplateKey::InterventionCell, |vm| {
            format!("c{}{}", vm["id"].as_str().unwrap_or("?"), vm["activatedClass"].as_str().unwrap_or(""))
        })
        .with(TemplateKey::InterventionDetails, |vm| {
            format!("d{}", vm["id"].as_str().unwrap_or("?"))
        })
        .with(TemplateKey::NewInterventionForm, |_| "F".to_string())
        .with(TemplateKey::ProgressNote, |vm| format!("n{}", vm["id"].as_str().unwrap_or("?")))
        .with(TemplateKey::NewProgressNoteArea, |vm| {
            format!(
                "a{}:{}:{}",
                vm["interventionId"].as_str().unwrap_or("-"),
                vm["isAddingProgressNote"],
                vm["educators"].as_array().map(Vec::len).unwrap_or(0)
            )
        })
        .with(TemplateKey::ErrorList, |vm| format!("E{}", vm["errors"]))
        .build()
        .unwrap()
}

fn sample_state() -> ViewState {
    ViewState::new(
        StudentId::new("s1"),
        vec![
            Intervention::new("1").with_progress_notes(vec![ProgressNote::new("x")]),
            Intervention::new("2"),
        ],
    )
}

#[test]
fn apply_replaces_root_then_fills_regions_then_attaches_widgets() {
    let templates = tagged_templates();
    let educators = vec![Educator::new("e1")];
    let projection = view::project(&sample_state(), &templates, &educators);
    let mut surface = RecordingSurface::default();

    view::apply(&projection, &mut surface, None);

    assert_eq!(
        surface.calls,
        vec![
            "root:S",
            "intervention-cell-list:c1activatedc2",
            "intervention-details-list:d1",
            "new-intervention-container:",
            "progress-notes-list:nx",
            "new-progress-note-area:a1:false:1",
            "widgets:.datepicker:{}",
        ]
    );
}

#[test]
fn projection_with_form_open_has_no_selection() {
    let mut state = sample_state();
    state.open_new_intervention_form();

    let projection = view::project(&state, &tagged_templates(), &[]);

    assert_eq!(projection.intervention_cells, "c1c2");
    assert_eq!(projection.intervention_details, "");
    assert_eq!(projection.new_intervention_form, "F");
    assert_eq!(projection.progress_notes, "");
    assert_eq!(projection.new_progress_note_area, "a-:false:0");
}

#[test]
fn save_failure_touches_only_the_error_container() {
    let options = PanelOptions {
        student_id: StudentId::new("s1"),
        interventions: sample_state().interventions,
        templates: tagged_templates(),
        educators: vec![],
        datepicker_options: None,
    };
    let mut controller = InterventionsController::mount(options, RecordingSurface::default());
    controller.surface_mut().calls.clear();

    let event = DomEvent::save_failed(
        FormKind::NewIntervention.element(),
        json!({"errors": ["bad"]}),
    );
    controller.handle_event(&event).unwrap();

    assert_eq!(
        controller.surface().calls,
        vec![r#"errors:new-intervention-form:E["bad"]"#]
    );
}

#[test]
fn save_success_goes_through_full_projection() {
    let options = PanelOptions {
        student_id: StudentId::new("s1"),
        interventions: sample_state().interventions,
        templates: tagged_templates(),
        educators: vec![],
        datepicker_options: None,
    };
    let mut controller = InterventionsController::mount(options, RecordingSurface::default());
    controller.surface_mut().calls.clear();

    let event = DomEvent::save_succeeded(FormKind::NewIntervention.element(), json!({"id": "3"}));
    controller.handle_event(&event).unwrap();

    let calls = &controller.surface().calls;
    assert_eq!(calls.first().map(String::as_str), Some("root:S"));
    assert_eq!(calls.len(), 7);
    assert!(!calls.iter().any(|c| c.starts_with("errors:")));
}

#[test]
fn html_templates_render_complete_document() {
    let templates = html::template_set().unwrap();
    let state = ViewState::new(
        StudentId::new("9"),
        vec![Intervention::new("5")
            .with_field("name", "After-school <help>")
            .with_field("start_date", "2016-03-01")],
    );
    let mut doc = MarkupDocument::new();

    view::apply(&view::project(&state, &templates, &[]), &mut doc, Some(&json!({"x": 1})));
    let html = doc.to_html();

    assert!(html.starts_with(r#"<div class="interventions-panel">"#));
    assert!(html.contains(r#"<div class="intervention-cell-list"><div class="intervention-cell activated" data-id="5">"#));
    assert!(html.contains("After-school &lt;help&gt;"));
    assert!(html.contains("March 1, 2016"));
    assert!(html.contains(r#"<button class="add-progress-note btn">"#));
    assert!(!html.contains("zero-interventions"));
}

#[test]
fn html_templates_show_note_and_educator_fields() {
    let templates = html::template_set().unwrap();
    let state = ViewState::new(
        StudentId::new("9"),
        vec![Intervention::new("5").with_progress_notes(vec![ProgressNote::new("p1")
            .with_field("content", "Met with family")
            .with_field("educator_email", "teacher@school.edu")
            .with_field("created_at", "2016-04-12")])],
    );
    let educators = vec![Educator::new(4u64).with_field("full_name", "Mr. Kennedy")];
    let mut doc = MarkupDocument::new();
    let mut adding = state.clone();
    adding.open_new_progress_note_form();

    view::apply(&view::project(&adding, &templates, &educators), &mut doc, None);

    let html = doc.to_html();
    assert!(html.contains("Met with family"));
    assert!(html.contains("teacher@school.edu &middot; April 12, 2016"));
    assert!(html.contains(r#"<option value="4">Mr. Kennedy</option>"#));
}

#[test]
fn html_zero_state_document() {
    let templates = html::template_set().unwrap();
    let state = ViewState::new(StudentId::new("9"), vec![]);
    let mut doc = MarkupDocument::new();

    view::apply(&view::project(&state, &templates, &[]), &mut doc, None);

    let html = doc.to_html();
    assert!(html.contains(view::ZERO_INTERVENTIONS));
    assert!(html.contains(r#"<form class="new-intervention-form""#));
    assert!(html.contains(r#"id="close-intervention-form""#));
}
