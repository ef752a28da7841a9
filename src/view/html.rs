//! Built-in HTML templates for the panel.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use super::templates::{TemplateKey, TemplateSet};
use crate::error::PanelError;

const DATE_DISPLAY: &str = "%B %-d, %Y";

pub fn template_set() -> Result<TemplateSet, PanelError> {
    TemplateSet::builder()
        .with(TemplateKey::Shell, shell)
        .with(TemplateKey::InterventionCell, intervention_cell)
        .with(TemplateKey::InterventionDetails, intervention_details)
        .with(TemplateKey::NewInterventionForm, new_intervention_form)
        .with(TemplateKey::ProgressNote, progress_note)
        .with(TemplateKey::NewProgressNoteArea, new_progress_note_area)
        .with(TemplateKey::ErrorList, error_list)
        .build()
}

/// Escape text for element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Dates (`2016-01-04`) and timestamps render as "January 4, 2016"; anything else verbatim.
pub fn format_date(raw: &str) -> String {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format(DATE_DISPLAY).to_string();
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.format(DATE_DISPLAY).to_string();
    }
    raw.to_string()
}

/// String view of a view-model field; numbers are shown as-is, missing is empty.
fn text(vm: &Value, key: &str) -> String {
    match &vm[key] {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn shell(_: &Value) -> String {
    concat!(
        r#"<div class="interventions-panel">"#,
        r#"<div class="interventions-column">"#,
        r#"<button id="open-intervention-form" class="btn">Add intervention</button>"#,
        r#"<div class="intervention-cell-list"></div>"#,
        "</div>",
        r#"<div class="details-column">"#,
        r#"<div class="new-intervention-container"></div>"#,
        r#"<div class="intervention-details-list"></div>"#,
        r#"<div class="progress-notes-list"></div>"#,
        r#"<div class="new-progress-note-area"></div>"#,
        "</div>",
        "</div>"
    )
    .to_string()
}

fn intervention_cell(vm: &Value) -> String {
    format!(
        r#"<div class="intervention-cell {}" data-id="{}"><span class="name">{}</span><span class="dates">{}</span></div>"#,
        escape(&text(vm, "activatedClass")),
        escape(&text(vm, "id")),
        escape(&text(vm, "name")),
        escape(&format_date(&text(vm, "start_date"))),
    )
}

fn intervention_details(vm: &Value) -> String {
    let mut out = format!(
        r#"<div class="intervention-detail" data-id="{}"><h2>{}</h2>"#,
        escape(&text(vm, "id")),
        escape(&text(vm, "name")),
    );
    for (label, key) in [("Goal", "goal"), ("Comment", "comment"), ("Educator", "educator_email")] {
        let value = text(vm, key);
        if !value.is_empty() {
            out.push_str(&format!(
                r#"<p class="{}"><strong>{}:</strong> {}</p>"#,
                key,
                label,
                escape(&value)
            ));
        }
    }
    let start = text(vm, "start_date");
    let end = text(vm, "end_date");
    if !start.is_empty() {
        out.push_str(&format!(
            r#"<p class="dates">{} &ndash; {}</p>"#,
            escape(&format_date(&start)),
            escape(&format_date(&end)),
        ));
    }
    out.push_str("</div>");
    out
}

fn new_intervention_form(vm: &Value) -> String {
    format!(
        concat!(
            r#"<div class="new-intervention">"#,
            r#"<div class="alert errors"></div>"#,
            r#"<form class="new-intervention-form" action="/students/{student}/interventions" method="post" data-remote="true">"#,
            r#"<input type="hidden" name="intervention[student_id]" value="{student}">"#,
            r#"<input type="text" name="intervention[goal]">"#,
            r#"<textarea name="intervention[comment]"></textarea>"#,
            r#"<input type="text" class="datepicker" name="intervention[end_date]">"#,
            r#"<button type="submit">Save</button>"#,
            r#"<button type="button" id="close-intervention-form">Cancel</button>"#,
            "</form>",
            "</div>"
        ),
        student = escape(&text(vm, "studentId")),
    )
}

fn progress_note(vm: &Value) -> String {
    format!(
        r#"<div class="progress-note" data-id="{}"><p class="content">{}</p><p class="byline">{} &middot; {}</p></div>"#,
        escape(&text(vm, "id")),
        escape(&text(vm, "content")),
        escape(&text(vm, "educator_email")),
        escape(&format_date(&text(vm, "created_at"))),
    )
}

/// Notes can only be added to a selected intervention, so without one there is nothing to offer.
fn new_progress_note_area(vm: &Value) -> String {
    if vm["interventionId"].is_null() {
        return String::new();
    }
    if vm["isAddingProgressNote"] != Value::Bool(true) {
        return r#"<button class="add-progress-note btn">Add progress note</button>"#.to_string();
    }
    let options: String = vm["educators"]
        .as_array()
        .map(|educators| {
            educators
                .iter()
                .map(|educator| {
                    let label = match text(educator, "full_name") {
                        name if name.is_empty() => text(educator, "email"),
                        name => name,
                    };
                    format!(
                        r#"<option value="{}">{}</option>"#,
                        escape(&text(educator, "id")),
                        escape(&label)
                    )
                })
                .collect()
        })
        .unwrap_or_default();
    format!(
        concat!(
            r#"<div class="new-progress-note">"#,
            r#"<div class="alert errors"></div>"#,
            r#"<form class="new-progress-note-form" action="/progress_notes" method="post" data-remote="true">"#,
            r#"<input type="hidden" name="progress_note[intervention_id]" value="{intervention}">"#,
            r#"<select name="progress_note[educator_id]">{options}</select>"#,
            r#"<textarea name="progress_note[content]"></textarea>"#,
            r#"<button type="submit">Save</button>"#,
            r#"<button type="button" class="cancel-progress-note">Cancel</button>"#,
            "</form>",
            "</div>"
        ),
        intervention = escape(&text(vm, "interventionId")),
        options = options,
    )
}

fn error_list(vm: &Value) -> String {
    let items: String = vm["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(Value::as_str)
                .map(|e| format!("<li>{}</li>", escape(e)))
                .collect()
        })
        .unwrap_or_default();
    format!("<ul>{}</ul>", items)
}
