use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::event::{Element, Selector};

/// Named sub-regions of the shell template, addressed by class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    InterventionCellList,
    InterventionDetailsList,
    NewInterventionContainer,
    ProgressNotesList,
    NewProgressNoteArea,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::InterventionCellList,
        Region::InterventionDetailsList,
        Region::NewInterventionContainer,
        Region::ProgressNotesList,
        Region::NewProgressNoteArea,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            Region::InterventionCellList => "intervention-cell-list",
            Region::InterventionDetailsList => "intervention-details-list",
            Region::NewInterventionContainer => "new-intervention-container",
            Region::ProgressNotesList => "progress-notes-list",
            Region::NewProgressNoteArea => "new-progress-note-area",
        }
    }
}

/// The two forms whose saves the panel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    NewIntervention,
    NewProgressNote,
}

impl FormKind {
    pub fn class_name(self) -> &'static str {
        match self {
            FormKind::NewIntervention => "new-intervention-form",
            FormKind::NewProgressNote => "new-progress-note-form",
        }
    }

    /// Region whose template renders this form.
    pub fn region(self) -> Region {
        match self {
            FormKind::NewIntervention => Region::NewInterventionContainer,
            FormKind::NewProgressNote => Region::NewProgressNoteArea,
        }
    }

    pub fn element(self) -> Element {
        Element::new().with_class(self.class_name())
    }
}

/// Class tokens of the error container that sits next to each form.
pub const ERROR_CONTAINER_CLASSES: [&str; 2] = ["alert", "errors"];

/// The persistent root element the controller renders into.
pub trait Surface {
    /// Replace the root's entire inner markup. Everything previously rendered is gone.
    fn replace_root(&mut self, markup: &str);

    /// Set the inner markup of a region created by the last `replace_root`.
    fn fill_region(&mut self, region: Region, markup: &str);

    /// Set only the error container next to `form`.
    /// Returns false when the form (or its container) is not currently rendered.
    fn patch_errors(&mut self, form: FormKind, markup: &str) -> bool;

    /// Run the widget initializer on elements matching `selector`.
    fn attach_widgets(&mut self, selector: &Selector, options: &Value);
}

/// In-memory surface that keeps rendered markup per region.
/// Tracks typed form input and widget attachments so callers can see what a render destroyed.
#[derive(Debug, Clone, Default)]
pub struct MarkupDocument {
    root: String,
    regions: BTreeMap<Region, String>,
    errors: BTreeMap<FormKind, String>,
    inputs: BTreeMap<(FormKind, String), String>,
    widgets: Vec<(Selector, Value)>,
    root_replacements: usize,
}

impl MarkupDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn region(&self, region: Region) -> &str {
        self.regions.get(&region).map(String::as_str).unwrap_or("")
    }

    pub fn errors(&self, form: FormKind) -> Option<&str> {
        self.errors.get(&form).map(String::as_str)
    }

    /// Number of full projections applied so far.
    pub fn root_replacements(&self) -> usize {
        self.root_replacements
    }

    pub fn widget_attachments(&self) -> &[(Selector, Value)] {
        &self.widgets
    }

    pub fn is_rendered(&self, form: FormKind) -> bool {
        contains_tag_with_classes(self.region(form.region()), &[form.class_name()])
    }

    /// Simulate the user typing into a rendered form field.
    pub fn type_input(&mut self, form: FormKind, field: &str, value: &str) -> bool {
        if !self.is_rendered(form) {
            return false;
        }
        self.inputs
            .insert((form, field.to_string()), value.to_string());
        true
    }

    pub fn input(&self, form: FormKind, field: &str) -> Option<&str> {
        self.inputs
            .get(&(form, field.to_string()))
            .map(String::as_str)
    }

    /// Full document markup with regions and error containers spliced in.
    pub fn to_html(&self) -> String {
        let mut html = self.root.clone();
        for region in Region::ALL {
            let mut content = self.region(region).to_string();
            for (form, errors) in &self.errors {
                if form.region() == region {
                    if let Some(at) = find_error_container_end(&content, form.class_name()) {
                        content = splice_at(&content, at, errors);
                    }
                }
            }
            if let Some(spliced) = splice_into_tag(&html, &[region.class_name()], &content) {
                html = spliced;
            }
        }
        html
    }

    fn clear_region_state(&mut self, region: Region) {
        self.errors.retain(|form, _| form.region() != region);
        self.inputs.retain(|(form, _), _| form.region() != region);
    }
}

impl Surface for MarkupDocument {
    fn replace_root(&mut self, markup: &str) {
        self.root = markup.to_string();
        self.regions.clear();
        self.errors.clear();
        self.inputs.clear();
        self.widgets.clear();
        self.root_replacements += 1;
    }

    fn fill_region(&mut self, region: Region, markup: &str) {
        if !contains_tag_with_classes(&self.root, &[region.class_name()]) {
            return;
        }
        self.clear_region_state(region);
        self.regions.insert(region, markup.to_string());
    }

    fn patch_errors(&mut self, form: FormKind, markup: &str) -> bool {
        let region = self.region(form.region());
        if find_error_container_end(region, form.class_name()).is_none() {
            return false;
        }
        self.errors.insert(form, markup.to_string());
        true
    }

    fn attach_widgets(&mut self, selector: &Selector, options: &Value) {
        self.widgets.push((selector.clone(), options.clone()));
    }
}

/// Elements that never have a closing tag.
const VOID_ELEMENTS: [&str; 6] = ["br", "hr", "img", "input", "link", "meta"];

#[derive(Debug, Clone, Copy)]
struct Tag<'a> {
    /// Offset just past `>`
    end: usize,
    text: &'a str,
    closing: bool,
    /// Void or self-closing: opens nothing
    empty: bool,
}

impl Tag<'_> {
    fn has_classes(&self, classes: &[&str]) -> bool {
        if self.closing {
            return false;
        }
        class_attribute(self.text).is_some_and(|attr| {
            let tokens: Vec<&str> = attr.split_whitespace().collect();
            classes.iter().all(|c| tokens.contains(c))
        })
    }
}

/// Every tag in `markup`, in document order. Comments and doctypes are skipped.
fn scan_tags(markup: &str) -> Vec<Tag<'_>> {
    let mut tags = Vec::new();
    let mut cursor = 0;
    while let Some(offset) = markup[cursor..].find('<') {
        let start = cursor + offset;
        let Some(len) = markup[start..].find('>') else {
            break;
        };
        let end = start + len + 1;
        let text = &markup[start..end];
        cursor = end;
        if text.starts_with("<!") {
            continue;
        }
        let closing = text.starts_with("</");
        let name: String = text
            .trim_start_matches("</")
            .trim_start_matches('<')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        let empty = !closing && (text.ends_with("/>") || VOID_ELEMENTS.contains(&name.as_str()));
        tags.push(Tag {
            end,
            text,
            closing,
            empty,
        });
    }
    tags
}

/// Value of the `class` attribute; `data-class` and the like do not count.
fn class_attribute(tag: &str) -> Option<&str> {
    const NEEDLE: &str = "class=\"";
    let mut from = 0;
    while let Some(offset) = tag[from..].find(NEEDLE) {
        let at = from + offset;
        let at_boundary = tag[..at]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace);
        let value_start = at + NEEDLE.len();
        let value_len = tag[value_start..].find('"')?;
        if at_boundary {
            return Some(&tag[value_start..value_start + value_len]);
        }
        from = value_start + value_len;
    }
    None
}

/// Byte offset just past the opening tag whose class attribute holds every class in `classes`.
fn find_open_tag_end(markup: &str, classes: &[&str]) -> Option<usize> {
    scan_tags(markup)
        .into_iter()
        .find(|tag| tag.has_classes(classes))
        .map(|tag| tag.end)
}

/// Byte offset just past the error container opening tag that shares a parent with the form
/// tagged `form_class`. A form at the top level of `markup` uses the whole markup as its parent.
fn find_error_container_end(markup: &str, form_class: &str) -> Option<usize> {
    let tags = scan_tags(markup);
    let form = tags.iter().position(|tag| tag.has_classes(&[form_class]))?;

    let mut depth = 0usize;
    let mut parent = None;
    for index in (0..form).rev() {
        let tag = &tags[index];
        if tag.empty {
            continue;
        }
        if tag.closing {
            depth += 1;
        } else if depth == 0 {
            parent = Some(index);
            break;
        } else {
            depth -= 1;
        }
    }

    let (first, last) = match parent {
        Some(parent) => {
            let mut depth = 0usize;
            let mut close = tags.len();
            for (index, tag) in tags.iter().enumerate().skip(parent + 1) {
                if tag.empty {
                    continue;
                }
                if !tag.closing {
                    depth += 1;
                } else if depth == 0 {
                    close = index;
                    break;
                } else {
                    depth -= 1;
                }
            }
            (parent + 1, close)
        }
        None => (0, tags.len()),
    };

    tags[first..last]
        .iter()
        .find(|tag| tag.has_classes(&ERROR_CONTAINER_CLASSES))
        .map(|tag| tag.end)
}

fn contains_tag_with_classes(markup: &str, classes: &[&str]) -> bool {
    find_open_tag_end(markup, classes).is_some()
}

fn splice_at(markup: &str, at: usize, content: &str) -> String {
    let mut out = String::with_capacity(markup.len() + content.len());
    out.push_str(&markup[..at]);
    out.push_str(content);
    out.push_str(&markup[at..]);
    out
}

fn splice_into_tag(markup: &str, classes: &[&str], content: &str) -> Option<String> {
    let at = find_open_tag_end(markup, classes)?;
    Some(splice_at(markup, at, content))
}
