use crate::event::{DomEvent, Element, EventKind, Selector};

/// What the controller does with a routed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    OpenNewIntervention,
    CancelNewIntervention,
    SelectIntervention,
    NewInterventionSaved,
    NewInterventionRejected,
    OpenNewProgressNote,
    CancelNewProgressNote,
    ProgressNoteSaved,
    ProgressNoteRejected,
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub kind: EventKind,
    pub selector: Selector,
    pub handler: Handler,
}

/// Delegated bindings scoped to the panel root.
/// Matching happens against each event's path, so re-rendered markup is covered without rebinding.
#[derive(Debug, Clone)]
pub struct EventBinder {
    bindings: Vec<Binding>,
}

const STANDARD_BINDINGS: &[(EventKind, &str, Handler)] = &[
    // interventions
    (EventKind::Click, "#open-intervention-form", Handler::OpenNewIntervention),
    (EventKind::Click, "#close-intervention-form", Handler::CancelNewIntervention),
    (EventKind::Click, ".intervention-cell", Handler::SelectIntervention),
    (EventKind::SaveSucceeded, ".new-intervention-form", Handler::NewInterventionSaved),
    (EventKind::SaveFailed, ".new-intervention-form", Handler::NewInterventionRejected),
    // progress notes
    (EventKind::Click, ".add-progress-note", Handler::OpenNewProgressNote),
    (EventKind::Click, ".cancel-progress-note", Handler::CancelNewProgressNote),
    (EventKind::SaveSucceeded, ".new-progress-note-form", Handler::ProgressNoteSaved),
    (EventKind::SaveFailed, ".new-progress-note-form", Handler::ProgressNoteRejected),
];

impl EventBinder {
    /// The panel's fixed binding table.
    pub fn standard() -> Self {
        let bindings = STANDARD_BINDINGS
            .iter()
            .filter_map(|(kind, raw, handler)| {
                Selector::parse(raw).map(|selector| Binding {
                    kind: *kind,
                    selector,
                    handler: *handler,
                })
            })
            .collect();
        Self { bindings }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Handlers to invoke for `event`, innermost match first, each paired with the
    /// element that matched (the delegated "current target").
    pub fn route<'e>(&self, event: &'e DomEvent) -> Vec<(Handler, &'e Element)> {
        event
            .path
            .iter()
            .flat_map(|element| {
                self.bindings
                    .iter()
                    .filter(move |b| b.kind == event.kind && b.selector.matches(element))
                    .map(move |b| (b.handler, element))
            })
            .collect()
    }
}
