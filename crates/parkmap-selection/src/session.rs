use std::sync::Arc;

use parkmap_core::{FacilityCatalog, Feedback};
use parkmap_feedback::FeedbackIndex;
use url::Url;

use crate::machine::SelectionMachine;
use crate::map::MapHandle;
use crate::router::Router;
use crate::share::feedback_form_url;

/// One page's worth of state: the loaded catalog, the selection machine and
/// whatever feedback has arrived so far.
///
/// Feedback may land before or after the first selection. Queries always
/// read the current index, so late feedback shows up for a facility that
/// is already open.
pub struct MapSession<R, M> {
    catalog: FacilityCatalog,
    machine: SelectionMachine<R, M>,
    feedback: Arc<FeedbackIndex>,
}

impl<R: Router, M: MapHandle> MapSession<R, M> {
    /// Creates a session over an already loaded catalog and hydrates the
    /// selection from the router's current URL.
    pub fn start(catalog: FacilityCatalog, router: R, map: M, zoom: u8) -> Self {
        let mut machine = SelectionMachine::new(router, map, zoom);
        machine.hydrate_from_url(&catalog);
        Self {
            catalog,
            machine,
            feedback: Arc::default(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &FacilityCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn machine(&self) -> &SelectionMachine<R, M> {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut SelectionMachine<R, M> {
        &mut self.machine
    }

    /// Replaces the feedback snapshot.
    pub fn set_feedback(&mut self, feedback: Arc<FeedbackIndex>) {
        self.feedback = feedback;
    }

    #[must_use]
    pub fn feedback(&self) -> &FeedbackIndex {
        &self.feedback
    }

    /// Feedback for the open facility, newest first. Empty when closed.
    #[must_use]
    pub fn selected_feedback(&self) -> Vec<&Feedback> {
        self.machine
            .selected()
            .map(|f| self.feedback.feedback_for(f.id()))
            .unwrap_or_default()
    }

    /// Feedback form link for the open facility.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if `form_base` is not an absolute URL.
    pub fn selected_form_url(&self, form_base: &str) -> Result<Option<Url>, url::ParseError> {
        self.machine
            .selected_key()
            .map(|(kind, id)| feedback_form_url(form_base, kind, id))
            .transpose()
    }
}
