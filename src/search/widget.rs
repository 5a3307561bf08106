/// Interaction state for the search-as-you-type widget.
///
/// Modeled as explicit component-local state so the keyboard behavior is
/// testable without a browser. The rendering layer owns the DOM; this
/// struct owns what is selected, whether results are visible, and which
/// events must trigger a search or an activation.
#[derive(Debug, Default)]
pub struct SearchWidget {
    text: String,
    rendered_results: usize,
    selected: Option<usize>,
}

/// What the caller must do in response to an event.
#[derive(Debug, PartialEq, Eq)]
pub enum WidgetAction {
    /// Dispatch a search for the current text.
    DispatchSearch,
    /// Activate the result at this position, as if it were clicked.
    Activate(usize),
}

/// Coarse view of the widget state.
#[derive(Debug, PartialEq, Eq)]
pub enum WidgetState {
    Idle,
    Showing,
    Navigating(usize),
}

impl SearchWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WidgetState {
        match (self.rendered_results, self.selected) {
            (0, _) => WidgetState::Idle,
            (_, None) => WidgetState::Showing,
            (_, Some(i)) => WidgetState::Navigating(i),
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The input text changed. The caller re-runs the search externally;
    /// any previous selection no longer points at current results.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.selected = None;
    }

    /// A new result list was rendered. Selection resets to none.
    pub fn results_rendered(&mut self, count: usize) {
        self.rendered_results = count;
        self.selected = None;
    }

    /// Focus or click on the input: with non-empty text and no visible
    /// results, a search is dispatched. Empty text never searches.
    pub fn focus(&mut self) -> Option<WidgetAction> {
        if !self.text.trim().is_empty() && self.rendered_results == 0 {
            Some(WidgetAction::DispatchSearch)
        } else {
            None
        }
    }

    /// Click outside the widget: results and selection clear.
    pub fn click_outside(&mut self) {
        self.clear();
    }

    /// Escape: results and selection clear.
    pub fn escape(&mut self) {
        self.clear();
    }

    /// ArrowDown cycles forward through rendered results with wraparound.
    pub fn arrow_down(&mut self) {
        if self.rendered_results == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < self.rendered_results => i + 1,
            _ => 0,
        });
    }

    /// ArrowUp cycles backward with wraparound.
    pub fn arrow_up(&mut self) {
        if self.rendered_results == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i > 0 => i - 1,
            _ => self.rendered_results - 1,
        });
    }

    /// Enter activates the current selection, if there is one.
    pub fn enter(&self) -> Option<WidgetAction> {
        self.selected.map(WidgetAction::Activate)
    }

    fn clear(&mut self) {
        self.rendered_results = 0;
        self.selected = None;
    }
}
