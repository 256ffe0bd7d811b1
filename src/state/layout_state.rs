//! UI layout state management.
//!
//! Holds the focus bookkeeping for slide panels: which panel should grab
//! keyboard focus on its first frame, and which one currently has it.

/// State related to layout and panel focus.
#[derive(Debug, Clone, Default)]
pub struct LayoutState {
    /// Panel that must claim focus the next time it is drawn
    focus_request: Option<String>,
    /// Panel that held keyboard focus on the last frame
    focused_panel: Option<String>,
}

impl LayoutState {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Focus Queries =====

    pub fn focused_panel(&self) -> Option<&str> {
        self.focused_panel.as_deref()
    }

    // ===== Focus Mutations =====

    /// Asks the panel `id` to take keyboard focus once it is drawn.
    pub fn request_focus(&mut self, id: &str) {
        self.focus_request = Some(id.to_owned());
    }

    /// Consumes the focus request if it targets `id`.
    pub fn take_focus_request(&mut self, id: &str) -> bool {
        if self.focus_request.as_deref() == Some(id) {
            self.focus_request = None;
            true
        } else {
            false
        }
    }

    /// Records which panel holds focus after a frame.
    pub fn set_focused_panel(&mut self, id: Option<String>) {
        self.focused_panel = id;
    }

    /// Forgets focus bookkeeping for a panel that went away.
    pub fn forget_panel(&mut self, id: &str) {
        if self.focus_request.as_deref() == Some(id) {
            self.focus_request = None;
        }
        if self.focused_panel.as_deref() == Some(id) {
            self.focused_panel = None;
        }
    }
}
