//! Application state structures
//!
//! State the controllers do not own: where the cursor is, how far views are
//! scrolled and which text input has the keyboard.

/// Tabs of the chart details screen
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DetailsTab {
    #[default]
    Readme,
    Values,
    Chart,
}

impl DetailsTab {
    pub const ALL: [DetailsTab; 3] = [DetailsTab::Readme, DetailsTab::Values, DetailsTab::Chart];

    pub fn title(self) -> &'static str {
        match self {
            DetailsTab::Readme => "README",
            DetailsTab::Values => "Values",
            DetailsTab::Chart => "Chart",
        }
    }

    pub fn next(self) -> Self {
        match self {
            DetailsTab::Readme => DetailsTab::Values,
            DetailsTab::Values => DetailsTab::Chart,
            DetailsTab::Chart => DetailsTab::Readme,
        }
    }
}

/// Who receives printable keys
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    /// Keys are commands
    #[default]
    Normal,
    /// Typing into the catalog search bar
    Search,
    /// Typing into the values editor
    EditValues,
}

/// View-related state (cursor, scrolling, input mode)
#[derive(Debug, Default)]
pub struct ViewState {
    /// Row under the cursor in the current list
    pub cursor: usize,
    /// Scroll offset for the current list
    pub scroll_offset: usize,
    /// Scroll offset for text views and the used values dialog
    pub text_scroll_offset: usize,
    pub input_mode: InputMode,
    pub details_tab: DetailsTab,
    /// Rows moved by PageUp/PageDown, updated from the body height each render
    pub page_size: usize,
}

impl ViewState {
    /// Fresh state for a newly entered screen
    pub fn reset(&mut self) {
        let page_size = self.page_size;
        *self = Self {
            page_size,
            ..Self::default()
        };
    }

    pub fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let target = self.cursor as isize + delta;
        self.cursor = target.clamp(0, len as isize - 1) as usize;
    }

    /// Keep the cursor inside a list that may have shrunk
    pub fn clamp_cursor(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn scroll_text(&mut self, delta: isize) {
        self.text_scroll_offset = (self.text_scroll_offset as isize + delta).max(0) as usize;
    }
}
