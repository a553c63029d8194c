// Tabs of the review screen
use crate::config::Layout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMode {
    Invoice,       // Rendered PDF (PDF + data side by side in split layout)
    ExtractedData, // Data view only
    Debug,         // Full screen debug log
}

impl ScreenMode {
    pub fn tabs(layout: Layout) -> &'static [ScreenMode] {
        match layout {
            Layout::Tabs => &[ScreenMode::Invoice, ScreenMode::ExtractedData, ScreenMode::Debug],
            Layout::Split => &[ScreenMode::Invoice, ScreenMode::Debug],
        }
    }

    pub fn title(self, layout: Layout) -> &'static str {
        match (self, layout) {
            (ScreenMode::Invoice, Layout::Split) => "Review",
            (ScreenMode::Invoice, Layout::Tabs) => "Invoice",
            (ScreenMode::ExtractedData, _) => "Extracted Data",
            (ScreenMode::Debug, _) => "Debug",
        }
    }

    pub fn next(self, layout: Layout) -> Self {
        let tabs = Self::tabs(layout);
        let pos = tabs.iter().position(|&t| t == self).unwrap_or(0);
        tabs[(pos + 1) % tabs.len()]
    }

    /// `1`-based tab number as shown in the tab bar.
    pub fn from_number(n: usize, layout: Layout) -> Option<Self> {
        Self::tabs(layout).get(n.checked_sub(1)?).copied()
    }

    pub fn shows_pdf(self) -> bool {
        self == ScreenMode::Invoice
    }

    pub fn shows_data(self, layout: Layout) -> bool {
        match self {
            ScreenMode::ExtractedData => true,
            ScreenMode::Invoice => layout == Layout::Split,
            ScreenMode::Debug => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_cycle_wraps() {
        let mut mode = ScreenMode::Invoice;
        mode = mode.next(Layout::Tabs);
        assert_eq!(mode, ScreenMode::ExtractedData);
        mode = mode.next(Layout::Tabs).next(Layout::Tabs);
        assert_eq!(mode, ScreenMode::Invoice);

        assert_eq!(ScreenMode::Invoice.next(Layout::Split), ScreenMode::Debug);
        assert_eq!(ScreenMode::Debug.next(Layout::Split), ScreenMode::Invoice);
    }

    #[test]
    fn numbered_tabs_follow_layout() {
        assert_eq!(ScreenMode::from_number(2, Layout::Tabs), Some(ScreenMode::ExtractedData));
        assert_eq!(ScreenMode::from_number(2, Layout::Split), Some(ScreenMode::Debug));
        assert_eq!(ScreenMode::from_number(0, Layout::Tabs), None);
        assert_eq!(ScreenMode::from_number(4, Layout::Tabs), None);
    }

    #[test]
    fn split_review_tab_shows_both_panes() {
        assert!(ScreenMode::Invoice.shows_pdf());
        assert!(ScreenMode::Invoice.shows_data(Layout::Split));
        assert!(!ScreenMode::Invoice.shows_data(Layout::Tabs));
    }
}
