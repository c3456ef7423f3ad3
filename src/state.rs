use crate::document::ElementRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideProgress {
    pub current: usize,
    pub total: usize,
    pub percentage: u32, // round(current / total * 100)
}

impl SlideProgress {
    pub fn new(current: usize, total: usize) -> Self {
        let ratio = progress_ratio(current, total);
        Self {
            current,
            total,
            percentage: (ratio * 100.0).round() as u32,
        }
    }
}

pub fn progress_ratio(current: usize, total: usize) -> f64 {
    if total == 0 { 0.0 } else { current as f64 / total as f64 }
}

pub const PREVIOUS_LABEL: &str = "‹ Previous";
pub const START_LABEL: &str = "‹ Start";
pub const NEXT_LABEL: &str = "Next ›";
pub const END_LABEL: &str = "End";

/// Enabled state and captions of the previous/next controls for one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub previous_disabled: bool,
    pub next_disabled: bool,
    pub previous_label: &'static str,
    pub next_label: &'static str,
}

impl ControlState {
    pub fn at(current: usize, total: usize) -> Self {
        let at_start = current == 1;
        let at_end = current == total;
        Self {
            previous_disabled: at_start,
            next_disabled: at_end,
            previous_label: if at_start { START_LABEL } else { PREVIOUS_LABEL },
            next_label: if at_end { END_LABEL } else { NEXT_LABEL },
        }
    }
}

pub fn announcement(current: usize, total: usize, title: &str) -> String {
    format!("Slide {} of {}: {}", current, total, title)
}

/// What observers receive after a successful navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideChange {
    pub from: usize,
    pub to: usize,
    pub total: usize,
    pub title: String,
    pub announcement: String,
    pub progress: SlideProgress,

    // Elements whose visual update was skipped
    pub missing: Vec<ElementRole>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounds() {
        assert_eq!(SlideProgress::new(1, 3).percentage, 33);
        assert_eq!(SlideProgress::new(2, 3).percentage, 67);
        assert_eq!(SlideProgress::new(1, 8).percentage, 13); // 12.5 rounds up
        assert_eq!(SlideProgress::new(50, 50).percentage, 100);
    }

    #[test]
    fn test_control_state_at_edges() {
        let start = ControlState::at(1, 50);
        assert!(start.previous_disabled);
        assert!(!start.next_disabled);
        assert_eq!(start.previous_label, START_LABEL);
        assert_eq!(start.next_label, NEXT_LABEL);

        let end = ControlState::at(50, 50);
        assert!(!end.previous_disabled);
        assert!(end.next_disabled);
        assert_eq!(end.next_label, END_LABEL);

        let single = ControlState::at(1, 1);
        assert!(single.previous_disabled && single.next_disabled);
    }

    #[test]
    fn test_announcement_text() {
        assert_eq!(announcement(3, 50, "Agenda"), "Slide 3 of 50: Agenda");
    }
}
