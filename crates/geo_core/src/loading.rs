use serde::Serialize;

/// Global "working" overlay. One instance for the whole workspace.
///
/// `start` overwrites any message already showing; callers that must not
/// start a second generation check [`LoadingOverlay::is_active`] first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadingOverlay {
    #[default]
    Idle,
    Loading { message: String },
}

impl LoadingOverlay {
    /// Returns true if the overlay changed.
    pub fn start(&mut self, message: impl Into<String>) -> bool {
        let message = message.into();
        if self.message() == Some(message.as_str()) {
            return false;
        }
        *self = LoadingOverlay::Loading { message };
        true
    }

    /// Returns true if the overlay was showing.
    pub fn stop(&mut self) -> bool {
        if self.is_active() {
            *self = LoadingOverlay::Idle;
            true
        } else {
            false
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, LoadingOverlay::Loading { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingOverlay::Idle => None,
            LoadingOverlay::Loading { message } => Some(message),
        }
    }

    pub fn icon(&self) -> Option<OverlayIcon> {
        self.message().map(OverlayIcon::for_message)
    }
}

/// Icon shown next to the overlay message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayIcon {
    Prompts,
    Rewrite,
    Insights,
}

impl OverlayIcon {
    pub fn for_message(message: &str) -> Self {
        if message.contains("Prompt") {
            OverlayIcon::Prompts
        } else if message.contains("Rewriting") || message.contains("Content") {
            OverlayIcon::Rewrite
        } else if message.contains("Analyzing") || message.contains("Insights") {
            OverlayIcon::Insights
        } else {
            OverlayIcon::Prompts
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_writer_wins_then_stop() {
        let mut overlay = LoadingOverlay::default();
        assert!(overlay.start("x"));
        assert!(overlay.start("y"));
        assert_eq!(overlay.message(), Some("y"));
        assert!(overlay.is_active());

        assert!(overlay.stop());
        assert_eq!(overlay, LoadingOverlay::Idle);
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut overlay = LoadingOverlay::default();
        assert!(!overlay.stop());
        assert!(overlay.start("Expanding Content"));
        assert!(!overlay.start("Expanding Content"));
        assert!(overlay.stop());
        assert!(!overlay.stop());
    }

    #[test]
    fn icon_follows_message_keywords() {
        assert_eq!(
            OverlayIcon::for_message("Generating AI Prompt Recommendations"),
            OverlayIcon::Prompts
        );
        assert_eq!(
            OverlayIcon::for_message("Shortening Content"),
            OverlayIcon::Rewrite
        );
        assert_eq!(
            OverlayIcon::for_message("Generating Insights Dashboard"),
            OverlayIcon::Insights
        );
        assert_eq!(OverlayIcon::for_message("Working"), OverlayIcon::Prompts);
        assert_eq!(LoadingOverlay::Idle.icon(), None);
    }
}
