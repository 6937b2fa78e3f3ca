//! Style options the rewriter sends along with its content.

use serde::Serialize;

/// Assistants a rewrite can be tuned for.
pub const AI_PLATFORMS: [&str; 8] = [
    "ChatGPT",
    "Claude",
    "Gemini",
    "Perplexity",
    "SearchGPT",
    "Copilot",
    "MetaAI",
    "Grok",
];

pub const DEFAULT_MAX_WORDS: u32 = 300;
pub const MIN_MAX_WORDS: u32 = 50;
pub const MAX_MAX_WORDS: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Casual,
    Formal,
    Persuasive,
    Humorous,
    Inspirational,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Casual,
        Tone::Formal,
        Tone::Persuasive,
        Tone::Humorous,
        Tone::Inspirational,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Casual => "casual",
            Tone::Formal => "formal",
            Tone::Persuasive => "persuasive",
            Tone::Humorous => "humorous",
            Tone::Inspirational => "inspirational",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tone| tone.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Audience {
    Novice,
    Intermediate,
    Expert,
}

impl Audience {
    pub const ALL: [Audience; 3] = [Audience::Novice, Audience::Intermediate, Audience::Expert];

    pub fn as_str(self) -> &'static str {
        match self {
            Audience::Novice => "novice",
            Audience::Intermediate => "intermediate",
            Audience::Expert => "expert",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|audience| audience.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteOptions {
    pub tone: Option<Tone>,
    pub audience: Option<Audience>,
    /// Selected entries of [`AI_PLATFORMS`], in the order they were picked.
    pub platforms: Vec<String>,
    pub max_words: u32,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            tone: None,
            audience: None,
            platforms: Vec::new(),
            max_words: DEFAULT_MAX_WORDS,
        }
    }
}

impl RewriteOptions {
    /// Selects or deselects a platform. Returns false for names not in
    /// [`AI_PLATFORMS`].
    pub fn toggle_platform(&mut self, name: &str) -> bool {
        let Some(platform) = AI_PLATFORMS
            .iter()
            .find(|platform| platform.eq_ignore_ascii_case(name.trim()))
        else {
            return false;
        };
        match self.platforms.iter().position(|picked| picked == platform) {
            Some(index) => {
                self.platforms.remove(index);
            }
            None => self.platforms.push(platform.to_string()),
        }
        true
    }

    /// Stores the word limit clamped to the accepted range; zero restores
    /// the default.
    pub fn set_max_words(&mut self, words: u32) {
        self.max_words = if words == 0 {
            DEFAULT_MAX_WORDS
        } else {
            words.clamp(MIN_MAX_WORDS, MAX_MAX_WORDS)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platforms_toggle_by_canonical_name() {
        let mut options = RewriteOptions::default();
        assert!(options.toggle_platform("claude"));
        assert!(options.toggle_platform("ChatGPT"));
        assert_eq!(options.platforms, vec!["Claude", "ChatGPT"]);
        assert!(options.toggle_platform("CLAUDE"));
        assert_eq!(options.platforms, vec!["ChatGPT"]);
        assert!(!options.toggle_platform("Bard"));
    }

    #[test]
    fn word_limit_is_clamped() {
        let mut options = RewriteOptions::default();
        options.set_max_words(10);
        assert_eq!(options.max_words, MIN_MAX_WORDS);
        options.set_max_words(5000);
        assert_eq!(options.max_words, MAX_MAX_WORDS);
        options.set_max_words(0);
        assert_eq!(options.max_words, DEFAULT_MAX_WORDS);
    }

    #[test]
    fn tone_and_audience_parse_any_case() {
        assert_eq!(Tone::parse(" Formal "), Some(Tone::Formal));
        assert_eq!(Audience::parse("EXPERT"), Some(Audience::Expert));
        assert_eq!(Tone::parse("grumpy"), None);
    }
}
