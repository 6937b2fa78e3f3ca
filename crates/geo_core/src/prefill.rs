use serde::Serialize;

use crate::handoff::MAX_HANDOFF_PROMPTS;
use crate::ToolId;

/// Input seed for a panel, produced by replaying a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PrefilledState {
    PromptRecommender { business_description: String },
    ContentRewriter { prompts: Vec<String> },
    InsightsReport { industry: String, prompts: Vec<String> },
}

impl PrefilledState {
    pub fn tool(&self) -> ToolId {
        match self {
            PrefilledState::PromptRecommender { .. } => ToolId::PromptRecommender,
            PrefilledState::ContentRewriter { .. } => ToolId::ContentRewriter,
            PrefilledState::InsightsReport { .. } => ToolId::InsightsReport,
        }
    }

    /// Rebuilds the seed a history description was made from.
    ///
    /// Rewriter descriptions are the prompts joined by `", "`; insights
    /// descriptions are `"<business> - <industry>"`.
    pub fn from_description(tool: ToolId, description: &str) -> Self {
        match tool {
            ToolId::PromptRecommender => PrefilledState::PromptRecommender {
                business_description: description.to_string(),
            },
            ToolId::ContentRewriter => PrefilledState::ContentRewriter {
                prompts: description
                    .split(", ")
                    .map(str::trim)
                    .filter(|prompt| !prompt.is_empty())
                    .take(MAX_HANDOFF_PROMPTS)
                    .map(ToOwned::to_owned)
                    .collect(),
            },
            ToolId::InsightsReport => PrefilledState::InsightsReport {
                industry: description
                    .split_once(" - ")
                    .map_or(description, |(_, industry)| industry)
                    .trim()
                    .to_string(),
                prompts: Vec::new(),
            },
        }
    }
}

/// Prefill seeds indexed by tool. At most one is ever set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrefillSlots {
    recommender: Option<PrefilledState>,
    rewriter: Option<PrefilledState>,
    insights: Option<PrefilledState>,
}

impl PrefillSlots {
    /// Clears every slot, then stores `state` under its tool.
    pub fn set(&mut self, state: PrefilledState) {
        self.clear();
        let tool = state.tool();
        *self.slot_mut(tool) = Some(state);
    }

    pub fn take(&mut self, tool: ToolId) -> Option<PrefilledState> {
        self.slot_mut(tool).take()
    }

    pub fn peek(&self, tool: ToolId) -> Option<&PrefilledState> {
        match tool {
            ToolId::PromptRecommender => self.recommender.as_ref(),
            ToolId::ContentRewriter => self.rewriter.as_ref(),
            ToolId::InsightsReport => self.insights.as_ref(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        ToolId::ALL.iter().all(|tool| self.peek(*tool).is_none())
    }

    fn slot_mut(&mut self, tool: ToolId) -> &mut Option<PrefilledState> {
        match tool {
            ToolId::PromptRecommender => &mut self.recommender,
            ToolId::ContentRewriter => &mut self.rewriter,
            ToolId::InsightsReport => &mut self.insights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_a_seed_clears_the_others() {
        let mut slots = PrefillSlots::default();
        slots.set(PrefilledState::from_description(
            ToolId::PromptRecommender,
            "Bakery in Tampines",
        ));
        slots.set(PrefilledState::from_description(
            ToolId::ContentRewriter,
            "a, b",
        ));

        assert!(slots.peek(ToolId::PromptRecommender).is_none());
        assert_eq!(
            slots.take(ToolId::ContentRewriter),
            Some(PrefilledState::ContentRewriter {
                prompts: vec!["a".to_string(), "b".to_string()]
            })
        );
        assert!(slots.is_empty());
    }

    #[test]
    fn insights_seed_keeps_the_industry() {
        let seed = PrefilledState::from_description(ToolId::InsightsReport, "Courts - Retail");
        assert_eq!(
            seed,
            PrefilledState::InsightsReport {
                industry: "Retail".to_string(),
                prompts: Vec::new(),
            }
        );

        let seed = PrefilledState::from_description(ToolId::InsightsReport, "Retail");
        assert_eq!(seed.tool(), ToolId::InsightsReport);
    }

    #[test]
    fn rewriter_seed_drops_blank_prompts_and_caps() {
        let seed = PrefilledState::from_description(ToolId::ContentRewriter, "a, , b, c, d, e, f");
        let PrefilledState::ContentRewriter { prompts } = seed else {
            panic!("wrong seed kind");
        };
        assert_eq!(prompts, vec!["a", "b", "c", "d", "e"]);
    }
}
