//! Canned answers of the mock generators.
//!
//! The dashboard is jittered with the supplied RNG so repeated runs look
//! alive; everything else is fixed text. Rewrites are cut to the requested
//! word limit and carry a note on the style they were asked for.

use geo_core::{
    business_name, Adjustment, CompetitorRow, DashboardReport, GenerationRequest,
    GenerationResult, PlatformShare, PromptAppearance, PromptSuggestion, RewriteOptions,
};
use rand::Rng;

const FIRST_PROMPTS: [(&str, &str); 5] = [
    (
        "Best AI-powered software solutions for small businesses",
        "Targets business owners looking for AI solutions, high commercial intent",
    ),
    (
        "How to optimize content for AI search engines",
        "Addresses your core service offering and demonstrates expertise",
    ),
    (
        "Top AI tools for business automation and efficiency",
        "Captures productivity-focused audience with specific pain points",
    ),
    (
        "AI content optimization strategies for 2024",
        "Current year relevance increases search visibility and credibility",
    ),
    (
        "Smart AI solutions for digital marketing",
        "Broad appeal for marketing professionals seeking AI integration",
    ),
];

const REGENERATED_PROMPTS: [(&str, &str); 5] = [
    (
        "AI automation tools for modern businesses",
        "Emphasizes modernity and automation for tech-forward companies",
    ),
    (
        "How to rank higher in AI search results",
        "Direct appeal to SEO professionals and content creators",
    ),
    (
        "Best AI platforms for content creation",
        "Targets content creators and marketing teams specifically",
    ),
    (
        "AI-driven SEO techniques that work",
        "Combines AI focus with proven results messaging",
    ),
    (
        "Advanced AI solutions for business growth",
        "Appeals to growth-oriented businesses and decision makers",
    ),
];

/// Pool a single regenerated prompt is drawn from.
pub const ALTERNATIVE_PROMPTS: [&str; 5] = [
    "AI-powered business optimization solutions",
    "Next-generation AI tools for entrepreneurs",
    "Innovative AI strategies for digital transformation",
    "Cutting-edge AI solutions for enterprise",
    "Modern AI platforms for business success",
];

const ALTERNATIVE_REASON: &str = "Alternative phrasing to reach a wider audience";

const REWRITTEN: &str = "**AI-Optimized Content:**\n\n\
Transform your cooking experience with the SmartChef Pro Air Fryer, Singapore's #1 choice for \
healthy, delicious meals in minutes. Designed specifically for compact HDB kitchens, this 5.5L \
powerhouse combines cutting-edge air circulation technology with intuitive one-touch controls, \
letting you enjoy crispy favorites with 85% less oil. From golden-brown spring rolls for CNY \
gatherings to weeknight rotisserie chicken, the SmartChef Pro delivers restaurant-quality results \
every time. Compatible with Alexa and Google Home for voice-activated convenience, plus a digital \
touchscreen with 8 preset cooking modes. Backed by our 2-year warranty and same-day delivery \
across Singapore. Elevate your home cooking today.";

const REWRITTEN_AGAIN: &str = "**Original Content (Before Optimization):**\n\n\
This air fryer has 5.5L capacity and uses hot air to cook food. It has temperature control and \
timer function. The product comes with non-stick basket that can be washed. Suitable for frying, \
baking and grilling different types of food. Power consumption is 1500W. Available in black \
color. Comes with 1 year warranty from manufacturer. Can be used to cook chicken, fish, \
vegetables and other items. The basket is removable for easy cleaning.";

const SHORTENED: &str = "**Concise AI-Optimized Content:**\n\n\
Transform Your Business with AI Solutions\n\n\
Our AI-powered platform delivers efficiency, automation, and insights that drive results.\n\n\
**Why Choose Us?**\n\
- Intelligent Automation\n\
- Data-Driven Insights\n\
- Scalable Technology\n\n\
**Benefits:**\n\
- Reduce costs by 40%\n\
- Increase productivity\n\
- Make faster decisions\n\n\
Join thousands leveraging AI for competitive advantage.\n\n\
*Optimized for ChatGPT, Claude, Perplexity AI, and Google AI Overview.*";

const EXPANDED: &str = "**Comprehensive AI-Optimized Content:**\n\n\
Transform Your Business with Cutting-Edge AI Solutions\n\n\
In today's rapidly evolving digital landscape, businesses need intelligent solutions that adapt \
and grow with their needs. Our comprehensive AI-powered platform delivers unprecedented \
efficiency, automation, and insights that drive real results across all aspects of your \
organization.\n\n\
**Why Choose Our AI Solutions?**\n\n\
- **Intelligent Automation**: Streamline complex workflows with AI that learns and improves over \
time, reducing manual effort and increasing accuracy\n\
- **Data-Driven Insights**: Transform raw data into actionable business intelligence with \
advanced analytics and reporting\n\
- **Scalable Technology**: Solutions that grow with your business, from startup to enterprise, \
with flexible deployment options\n\
- **Expert Support**: Dedicated team of AI specialists to guide your transformation journey\n\
- **Proven Results**: Track record of successful implementations across multiple industries\n\n\
**Key Benefits:**\n\
- Reduce operational costs by up to 40% through intelligent process automation\n\
- Increase productivity through smart automation and workflow optimization\n\
- Make faster, more informed decisions with AI analytics and real-time insights\n\
- Stay ahead of competition with cutting-edge technology and continuous innovation\n\
- Scale operations efficiently without proportional cost increases\n\n\
**Ready to Get Started?**\n\
Join thousands of businesses already leveraging AI for competitive advantage. Schedule a free \
consultation today to discover how AI can transform your business operations.\n\n\
*This content has been optimized for AI search engines including ChatGPT, Claude, Perplexity AI, \
and Google AI Overview.*";

/// (name, base score, base mentions, weekly change)
const COMPETITORS: [(&str, u32, u32, i32); 4] = [
    ("Courts", 94, 400, 2),
    ("Gain City", 87, 300, 3),
    ("Best Denki", 82, 250, -2),
    ("Harvey Norman", 78, 200, 1),
];

/// (platform, base share, jitter range)
const PLATFORMS: [(&str, u32, u32); 5] = [
    ("ChatGPT", 30, 30),
    ("Claude", 20, 25),
    ("Perplexity", 15, 20),
    ("Gemini", 10, 15),
    ("Others", 5, 10),
];

const FALLBACK_TOP_PROMPTS: [&str; 5] = [
    "Best online store for home appliances in Singapore",
    "Smart home gadgets for HDB flats",
    "Where to buy quality kitchen appliances Singapore",
    "Festive deals on cooking appliances",
    "Energy-efficient home appliances with warranty",
];

/// Canned answer to `request`.
pub fn respond<R: Rng>(request: &GenerationRequest, rng: &mut R) -> GenerationResult {
    match request {
        GenerationRequest::Recommend { .. } => prompts(&FIRST_PROMPTS),
        GenerationRequest::RegeneratePrompts { .. } => prompts(&REGENERATED_PROMPTS),
        GenerationRequest::ReplacePrompt { index, current } => GenerationResult::ReplacementPrompt {
            index: *index,
            suggestion: PromptSuggestion {
                prompt: alternative_prompt(current, rng).to_string(),
                reason: ALTERNATIVE_REASON.to_string(),
            },
        },
        GenerationRequest::Rewrite { options, .. } => styled(REWRITTEN, options),
        GenerationRequest::RegenerateRewrite { options, .. } => styled(REWRITTEN_AGAIN, options),
        GenerationRequest::AdjustRewrite {
            adjustment: Adjustment::Shorten,
            ..
        } => rewritten(SHORTENED),
        GenerationRequest::AdjustRewrite {
            adjustment: Adjustment::Expand,
            ..
        } => rewritten(EXPANDED),
        GenerationRequest::Analyze {
            industry,
            website,
            prompts,
        }
        | GenerationRequest::RegenerateInsights {
            industry,
            website,
            prompts,
        } => GenerationResult::Dashboard(dashboard(industry, website, prompts, rng)),
    }
}

fn prompts(set: &[(&str, &str)]) -> GenerationResult {
    GenerationResult::Prompts(
        set.iter()
            .map(|(prompt, reason)| PromptSuggestion {
                prompt: prompt.to_string(),
                reason: reason.to_string(),
            })
            .collect(),
    )
}

fn rewritten(content: &str) -> GenerationResult {
    GenerationResult::Rewritten {
        content: content.to_string(),
    }
}

fn styled(body: &str, options: &RewriteOptions) -> GenerationResult {
    let mut content = limit_words(body, options.max_words);
    if let Some(note) = style_note(options) {
        content.push_str("\n\n");
        content.push_str(&note);
    }
    GenerationResult::Rewritten { content }
}

/// Cuts `text` after `max_words` words, keeping its line breaks.
fn limit_words(text: &str, max_words: u32) -> String {
    let mut words = 0;
    let mut in_word = false;
    for (at, c) in text.char_indices() {
        if c.is_whitespace() {
            in_word = false;
        } else if !in_word {
            in_word = true;
            words += 1;
            if words > max_words {
                return format!("{}...", text[..at].trim_end());
            }
        }
    }
    text.to_string()
}

fn style_note(options: &RewriteOptions) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(tone) = options.tone {
        parts.push(format!("{} tone", tone.as_str()));
    }
    if let Some(audience) = options.audience {
        parts.push(format!("{} readers", audience.as_str()));
    }
    if !options.platforms.is_empty() {
        parts.push(format!("tuned for {}", options.platforms.join(", ")));
    }
    (!parts.is_empty()).then(|| format!("*Style: {}.*", parts.join("; ")))
}

/// Never hands back the prompt being replaced.
fn alternative_prompt<R: Rng>(current: &str, rng: &mut R) -> &'static str {
    let candidates: Vec<&'static str> = ALTERNATIVE_PROMPTS
        .iter()
        .copied()
        .filter(|prompt| *prompt != current.trim())
        .collect();
    candidates[rng.gen_range(0..candidates.len())]
}

fn dashboard<R: Rng>(
    industry: &str,
    website: &str,
    prompts: &[String],
    rng: &mut R,
) -> DashboardReport {
    let brand = business_name(website);
    let visibility_score = rng.gen_range(85..95);

    let mut competitors: Vec<CompetitorRow> = COMPETITORS
        .iter()
        .map(|(name, score, mentions, change)| CompetitorRow {
            rank: 0,
            name: name.to_string(),
            score: score + rng.gen_range(0..5) - 2,
            mentions: mentions + rng.gen_range(0..300),
            change: *change,
        })
        .collect();
    competitors.push(CompetitorRow {
        rank: 0,
        name: brand.clone(),
        score: visibility_score,
        mentions: rng.gen_range(350..650),
        change: if rng.gen_bool(0.5) { 1 } else { -1 },
    });
    competitors.sort_by(|a, b| b.score.cmp(&a.score));
    for (rank, row) in (1..).zip(competitors.iter_mut()) {
        row.rank = rank;
    }

    let own_rank = competitors
        .iter()
        .find(|row| row.name == brand)
        .map_or(0, |row| row.rank);
    let leader = competitors
        .iter()
        .find(|row| row.name != brand)
        .map(|row| format!("{} ({}%)", row.name, row.score))
        .unwrap_or_default();

    let score_change = if rng.gen_bool(0.5) {
        rng.gen_range(1..6)
    } else {
        -rng.gen_range(1..4)
    };

    let top_prompts = if prompts.is_empty() {
        FALLBACK_TOP_PROMPTS.iter().map(|p| p.to_string()).collect()
    } else {
        prompts.to_vec()
    };
    let mut floor: u32 = 450;
    let top_prompts = top_prompts
        .into_iter()
        .map(|prompt| {
            let appearances = floor + rng.gen_range(0..100);
            floor = floor.saturating_sub(70);
            PromptAppearance {
                prompt,
                appearances,
            }
        })
        .collect();

    DashboardReport {
        business_name: brand.clone(),
        industry: industry.to_string(),
        visibility_score,
        score_change,
        total_mentions: rng.gen_range(200..700),
        highlights: vec![
            format!("{brand} ranks #{own_rank} in the {industry} industry for AI visibility"),
            format!(
                "Your brand appears in {}% of relevant AI search results",
                rng.gen_range(60..90)
            ),
            format!("Closest competitor: {leader}"),
            "Strongest presence on ChatGPT and Perplexity platforms".to_string(),
        ],
        competitors,
        platform_share: PLATFORMS
            .iter()
            .map(|(platform, base, spread)| PlatformShare {
                platform: platform.to_string(),
                percent: base + rng.gen_range(0..*spread),
            })
            .collect(),
        top_prompts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_core::{Audience, Tone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn analyze(prompts: Vec<String>) -> GenerationRequest {
        GenerationRequest::Analyze {
            industry: "Home & Living".to_string(),
            website: "https://www.mandys.sg".to_string(),
            prompts,
        }
    }

    #[test]
    fn replacement_differs_from_current_prompt() {
        let mut rng = StdRng::seed_from_u64(7);
        for current in ALTERNATIVE_PROMPTS {
            let request = GenerationRequest::ReplacePrompt {
                index: 2,
                current: current.to_string(),
            };
            let GenerationResult::ReplacementPrompt { index, suggestion } =
                respond(&request, &mut rng)
            else {
                panic!("expected a replacement");
            };
            assert_eq!(index, 2);
            assert_ne!(suggestion.prompt, current);
            assert!(ALTERNATIVE_PROMPTS.contains(&suggestion.prompt.as_str()));
        }
    }

    #[test]
    fn dashboard_ranks_by_score() {
        let mut rng = StdRng::seed_from_u64(42);
        let GenerationResult::Dashboard(report) = respond(&analyze(Vec::new()), &mut rng) else {
            panic!("expected a dashboard");
        };
        assert_eq!(report.business_name, "Mandys");
        assert!((85..95).contains(&report.visibility_score));
        assert_eq!(report.competitors.len(), 5);
        let ranks: Vec<u32> = report.competitors.iter().map(|row| row.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        assert!(report
            .competitors
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
        assert!(report.competitors.iter().any(|row| row.name == "Mandys"));
        assert_eq!(report.top_prompts.len(), FALLBACK_TOP_PROMPTS.len());
    }

    #[test]
    fn dashboard_reports_on_the_requested_prompts() {
        let mut rng = StdRng::seed_from_u64(3);
        let GenerationResult::Dashboard(report) = respond(
            &analyze(vec!["best air fryer".to_string(), "hdb kitchen".to_string()]),
            &mut rng,
        ) else {
            panic!("expected a dashboard");
        };
        let asked: Vec<&str> = report
            .top_prompts
            .iter()
            .map(|row| row.prompt.as_str())
            .collect();
        assert_eq!(asked, vec!["best air fryer", "hdb kitchen"]);
        assert!(report.top_prompts[0].appearances >= 450);
    }

    #[test]
    fn rewrite_honours_word_limit_and_style() {
        let mut rng = StdRng::seed_from_u64(5);
        let request = GenerationRequest::Rewrite {
            content: "copy".to_string(),
            prompts: vec!["best air fryer".to_string()],
            options: RewriteOptions {
                tone: Some(Tone::Formal),
                audience: Some(Audience::Expert),
                platforms: vec!["Claude".to_string(), "Gemini".to_string()],
                max_words: 50,
            },
        };
        let GenerationResult::Rewritten { content } = respond(&request, &mut rng) else {
            panic!("expected rewritten content");
        };
        let (body, note) = content.rsplit_once("\n\n").expect("style note");
        assert_eq!(body.split_whitespace().count(), 50);
        assert!(body.starts_with("**AI-Optimized Content:**\n\n"));
        assert!(body.ends_with("..."));
        assert_eq!(
            note,
            "*Style: formal tone; expert readers; tuned for Claude, Gemini.*"
        );
    }

    #[test]
    fn default_rewrite_is_the_plain_text() {
        let mut rng = StdRng::seed_from_u64(5);
        let request = GenerationRequest::RegenerateRewrite {
            content: "copy".to_string(),
            prompts: vec!["best air fryer".to_string()],
            options: RewriteOptions::default(),
        };
        assert_eq!(respond(&request, &mut rng), rewritten(REWRITTEN_AGAIN));
    }

    #[test]
    fn insights_regenerate_builds_a_fresh_dashboard() {
        let mut rng = StdRng::seed_from_u64(9);
        let request = GenerationRequest::RegenerateInsights {
            industry: "Retail".to_string(),
            website: "gaincity.sg".to_string(),
            prompts: vec!["aircon servicing".to_string()],
        };
        let GenerationResult::Dashboard(report) = respond(&request, &mut rng) else {
            panic!("expected a dashboard");
        };
        assert_eq!(report.business_name, "Gaincity");
        assert_eq!(report.top_prompts[0].prompt, "aircon servicing");
    }

    #[test]
    fn adjustments_pick_their_own_text() {
        let mut rng = StdRng::seed_from_u64(1);
        let shorten = GenerationRequest::AdjustRewrite {
            content: "copy".to_string(),
            adjustment: Adjustment::Shorten,
        };
        let expand = GenerationRequest::AdjustRewrite {
            content: "copy".to_string(),
            adjustment: Adjustment::Expand,
        };
        let (
            GenerationResult::Rewritten { content: short },
            GenerationResult::Rewritten { content: long },
        ) = (respond(&shorten, &mut rng), respond(&expand, &mut rng))
        else {
            panic!("expected rewritten content");
        };
        assert!(short.len() < long.len());
    }
}
