use chrono::{DateTime, Utc};
use geo_core::{
    format_relative, AppViewModel, DashboardReport, GenerationResult, OverlayIcon, PanelDraft,
    PanelView, RewriteOptions, SeedSource, Stage, ToolId,
};

const RULE: &str = "------------------------------------------------------------";

pub fn render(view: &AppViewModel, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(RULE.to_string());
    lines.push(format!("GEO Studio  ?{}", view.url));

    let tabs: Vec<String> = view
        .tools
        .iter()
        .map(|tab| {
            if tab.active {
                format!("[{}]", tab.title)
            } else {
                tab.title.clone()
            }
        })
        .collect();
    lines.push(format!("Tools: {}", tabs.join(" | ")));

    if view.sidebar_collapsed {
        lines.push(format!("History: {} entries (sidebar collapsed)", view.history.len()));
    } else if view.history.is_empty() {
        lines.push("History: none yet".to_string());
    } else {
        lines.push("History:".to_string());
        for item in &view.history {
            lines.push(format!(
                "  #{} {} | {} | {}",
                item.id,
                item.tool.title(),
                item.description,
                format_relative(item.timestamp, now)
            ));
        }
    }

    lines.push(RULE.to_string());
    render_panel(&view.panel, &mut lines);

    if let Some(overlay) = &view.overlay {
        let icon = match overlay.icon {
            OverlayIcon::Prompts => "prompts",
            OverlayIcon::Rewrite => "rewrite",
            OverlayIcon::Insights => "insights",
        };
        lines.push(format!("... {} ({icon}) ...", overlay.message));
    }

    lines
}

fn render_panel(panel: &PanelView, lines: &mut Vec<String>) {
    lines.push(format!("{} ({})", panel.tool.title(), panel.stage));

    match panel.seed {
        Some(SeedSource::Handoff) => {
            lines.push("  Imported from the previous tool. `clear-seeds` to discard.".to_string())
        }
        Some(SeedSource::History) => {
            lines.push("  Restored from history. `clear-seeds` to discard.".to_string())
        }
        None => {}
    }

    match &panel.draft {
        PanelDraft::Recommender {
            business_description,
        } => lines.push(format!("  Business: {}", business_description)),
        PanelDraft::Rewriter {
            content,
            prompts,
            options,
        } => {
            lines.push(format!("  Content: {}", preview(content)));
            push_prompts(prompts, lines);
            push_style(options, lines);
        }
        PanelDraft::Insights {
            industry,
            website,
            content,
            prompts,
        } => {
            lines.push(format!("  Industry: {}", industry));
            lines.push(format!("  Website: {}", website));
            if !content.is_empty() {
                lines.push(format!("  Content: {}", preview(content)));
            }
            push_prompts(prompts, lines);
        }
    }

    if let Some(failure) = &panel.failure {
        lines.push(format!("  ! Generation failed: {}", failure.message));
    }

    match &panel.result {
        Some(GenerationResult::Prompts(prompts)) => {
            lines.push("  Recommended prompts:".to_string());
            for (position, suggestion) in prompts.iter().enumerate() {
                match &panel.editing {
                    Some(editing) if editing.index == position => lines.push(format!(
                        "    {}. [editing] {}  (save-edit | cancel-edit)",
                        position + 1,
                        editing.text
                    )),
                    _ => lines.push(format!("    {}. {}", position + 1, suggestion.prompt)),
                }
                if !suggestion.reason.is_empty() {
                    lines.push(format!("       {}", suggestion.reason));
                }
            }
        }
        Some(GenerationResult::Rewritten { content }) => {
            lines.push(format!(
                "  Rewritten ({} words):",
                content.split_whitespace().count()
            ));
            lines.extend(content.lines().map(|line| format!("    {line}")));
        }
        Some(GenerationResult::Dashboard(report)) => {
            render_dashboard(report, panel.stage == Stage::Expanded, lines)
        }
        Some(GenerationResult::ReplacementPrompt { .. }) | None => {}
    }

    let mut actions = Vec::new();
    if panel.can_submit {
        actions.push("submit");
    }
    if panel.can_hand_off {
        actions.push(match panel.tool {
            ToolId::PromptRecommender => "use-in-rewriter",
            _ => "use-in-insights",
        });
    }
    if !actions.is_empty() {
        lines.push(format!("  Ready: {}", actions.join(", ")));
    }
}

fn render_dashboard(report: &DashboardReport, expanded: bool, lines: &mut Vec<String>) {
    let sign = if report.score_change > 0 { "+" } else { "" };
    lines.push(format!(
        "  {} | {} | visibility {}% ({}{}% vs last week) | {} mentions",
        report.business_name,
        report.industry,
        report.visibility_score,
        sign,
        report.score_change,
        report.total_mentions
    ));
    for highlight in &report.highlights {
        lines.push(format!("    * {highlight}"));
    }
    lines.push("  Rankings:".to_string());
    for row in &report.competitors {
        let sign = if row.change > 0 { "+" } else { "" };
        lines.push(format!(
            "    {}. {} {}% ({}{}) {} mentions",
            row.rank, row.name, row.score, sign, row.change, row.mentions
        ));
    }
    lines.push("  `download` saves this dashboard as a text report".to_string());
    if !expanded {
        lines.push("  `dashboard-expand` for platform and prompt breakdowns".to_string());
        return;
    }
    lines.push("  Platforms:".to_string());
    for share in &report.platform_share {
        lines.push(format!("    {}: {}%", share.platform, share.percent));
    }
    lines.push("  Top prompts:".to_string());
    for row in &report.top_prompts {
        lines.push(format!("    {} ({} appearances)", row.prompt, row.appearances));
    }
}

fn push_prompts(prompts: &[String], lines: &mut Vec<String>) {
    for (position, prompt) in prompts.iter().enumerate() {
        lines.push(format!("  Prompt {}: {}", position + 1, prompt));
    }
}

fn push_style(options: &RewriteOptions, lines: &mut Vec<String>) {
    let platforms = if options.platforms.is_empty() {
        "any".to_string()
    } else {
        options.platforms.join(", ")
    };
    lines.push(format!(
        "  Style: tone {} | audience {} | platforms {} | up to {} words",
        options.tone.map_or("any", |tone| tone.as_str()),
        options.audience.map_or("any", |audience| audience.as_str()),
        platforms,
        options.max_words
    ));
}

fn preview(text: &str) -> String {
    const PREVIEW_CHARS: usize = 72;
    let first_line = text.lines().next().unwrap_or_default();
    match first_line.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &first_line[..cut]),
        None if text.lines().nth(1).is_some() => format!("{first_line}..."),
        None => first_line.to_string(),
    }
}
