//! Plain-text export of an insights dashboard.

use chrono::NaiveDate;

use crate::DashboardReport;

/// The report a user downloads from a finished dashboard.
pub fn report_text(report: &DashboardReport, generated: NaiveDate) -> String {
    let sign = |value: i32| if value > 0 { "+" } else { "" };
    let own_rank = report
        .competitors
        .iter()
        .find(|row| row.name == report.business_name)
        .map_or_else(|| "-".to_string(), |row| row.rank.to_string());

    let mut buffer = String::new();
    buffer.push_str("GEO INSIGHTS DASHBOARD REPORT\n");
    buffer.push_str("=====================================\n");
    buffer.push_str(&format!(
        "Business: {}\nIndustry: {}\nGenerated: {}\n\n",
        report.business_name,
        report.industry,
        generated.format("%Y-%m-%d")
    ));

    push_heading(&mut buffer, "OVERVIEW:");
    buffer.push_str(&format!(
        "Visibility Score: {}%\nScore Change: {}{}%\nTotal Mentions: {}\nAverage Ranking: #{}\n\n",
        report.visibility_score,
        sign(report.score_change),
        report.score_change,
        report.total_mentions,
        own_rank
    ));

    push_heading(&mut buffer, "BRAND INDUSTRY RANKING:");
    for row in &report.competitors {
        buffer.push_str(&format!(
            "{}. {} - {}% ({}{}%)\n",
            row.rank,
            row.name,
            row.score,
            sign(row.change),
            row.change
        ));
    }
    buffer.push('\n');

    push_heading(&mut buffer, "PLATFORM BREAKDOWN:");
    for share in &report.platform_share {
        buffer.push_str(&format!("{}: {}%\n", share.platform, share.percent));
    }
    buffer.push('\n');

    push_heading(&mut buffer, "TOP PERFORMING PROMPTS:");
    for (position, row) in report.top_prompts.iter().enumerate() {
        buffer.push_str(&format!(
            "{}. \"{}\" - {} appearances\n",
            position + 1,
            row.prompt,
            row.appearances
        ));
    }
    buffer.push_str("\nGenerated by GEO (Generative Engine Optimizer)\n");
    buffer
}

/// `GEO-Dashboard-<business>-<date>.txt`, safe to use as a file name.
pub fn report_file_name(report: &DashboardReport, generated: NaiveDate) -> String {
    let business: String = report
        .business_name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!(
        "GEO-Dashboard-{}-{}.txt",
        business,
        generated.format("%Y-%m-%d")
    )
}

fn push_heading(buffer: &mut String, title: &str) {
    buffer.push_str(title);
    buffer.push('\n');
    buffer.push_str(&"-".repeat(title.len()));
    buffer.push('\n');
}
