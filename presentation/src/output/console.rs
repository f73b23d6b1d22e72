//! Console output formatter for reconciliation summaries

use colored::Colorize;
use gurubu_domain::{OutputFormat, ReconciliationSummary};

/// Width of the longest tally bar
const BAR_WIDTH: usize = 30;

/// Formats reconciliation summaries for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Turn ANSI colors on or off for all console output
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Format with the requested output format
    pub fn render(summary: &ReconciliationSummary, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(summary),
            OutputFormat::Summary => Self::format_summary_only(summary),
            OutputFormat::Json => Self::format_json(summary),
        }
    }

    /// Format the complete summary
    pub fn format(summary: &ReconciliationSummary) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Estimation Summary"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Scale:".cyan().bold(), summary.scale));

        // Tally
        output.push_str(&Self::section_header("Votes"));
        output.push_str(&Self::tally_bars(summary));

        // Statistics
        let stats = &summary.statistics;
        output.push_str(&Self::section_header("Statistics"));
        output.push_str(&format!("  Counted votes: {}\n", stats.counted));
        if let Some(average) = stats.average {
            output.push_str(&format!(
                "  Average:       {:.1} ({} numeric vote(s))\n",
                average, stats.numeric_votes
            ));
        }
        if let (Some(min), Some(max)) = (stats.min, stats.max) {
            output.push_str(&format!("  Range:         {} - {}\n", min, max));
        }
        if stats.unanimous {
            output.push_str(&format!("  {}\n", "Unanimous".green().bold()));
        }

        // AI estimate
        output.push_str(&Self::section_header("AI Estimate"));
        match &summary.ai_estimate {
            Some(ai) => {
                output.push_str(&format!(
                    "  {} {} ({:.0}% confidence)\n",
                    "Estimate:".yellow().bold(),
                    ai.estimation,
                    ai.confidence * 100.0
                ));
                if !ai.reasoning.is_empty() {
                    output.push_str(&format!("\n{}\n", "Reasoning:".bold()));
                    output.push_str(&Self::indent(&ai.reasoning, "  "));
                    output.push('\n');
                }
                if !ai.historical_comparison.is_empty() {
                    output.push_str(&format!("\n{}\n", "Historical comparison:".bold()));
                    output.push_str(&Self::indent(&ai.historical_comparison, "  "));
                    output.push('\n');
                }
            }
            None => output.push_str(&format!("  {}\n", "No AI estimate available".dimmed())),
        }

        output.push('\n');
        output.push_str(&Self::verdict(summary));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(summary: &ReconciliationSummary) -> String {
        serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the suggestion only (concise output)
    pub fn format_summary_only(summary: &ReconciliationSummary) -> String {
        let mut output = String::new();

        let majority = summary
            .human_majority
            .as_ref()
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string());
        let counts: Vec<String> = summary
            .tally
            .entries(&summary.scale)
            .filter(|(_, count)| *count > 0)
            .map(|(label, count)| format!("{}x{}", count, label))
            .collect();

        output.push_str(&format!(
            "{} {} {}\n",
            "Majority:".bold(),
            majority,
            format!("[{}]", counts.join(" ")).dimmed()
        ));

        if let Some(ai) = &summary.ai_estimate {
            output.push_str(&format!(
                "{} {} ({:.0}%)\n",
                "AI:".bold(),
                ai.estimation,
                ai.confidence * 100.0
            ));
        }

        output.push_str(&Self::verdict(summary));
        output
    }

    fn tally_bars(summary: &ReconciliationSummary) -> String {
        let max = summary.tally.counts().iter().copied().max().unwrap_or(0);
        let width = summary
            .scale
            .iter()
            .map(|l| l.as_str().chars().count())
            .max()
            .unwrap_or(1);

        let mut output = String::new();
        for (label, count) in summary.tally.entries(&summary.scale) {
            let bar_len = if max == 0 { 0 } else { count * BAR_WIDTH / max };
            let bar = "█".repeat(bar_len);
            let is_majority = summary.human_majority.as_ref() == Some(label);
            let bar = if is_majority {
                bar.green().to_string()
            } else {
                bar.blue().to_string()
            };
            output.push_str(&format!(
                "  {:>width$} | {} {}\n",
                label.as_str(),
                bar,
                count,
                width = width
            ));
        }
        output
    }

    fn verdict(summary: &ReconciliationSummary) -> String {
        let mut output = String::new();

        if !summary.has_votes() {
            output.push_str(&format!("{}\n", "No votes counted yet".yellow()));
        } else if summary.ai_estimate.is_some() {
            if summary.agreement {
                output.push_str(&format!("{}\n", "Team and AI agree".green().bold()));
            } else {
                output.push_str(&format!("{}\n", "Team and AI disagree".yellow().bold()));
            }
        }

        if let Some(suggested) = summary.suggested_label() {
            output.push_str(&format!("{} {}\n", "Suggested:".cyan().bold(), suggested));
        }

        if summary.split_recommended() {
            output.push_str(&format!(
                "{}\n",
                "AI recommends splitting this item".magenta().bold()
            ));
        }

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
