//! Progress reporting for reconciliation

use colored::Colorize;
use gurubu_application::ports::progress::EstimationProgress;
use gurubu_domain::AiEstimateStatus;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Shows a spinner on stderr while the AI estimate is being fetched
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn status_message(status: AiEstimateStatus) -> String {
        match status {
            AiEstimateStatus::Ok => format!("{} received", "v".green()),
            AiEstimateStatus::Unavailable => format!("{} unavailable", "x".yellow()),
            AiEstimateStatus::Error => format!("{} failed", "x".red()),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl EstimationProgress for ProgressReporter {
    fn on_votes_collected(&self, participants: usize, cast: usize) {
        eprintln!(
            "{} {} of {} participant(s) voted",
            "->".cyan(),
            cast,
            participants
        );
    }

    fn on_ai_request_start(&self) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix("AI estimate");
        pb.set_message("requesting...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut spinner) = self.spinner.lock() {
            *spinner = Some(pb);
        }
    }

    fn on_ai_request_complete(&self, status: AiEstimateStatus) {
        let Ok(mut spinner) = self.spinner.lock() else {
            return;
        };
        if let Some(pb) = spinner.take() {
            pb.finish_with_message(Self::status_message(status));
        }
    }
}
