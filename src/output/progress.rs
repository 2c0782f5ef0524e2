use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::styling::{failures, success, warning};

/// Spinner shown while a listing phase (groups, projects) is running.
pub struct PhaseSpinner {
    pb: ProgressBar,
}

impl PhaseSpinner {
    pub fn start(message: &str) -> Self {
        let pb = create_spinner(warning(message).to_string());
        Self { pb }
    }

    pub fn finish(self, message: &str) {
        self.pb
            .finish_with_message(success(format!("{message} ✓")).to_string());
    }

    pub fn abandon(self) {
        self.pb.abandon();
    }
}

/// Per-project bar advancing once per archived (or skipped) job.
pub struct TraceProgress {
    pb: ProgressBar,
}

impl TraceProgress {
    pub fn new(project: &str, jobs: usize) -> Self {
        let pb = ProgressBar::new(jobs as u64);
        pb.set_draw_target(ProgressDrawTarget::stderr());
        if let Ok(style) =
            ProgressStyle::default_bar().template("  {msg} [{bar:30.cyan/blue}] {pos}/{len}")
        {
            pb.set_style(style.progress_chars("=> "));
        }
        pb.set_message(project.to_string());
        Self { pb }
    }

    pub fn inc(&self) {
        self.pb.inc(1);
    }

    pub fn finish(self, saved: usize, failed: usize) {
        self.pb.finish_with_message(format!(
            "{} saved, {} failed",
            success(saved),
            failures(failed)
        ));
    }
}

fn create_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    if let Ok(style) = ProgressStyle::default_spinner().template("  {msg} {spinner}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
