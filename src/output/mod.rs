mod progress;
mod styling;
mod summary;
mod tables;

pub use progress::{PhaseSpinner, TraceProgress};
use styling::{banner, heading, muted, value};
pub use styling::{error_label, warning};
pub use summary::print_summary;

/// Prints the banner to stderr.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        banner("🛡  GitLab Auditor"),
        muted(env!("CARGO_PKG_VERSION")),
        muted("Bulk CI job log retrieval for security review")
    );
}

/// Echoes the effective run configuration with the token masked.
pub fn print_configuration(
    instance_url: &str,
    token: &crate::auth::Token,
    mode: &str,
    output_dir: &str,
) {
    eprintln!("{}", heading("Configuration:"));
    eprintln!("  {} {}", muted("Instance URL:"), value(instance_url));
    eprintln!("  {} {}", muted("GitLab token:"), value(token));
    eprintln!("  {} {}", muted("Scan mode:   "), value(mode));
    eprintln!("  {} {}", muted("Output dir:  "), value(output_dir));
}
