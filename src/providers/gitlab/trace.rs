use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use super::client::GitLabClient;
use crate::error::Result;

/// CSI sequences (`ESC [` params, intermediates, final byte) and two-byte
/// `ESC` escapes in `@-Z` / `\-_`.
static ANSI_ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])").expect("ANSI escape pattern is valid")
});

/// Removes ANSI/VT100 escape sequences, leaving plain text.
///
/// Stripping is repeated until nothing matches, so an escape that only
/// forms once an inner sequence is removed is stripped as well and the
/// result is a fixed point.
pub fn strip_ansi(trace: &str) -> Cow<'_, str> {
    let mut text = Cow::Borrowed(trace);
    while ANSI_ESCAPE.is_match(&text) {
        text = Cow::Owned(ANSI_ESCAPE.replace_all(&text, "").into_owned());
    }
    text
}

impl GitLabClient {
    /// Downloads one job's log and returns it with escape sequences stripped.
    pub async fn fetch_job_trace(&self, project_id: u64, job_id: u64) -> Result<String> {
        let raw = self
            .get_text(&format!("projects/{project_id}/jobs/{job_id}/trace"))
            .await?;
        Ok(strip_ansi(&raw).into_owned())
    }
}
