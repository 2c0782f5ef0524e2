use std::fmt::Display;

use console::{style, StyledObject};

type Styled = StyledObject<String>;

/// Section titles such as "Configuration:" and the summary heading.
pub fn heading(text: impl Display) -> Styled {
    style(text.to_string()).bright().underlined()
}

pub fn banner(text: impl Display) -> Styled {
    style(text.to_string()).red().bold()
}

/// Values echoed back to the user (URL, masked token, paths).
pub fn value(text: impl Display) -> Styled {
    style(text.to_string()).cyan()
}

pub fn muted(text: impl Display) -> Styled {
    style(text.to_string()).dim()
}

pub fn success(text: impl Display) -> Styled {
    style(text.to_string()).bright().green()
}

pub fn warning(text: impl Display) -> Styled {
    style(text.to_string()).bright().yellow()
}

pub fn error_label(text: impl Display) -> Styled {
    style(text.to_string()).bright().red()
}

/// Skipped-job count: green when nothing was skipped, yellow otherwise.
pub fn failures(count: usize) -> Styled {
    if count == 0 {
        success(count)
    } else {
        warning(count)
    }
}
