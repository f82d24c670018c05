/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Colour used when printing a status code.
pub fn color_for_status(code: &str) -> &'static str {
    match code {
        "DONE" => GREEN,
        "WIP" => YELLOW,
        "HOLD" => RED,
        "TBS" => BLUE,
        _ => RESET,
    }
}
