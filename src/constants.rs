//! Module for shared constants used across the codebase

/// Input limits enforced by every transform method
pub mod limits {
    /// Hard cap on input length, counted in characters
    pub const MAX_INPUT_LENGTH: usize = 100_000;
}

/// User-facing validation messages
pub mod messages {
    pub const REQUIRED: &str = "Input is required";
    pub const NULL_INPUT: &str = "Input cannot be null";
}

/// Combining marks used by the overlay text effects
pub mod marks {
    pub const STRIKETHROUGH: char = '\u{0336}';
    pub const UNDERLINE: char = '\u{0332}';
    pub const DOUBLE_UNDERLINE: char = '\u{0333}';
    pub const SLASH: char = '\u{0338}';
}

pub mod config {
    /// Default configuration file name
    pub const DEFAULT_CONF_FILE: &str = "textforge.toml";

    /// Tool used when none is given on the command line
    pub const DEFAULT_TOOL: &str = "title-case";

    /// Calls slower than this are reported as warnings by the QA runner
    pub const DEFAULT_SLOW_THRESHOLD_MS: u64 = 250;

    /// Number of runs kept per tool by the flakiness tracker
    pub const DEFAULT_FLAKINESS_WINDOW: usize = 20;
}
