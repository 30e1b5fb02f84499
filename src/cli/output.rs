//! Output mode helpers shared by every subcommand.
//!
//! The global flags land in environment variables before dispatch, so any
//! code depth can check the active mode without threading state through.

const ENV_JSON: &str = "QUOTEDECK_JSON";
const ENV_QUIET: &str = "QUOTEDECK_QUIET";
const ENV_VERBOSE: &str = "QUOTEDECK_VERBOSE";
const ENV_NO_COLOR: &str = "QUOTEDECK_NO_COLOR";

fn env_flag(name: &str) -> bool {
    std::env::var(name).map(|v| v == "1").unwrap_or(false)
}

/// Machine-readable output requested.
pub fn is_json() -> bool {
    env_flag(ENV_JSON)
}

/// Suppress everything except errors and primary results.
pub fn is_quiet() -> bool {
    env_flag(ENV_QUIET)
}

pub fn is_verbose() -> bool {
    env_flag(ENV_VERBOSE)
}

/// Color is off when either our flag or the conventional NO_COLOR is set.
pub fn no_color() -> bool {
    env_flag(ENV_NO_COLOR) || std::env::var_os("NO_COLOR").is_some()
}

/// Pretty-print a JSON document to stdout.
pub fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

// ── ANSI styling ──────────────────────────────────────────────────────────

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Small ANSI styler that honors the color setting once at construction.
#[derive(Debug, Clone, Copy)]
pub struct Styled {
    enabled: bool,
}

impl Styled {
    pub fn new() -> Self {
        Self {
            enabled: !no_color(),
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    pub fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    pub fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    pub fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    pub fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    pub fn ok_sym(&self) -> String {
        self.green("[OK]")
    }

    pub fn warn_sym(&self) -> String {
        self.yellow("[!!]")
    }

    pub fn err_sym(&self) -> String {
        self.red("[XX]")
    }
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_styler_passes_text_through() {
        let s = Styled { enabled: false };
        assert_eq!(s.green("ready"), "ready");
        assert_eq!(s.ok_sym(), "[OK]");
    }

    #[test]
    fn test_enabled_styler_wraps_with_reset() {
        let s = Styled { enabled: true };
        assert_eq!(s.red("bad"), "\x1b[31mbad\x1b[0m");
        assert!(s.warn_sym().contains("[!!]"));
    }
}
