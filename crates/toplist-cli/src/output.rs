use owo_colors::OwoColorize;

/// Console output for user-facing summaries. Run-internal events go
/// through `tracing`; this covers the final lines a human reads.
pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        println!("{} {}", "✓".green(), msg.as_ref());
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors are shown even in quiet mode
        eprintln!("{} {}", "✗".red(), msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        println!("{} {}", "⚠".yellow(), msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        println!("{}", msg.as_ref());
    }
}
