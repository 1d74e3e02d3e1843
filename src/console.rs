//! Operator-facing output: the human-readable report of what happened.
//!
//! Diagnostics go through `tracing`; this is what the operator reads.

use crate::{config::hint, error::Failure};
use owo_colors::OwoColorize;
use std::io::{self, IsTerminal, Write};

/// Where report lines go. Errors go to `err`, everything else to `out`.
pub struct Console<O, E> {
    out: O,
    err: E,
    color: bool,
}

impl Console<io::Stdout, io::Stderr> {
    /// The process's own stdout and stderr, coloured when stdout is a terminal.
    pub fn stdio() -> Self {
        let color = io::stdout().is_terminal();
        Console::new(io::stdout(), io::stderr(), color)
    }
}

impl<O: Write, E: Write> Console<O, E> {
    pub fn new(out: O, err: E, color: bool) -> Self {
        Console { out, err, color }
    }

    // Report output is best effort; a closed pipe shouldn't change the exit
    // code, so write errors are dropped throughout.

    pub fn line<T: AsRef<str>>(&mut self, x: T) {
        let _ = writeln!(self.out, "{}", x.as_ref());
    }

    pub fn blank(&mut self) {
        self.line("");
    }

    pub fn error_line<T: AsRef<str>>(&mut self, x: T) {
        let _ = writeln!(self.err, "{}", x.as_ref());
    }

    pub fn error<T: AsRef<str>>(&mut self, x: T) {
        let msg = format!("❌ {}", x.as_ref());
        let msg = if self.color { msg.red().to_string() } else { msg };
        self.error_line(msg);
    }

    pub fn success<T: AsRef<str>>(&mut self, x: T) {
        let msg = format!("✅ {}", x.as_ref());
        let msg = if self.color { msg.green().to_string() } else { msg };
        self.line(msg);
    }

    pub fn warning<T: AsRef<str>>(&mut self, x: T) {
        let msg = format!("⚠️  {}", x.as_ref());
        let msg = if self.color { msg.yellow().to_string() } else { msg };
        self.line(msg);
    }

    pub fn info<T: AsRef<str>>(&mut self, x: T) {
        let msg = format!("ℹ️  {}", x.as_ref());
        let msg = if self.color { msg.blue().to_string() } else { msg };
        self.line(msg);
    }

    /// A value worth picking out of a line, such as a name.
    pub fn highlight<T: AsRef<str>>(&self, x: T) -> String {
        if self.color {
            x.as_ref().yellow().to_string()
        } else {
            x.as_ref().to_owned()
        }
    }

    /// A ruled heading.
    pub fn banner<T: AsRef<str>>(&mut self, title: T) {
        let rule = "=".repeat(80);
        let rule = if self.color { rule.green().to_string() } else { rule };

        self.line(&rule);
        self.line(format!("  {}", title.as_ref()));
        self.line(&rule);
    }

    /// Report a terminal failure, with remediation advice where there is some.
    pub fn failure(&mut self, f: &Failure) {
        self.error(f.to_string());
        self.hints(f);
    }

    /// As [Console::failure], naming the step that failed.
    pub fn failure_in<T: AsRef<str>>(&mut self, step: T, f: &Failure) {
        self.error(format!("{}: {}", step.as_ref(), f));
        self.hints(f);
    }

    fn hints(&mut self, f: &Failure) {
        if let Failure::Configuration { var, .. } = f {
            for x in hint(var) {
                self.error_line(x);
            }
        }
    }

    /// Hand back the sinks, for inspection in tests.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

/// A console writing into memory, for tests.
pub type Captured = Console<Vec<u8>, Vec<u8>>;

impl Captured {
    pub fn captured() -> Self {
        Console::new(Vec::new(), Vec::new(), false)
    }

    /// Everything written so far as `(stdout, stderr)`.
    pub fn output(self) -> (String, String) {
        let (out, err) = self.into_inner();

        (
            String::from_utf8_lossy(&out).into_owned(),
            String::from_utf8_lossy(&err).into_owned(),
        )
    }
}
