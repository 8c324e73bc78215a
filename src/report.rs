//! Console reporting for initialization runs
//!
//! Every line goes to stdout. Warnings are collected so the run can finish
//! with a summary of everything that was skipped.

use colored::Colorize;

pub struct Reporter {
    dry_run: bool,
    verbose: bool,
    actions: usize,
    warnings: Vec<String>,
}

impl Reporter {
    pub fn new(dry_run: bool, verbose: bool) -> Self {
        Self {
            dry_run,
            verbose,
            actions: 0,
            warnings: Vec::new(),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Header for one initializer step
    pub fn step(&self, title: &str) {
        println!("\n{}", format!("▸ {title}").bold());
    }

    /// An effect that was applied, or would be in dry-run
    pub fn action(&mut self, message: &str) {
        self.actions += 1;
        if self.dry_run {
            println!("  {} {}", "[dry-run]".cyan(), message);
        } else {
            println!("  {} {}", "✓".green(), message);
        }
    }

    /// Non-fatal anomaly; the run keeps going
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        println!("  {} {}", "⚠️ ".yellow(), message.yellow());
        self.warnings.push(message);
    }

    pub fn debug(&self, message: &str) {
        if self.verbose {
            println!("    {}", message.dimmed());
        }
    }

    pub fn actions(&self) -> usize {
        self.actions
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn summary(&self) {
        let mode = if self.dry_run { "Dry run" } else { "Initialization" };
        if self.warnings.is_empty() {
            println!(
                "\n{}",
                format!("✅ {mode} complete: {} action(s)", self.actions)
                    .green()
                    .bold()
            );
        } else {
            println!(
                "\n{}",
                format!(
                    "✅ {mode} complete: {} action(s), {} warning(s)",
                    self.actions,
                    self.warnings.len()
                )
                .yellow()
                .bold()
            );
        }
    }
}
