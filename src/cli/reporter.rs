//! User-facing output
//!
//! Everything the generate command tells the user goes through a [`Reporter`],
//! so the command can run against a console or a recording in tests.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use super::generate::GenerationReport;

/// Output capability handed to the generate command
pub trait Reporter {
    /// Progress of the current step
    fn status(&mut self, message: &str);

    /// Plain informational message
    fn report(&mut self, message: &str);

    fn success(&mut self, message: &str);

    /// Recoverable problem, the command keeps going
    fn warn(&mut self, message: &str);

    fn error(&mut self, message: &str);

    /// Ask a yes/no question, defaulting to no
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Final summary of a finished run
    fn summary(&mut self, report: &GenerationReport);
}

/// Colored terminal output
pub struct ConsoleReporter {
    /// Send everything to stderr, keeping stdout for machine-readable output
    use_stderr: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self { use_stderr: false }
    }

    pub fn on_stderr() -> Self {
        Self { use_stderr: true }
    }

    fn line(&self, text: impl std::fmt::Display) {
        if self.use_stderr {
            eprintln!("{}", text);
        } else {
            println!("{}", text);
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn status(&mut self, message: &str) {
        self.line(format!("{} {}", "•".cyan(), message.cyan()));
    }

    fn report(&mut self, message: &str) {
        self.line(message);
    }

    fn success(&mut self, message: &str) {
        self.line(format!("{} {}", "✓".green().bold(), message.green().bold()));
    }

    fn warn(&mut self, message: &str) {
        self.line(format!("{} {}", "Warning:".yellow().bold(), message));
    }

    fn error(&mut self, message: &str) {
        self.line(format!("{} {}", "Error:".red().bold(), message));
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.use_stderr {
            eprint!("{} [y/N] ", prompt.yellow().bold());
            io::stderr().flush().ok();
        } else {
            print!("{} [y/N] ", prompt.yellow().bold());
            io::stdout().flush().ok();
        }

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input).is_err() {
            return false;
        }

        matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn summary(&mut self, report: &GenerationReport) {
        self.report("");
        self.report(&format!("{}", "✓ SSH key pair generated successfully!".green().bold()));
        if report.config_updated {
            self.report(&format!(
                "{}",
                "✓ SSH config file updated with Azure DevOps entry!".green().bold()
            ));
        }
        self.report("");

        self.report(&format!(
            "{:<22} {:<50} {}",
            "FILE TYPE".blue().bold(),
            "PATH".blue().bold(),
            "DESCRIPTION".blue().bold()
        ));
        self.report(&format!("{}", "─".repeat(100).dimmed()));

        let row = |kind: colored::ColoredString, path: &std::path::Path, description: &str| {
            self.line(format!(
                "{:<22} {:<50} {}",
                kind,
                path.display().to_string().dimmed(),
                description
            ));
        };

        row("Private key".green(), &report.private_key_path, "PKCS#1 format for SSH clients");
        if let Some(path) = &report.encrypted_key_path {
            row("Encrypted private".yellow(), path, "Password-protected PKCS#8 format");
        }
        row("Public key".cyan(), &report.public_key_path, "OpenSSH format for Azure DevOps");
        if let Some(path) = &report.config_path {
            row("SSH config".magenta(), path, "SSH configuration for Azure DevOps");
        }

        if let Some(fingerprint) = &report.fingerprint {
            self.report("");
            self.report(&format!("Fingerprint: {}", fingerprint.cyan()));
        }

        if report.copied_to_clipboard {
            self.report("");
            self.report(&format!("{}", "Public key copied to clipboard!".green().bold()));
        }

        self.report("");
        let header = if report.copied_to_clipboard {
            "Public key (already copied to clipboard):"
        } else {
            "Public key (copy this to Azure DevOps):"
        };
        self.report(&format!("{}", header.cyan().bold()));
        self.report(&format!("{}", "─".repeat(60).dimmed()));
        self.report(&format!("{}", report.public_key.dimmed()));
        self.report(&format!("{}", "─".repeat(60).dimmed()));

        self.report("");
        self.report(&format!("{}", "Next steps".green().bold()));
        self.report(&format!(
            "  {} Go to Azure DevOps → User Settings → SSH Public Keys",
            "1.".yellow().bold()
        ));
        self.report(&format!(
            "  {} Click 'Add' and paste the public key {}",
            "2.".yellow().bold(),
            if report.copied_to_clipboard { "(already in clipboard)" } else { "content above" }
        ));
        if report.config_updated {
            self.report(&format!(
                "  {} SSH is now configured! Clone repos with: {}",
                "3.".yellow().bold(),
                "git clone git@dev.azure.com:org/repo.git".dimmed()
            ));
        } else {
            self.report(&format!(
                "  {} Configure your SSH client to use the private key",
                "3.".yellow().bold()
            ));
        }
        self.report(&format!(
            "  {} Test the connection: {}",
            "4.".yellow().bold(),
            "ssh -T git@ssh.dev.azure.com".dimmed()
        ));
        self.report("");
    }
}
