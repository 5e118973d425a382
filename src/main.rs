use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use ssh_keysmith::cli::{self, ConsoleReporter, SystemClipboard};
use ssh_keysmith::config::{KeyGenOptions, DEFAULT_COMMENT, DEFAULT_KEY_NAME, DEFAULT_KEY_SIZE};
use ssh_keysmith::Result;

#[derive(Parser)]
#[command(name = "ssh-keysmith")]
#[command(author = "Oleg")]
#[command(version = "0.1.0")]
#[command(
    about = "Generate an RSA key pair for Azure DevOps (OpenSSH public key + PEM private key)",
    long_about = None
)]
struct Cli {
    /// Base filename (no extension)
    #[arg(long, default_value = DEFAULT_KEY_NAME)]
    name: String,

    /// Output directory [default: ~/.ssh]
    #[arg(long = "out", value_name = "DIR")]
    out: Option<PathBuf>,

    /// OpenSSH public key comment
    #[arg(long, default_value = DEFAULT_COMMENT)]
    comment: String,

    /// Also export an encrypted PKCS#8 key protected by this passphrase
    #[arg(long, conflicts_with = "ask_passphrase")]
    passphrase: Option<String>,

    /// Prompt for the passphrase instead of passing it on the command line
    #[arg(long)]
    ask_passphrase: bool,

    /// Do not copy the public key to the clipboard
    #[arg(long)]
    no_clipboard: bool,

    /// Do not add the Azure DevOps entry to the SSH config
    #[arg(long)]
    no_config: bool,

    /// RSA key size in bits
    #[arg(long, default_value_t = DEFAULT_KEY_SIZE)]
    key_size: usize,

    /// Print the result as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    pretty_env_logger::init_custom_env("KEYSMITH_LOG");

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut options = match cli.out {
        Some(dir) => KeyGenOptions::new(dir),
        None => KeyGenOptions::with_default_dir()?,
    };
    options.name = cli.name;
    options.comment = cli.comment;
    options.key_size = cli.key_size;
    options.copy_to_clipboard = !cli.no_clipboard;
    options.update_config = !cli.no_config;
    options.interactive = !cli.json;

    if cli.ask_passphrase {
        options.passphrase = cli::prompt_new_passphrase()?;
    } else if let Some(passphrase) = cli.passphrase {
        options = options.with_passphrase(passphrase);
    }

    let mut clipboard = SystemClipboard;

    if cli.json {
        let mut reporter = ConsoleReporter::on_stderr();
        let report = cli::generate::run(&options, &mut reporter, &mut clipboard)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let mut reporter = ConsoleReporter::new();
        cli::generate::run(&options, &mut reporter, &mut clipboard)?;
    }

    Ok(())
}
