use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use anyhow::{bail, Context};
use clap::Parser;

use simshell::config::ShellConfig;
use simshell::logging::init_tracing;
use simshell::pty::{create_pair_with, LineReader, MemoryStream, Peripheral, SharedStream};
use simshell::shell::ShellFrontend;
use simshell::ChannelError;

/// Marks the end of one report on the terminal stream.
const REPORT_END: &str = "--";

#[derive(Debug, Parser)]
#[command(
    name = "simshell",
    version,
    about = "Inspect how shell lines are tokenized, redirected and piped"
)]
struct Cli {
    /// Config file (default: the per-user simshell config)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Line to inspect; may be repeated. Reads stdin when absent.
    #[arg(short = 'c', long = "command")]
    commands: Vec<String>,

    /// Print completion candidates for PREFIX and exit
    #[arg(long, value_name = "PREFIX")]
    complete: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(log_file) = init_tracing() {
        tracing::info!(path = %log_file.display(), "logging started");
    }

    let config = match &cli.config {
        Some(path) => ShellConfig::load_from(path)?,
        None => ShellConfig::load()?,
    };
    let frontend = ShellFrontend::from_config(&config);

    if let Some(prefix) = &cli.complete {
        let completion = frontend.complete(prefix);
        for candidate in &completion.matches {
            println!("{}", candidate);
        }
        return Ok(());
    }

    // The terminal side (this thread) types lines into the controller; the
    // shell side parses them on a worker thread and answers on the peripheral.
    let (controller, peripheral) = create_pair_with(config.terminal.interrupt_byte);
    let chunk_size = config.terminal.read_chunk_size;
    let worker = thread::Builder::new()
        .name("simshell-worker".to_string())
        .spawn(move || run_shell(frontend, peripheral, chunk_size))
        .context("failed to spawn shell worker")?;

    let mut output = LineReader::with_chunk_size(controller.clone(), chunk_size);
    let mut stdout = io::stdout().lock();
    // The worker answers once per terminated line, so text holding several
    // lines is typed one line at a time.
    let mut inspect = |text: &str| -> anyhow::Result<()> {
        for line in text.split('\n') {
            controller.write(format!("{}\n", line).as_bytes())?;
            while let Some(report_line) = output.read_line()? {
                if report_line == REPORT_END {
                    break;
                }
                writeln!(stdout, "{}", report_line)?;
            }
        }
        Ok(())
    };

    if cli.commands.is_empty() {
        for line in io::stdin().lock().lines() {
            inspect(&line?)?;
        }
    } else {
        for line in &cli.commands {
            inspect(line)?;
        }
    }

    controller.close();
    match worker.join() {
        Ok(Ok(())) | Ok(Err(ChannelError::Closed)) => Ok(()),
        Ok(Err(err)) => bail!("shell worker failed: {}", err),
        Err(_) => bail!("shell worker panicked"),
    }
}

/// Shell side of the pair: one report per line until the channel closes.
fn run_shell(
    frontend: ShellFrontend,
    peripheral: Peripheral,
    chunk_size: usize,
) -> Result<(), ChannelError> {
    let mut input = LineReader::with_chunk_size(peripheral.clone().into_blocking(), chunk_size);
    loop {
        let line = match input.read_line() {
            Ok(Some(line)) => line,
            Ok(None) => continue,
            Err(ChannelError::Interrupted) => {
                tracing::info!("line discarded by interrupt");
                continue;
            }
            Err(err) => return Err(err),
        };
        peripheral.write(describe(&frontend, &line).as_bytes())?;
    }
}

fn describe(frontend: &ShellFrontend, line: &str) -> String {
    let input: SharedStream = Arc::new(MemoryStream::new());
    let output: SharedStream = Arc::new(MemoryStream::new());

    let mut report = String::new();
    match frontend.submit_line(line, input, output) {
        Ok(submitted) if submitted.stages.is_empty() => report.push_str("(empty)\n"),
        Ok(submitted) => {
            for (index, stage) in submitted.stages.iter().enumerate() {
                report.push_str(&format!("stage {}: {:?}\n", index, stage.tokens));
            }
            if let (Some(mode), Some(target)) =
                (submitted.redirection.mode(), submitted.redirection.target())
            {
                report.push_str(&format!("redirect {:?}: {:?}\n", mode, target));
            }
        }
        Err(err) => report.push_str(&format!("error: {}\n", err)),
    }
    report.push_str(REPORT_END);
    report.push('\n');
    report
}
