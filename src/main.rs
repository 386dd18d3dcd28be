mod cli;
mod clients;
mod config;
mod models;
mod render;
mod report;

use clap::Parser;
use std::io::{ErrorKind, Write};
use std::process::ExitCode;
use tracing::info;

use clients::aggregator::Aggregator;
use clients::NagiosClient;
use cli::{Cli, Mode};
use models::views::{Report, TableRow};
use render::{RenderStyle, Table, diagnostic_lines};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("nagstat=warn")),
        )
        .init();

    let cli = Cli::parse();
    ExitCode::from(run(cli, &mut std::io::stdout(), &mut std::io::stderr()).await)
}

/// One fetch-reduce-render cycle. Returns the process exit status.
async fn run(cli: Cli, out: &mut impl Write, err: &mut impl Write) -> u8 {
    // Decide the mode before anything touches the network.
    let mode = match cli.mode() {
        Ok(mode) => mode,
        Err(e) => {
            let _ = writeln!(err, "{}", e);
            return 2;
        }
    };

    let cfg = match config::Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            let _ = writeln!(err, "error loading config: {}", e);
            return 1;
        }
    };

    let http = match clients::build_http(cli.timeout()) {
        Ok(http) => http,
        Err(e) => {
            let _ = writeln!(err, "failed to create HTTP client: {}", e);
            return 1;
        }
    };

    let node_clients = cfg
        .servers
        .iter()
        .map(|s| NagiosClient::new(s, http.clone()))
        .collect();
    let aggregator = Aggregator::new(node_clients);

    info!("querying {} servers", cfg.servers.len());
    let outcomes = aggregator.fetch_all().await;

    let style = cli.style();
    let rendered = match mode {
        Mode::Stats => {
            report::summarize(&outcomes).map(|r| render_report(&r, &style, &mut *err))
        }
        Mode::Problems => {
            report::problems(&outcomes).map(|r| render_report(&r, &style, &mut *err))
        }
    };
    let table = match rendered {
        Ok(table) => table,
        Err(e) => {
            let _ = writeln!(err, "{}", e);
            return 1;
        }
    };

    match out.write_all(table.as_bytes()).and_then(|()| out.flush()) {
        Ok(()) => 0,
        // reader went away (`| head`), nothing left to say
        Err(e) if e.kind() == ErrorKind::BrokenPipe => 0,
        Err(e) => {
            let _ = writeln!(err, "writing output: {}", e);
            1
        }
    }
}

/// Writes diagnostics to `err` and returns the rendered table.
fn render_report<R: TableRow>(
    report: &Report<R>,
    style: &RenderStyle,
    err: &mut impl Write,
) -> String {
    for d in &report.diagnostics {
        for line in diagnostic_lines(d) {
            let _ = writeln!(err, "{}", line);
        }
    }
    Table::from_report(report).render(style)
}
