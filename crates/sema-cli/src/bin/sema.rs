use clap::Parser;
use sema_cli::args::CliArgs;
use sema_cli::reporter;
use sema_cli::JsonHirParser;
use sema_core::Core;
use sema_loader::filesystem::StdFileSystem;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "sema_cli=info,warn".to_string()))
        .init();

    let args = CliArgs::parse();
    let options = args.to_core_options();
    let mut core = Core::new(JsonHirParser::new(), StdFileSystem, options);

    let program = core.compile(&args.entry_points);

    let stdout = std::io::stdout();
    if args.json {
        reporter::report_json(&program.diagnostics, stdout.lock())?;
    } else {
        reporter::report_text(&program.diagnostics, stdout.lock())?;
    }

    if program.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}
