use anyhow::{Context, Result};
use nativegen::cli::{self, Cli, Commands};
use nativegen::commands::{run_deferred, run_generate, Mode};
use nativegen::io::RealFileSystem;

fn main() -> Result<()> {
    let cli = cli::parse_args();
    cli::init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            ref schema,
            ref output_dir,
            check,
        } => handle_generate(&cli, schema.clone(), output_dir.clone(), check),
        Commands::Deferred { ref schema } => handle_deferred(&cli, schema.clone()),
    }
}

fn handle_generate(
    cli: &Cli,
    schema: Option<std::path::PathBuf>,
    output_dir: Option<std::path::PathBuf>,
    check: bool,
) -> Result<()> {
    let settings = cli::resolve_config(cli.config.as_ref())?.resolve(schema, output_dir);
    let mode = if check { Mode::Check } else { Mode::Write };

    let summary = run_generate(&RealFileSystem::new(), &settings, mode).with_context(|| {
        format!(
            "generating bindings from {}",
            settings.schema_path.display()
        )
    })?;

    print!("{}", summary);
    if check {
        println!("All generated files are up to date.");
    }
    Ok(())
}

fn handle_deferred(cli: &Cli, schema: Option<std::path::PathBuf>) -> Result<()> {
    let settings = cli::resolve_config(cli.config.as_ref())?.resolve(schema, None);

    let deferred = run_deferred(&RealFileSystem::new(), &settings)
        .with_context(|| format!("reading {}", settings.schema_path.display()))?;

    for signature in &deferred {
        println!("{}", signature);
    }
    log::info!("{} deferred entries", deferred.len());
    Ok(())
}
