use std::fs;
use std::io;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::info;

use statx_core::{ExportOutcome, ExportPipeline};
use statx_model::ExportRequest;

use crate::cli::{ExportArgs, InitEnvArgs, ServeArgs};
use crate::config::{InitEnvOutcome, prompt_overwrite, write_default_env};
use crate::server;

pub fn run_serve(args: &ServeArgs) -> Result<()> {
    let settings = args.dirs.settings();
    settings.prepare()?;
    let addr = SocketAddr::new(args.host, args.port);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    runtime.block_on(server::serve(&settings, addr))
}

pub fn run_export(args: &ExportArgs) -> Result<ExportOutcome> {
    let settings = args.dirs.settings();
    settings.prepare()?;
    let body = fs::read_to_string(&args.request)
        .with_context(|| format!("read {}", args.request.display()))?;
    let request: ExportRequest = serde_json::from_str(&body)
        .with_context(|| format!("parse {}", args.request.display()))?;
    let pipeline = ExportPipeline::new(&settings.data_dir, &settings.temp_dir);
    let outcome = pipeline.run(&request)?;
    Ok(outcome)
}

pub fn run_init_env(args: &InitEnvArgs) -> Result<()> {
    let outcome = write_default_env(&args.path, args.force, || {
        prompt_overwrite(&args.path, io::stdin().lock())
    })?;
    match outcome {
        InitEnvOutcome::Created => println!("Created {}", args.path.display()),
        InitEnvOutcome::Overwritten => println!("Overwrote {}", args.path.display()),
        InitEnvOutcome::Kept => {
            info!(path = %args.path.display(), "existing environment file kept");
            println!("Kept existing {}", args.path.display());
        }
    }
    Ok(())
}
