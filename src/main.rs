use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;
use trivy_compliance::{
    app::{ComponentFactory, Config},
    domain::compliance::{image::Image, scan_status::ScanStatus},
    infra::ConcreteComponentFactory,
};

/// Decides whether a container image may stay on the node.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scan policy file, YAML or JSON. Defaults apply when omitted.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Identifier of the image, only used in logs.
    #[arg(long)]
    image_id: Option<String>,

    /// Content digest of the image. Repeatable; tried before names.
    #[arg(long = "digest")]
    digests: Vec<String>,

    /// Name or tag of the image. Repeatable.
    #[arg(long = "name")]
    names: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match Config::from_file(path).await {
            Ok(config) => config,
            Err(err) => {
                error!("{err}");
                return ExitCode::from(3);
            }
        },
        None => Config::default(),
    };
    let config = Arc::new(config);

    let mut image = Image::new(args.digests, args.names);
    if let Some(image_id) = args.image_id {
        image = image.with_image_id(image_id);
    }

    let scanner = ConcreteComponentFactory::default().image_scanner(config.clone());

    let status = tokio::select! {
        result = scanner.scan(&image) => result.unwrap_or_else(|err| {
            error!("{err}");
            ScanStatus::Failed
        }),
        _ = scanner.timer().expired() => {
            warn!(budget = ?config.timeout.total, "total scan budget exhausted");
            ScanStatus::Failed
        }
    };

    println!("{status}");
    if status == ScanStatus::Failed {
        println!("deleteFailedImages={}", config.delete_failed_images);
    }

    match status {
        ScanStatus::Ok => ExitCode::SUCCESS,
        ScanStatus::NonCompliant => ExitCode::from(1),
        ScanStatus::Failed => ExitCode::from(2),
    }
}
