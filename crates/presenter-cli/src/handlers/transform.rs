//! Transform command handler

use super::utils::load_document;
use crate::cli::TransformArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{OutputFormatter, OutputWriter};
use presenter_core::{Presenter, PresenterConfig};
use serde_json::Value;
use std::fs;
use tracing::{debug, info};

/// Handle the transform command
pub fn handle_transform(
    args: TransformArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let timer = Timer::with_details("transform", &args.model.display().to_string());

    let mut presenter_config = config.presenter.clone();
    presenter_config.merge(PresenterConfig {
        getter_pattern: args.pattern.clone(),
    });

    let transformer = load_document(&args.transformer)?;
    let presenter = Presenter::from_config(transformer, &presenter_config)?;
    debug!(
        transformer = %args.transformer.display(),
        getter_pattern = presenter.getter_pattern().as_str(),
        "Loaded transformer"
    );

    let model = load_document(&args.model)?;
    let view = if args.each {
        let Value::Array(models) = model else {
            return Err(Error::invalid_args(format!(
                "--each requires {} to contain an array",
                args.model.display()
            )));
        };

        let progress = output.progress_bar(models.len() as u64, "Transforming");
        let views = presenter.transform_all(models.iter().inspect(|_| {
            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }))?;
        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        info!(count = views.len(), "Transformed collection");
        Value::Array(views)
    } else {
        presenter.transform(&model)?
    };

    debug!(elapsed_ms = timer.elapsed().as_millis() as u64, "Transform finished");

    match args.save_to {
        Some(path) => {
            let content = output.format().format(&view)?;
            fs::write(&path, content)?;
            info!(path = %path.display(), "Saved view data");
            output.success(&format!("✓ Saved view data to {}", path.display()))
        }
        None => output.data(&view),
    }
}
