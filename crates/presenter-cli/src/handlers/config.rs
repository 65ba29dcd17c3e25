//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::{Config, ConfigBuilder, FileFormat, PROJECT_CONFIG_FILE};
use crate::error::Result;
use crate::output::OutputWriter;
use presenter_core::DEFAULT_GETTER_PATTERN;
use std::path::Path;

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Init(init_args) => handle_config_init(init_args, Path::new("."), output),
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
    }
}

/// Write a default presenter.toml into `directory`
fn handle_config_init(
    args: ConfigInitArgs,
    directory: &Path,
    output: &mut OutputWriter,
) -> Result<()> {
    let path = directory.join(PROJECT_CONFIG_FILE);

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))?;
        return Ok(());
    }

    ConfigBuilder::new()
        .getter_pattern(DEFAULT_GETTER_PATTERN)
        .build()
        .save(&path)?;

    output.success(&format!("✓ Created config at {}", path.display()))?;
    output.info("Edit it to customize the getter pattern, output and logging.")
}

/// Print the effective configuration
fn handle_config_show(
    args: ConfigShowArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let format = match args.format {
        ConfigFormat::Toml => FileFormat::Toml,
        ConfigFormat::Json => FileFormat::Json,
        ConfigFormat::Yaml => FileFormat::Yaml,
    };

    let content = format.render(config)?;
    output.writeln(content.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use tempfile::TempDir;

    fn quiet_writer() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Human, true, Box::new(std::io::sink()))
    }

    fn init(directory: &Path, force: bool) {
        handle_config_init(ConfigInitArgs { force }, directory, &mut quiet_writer()).unwrap();
    }

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = TempDir::new().unwrap();
        init(dir.path(), false);

        let config = Config::from_file(&dir.path().join(PROJECT_CONFIG_FILE)).unwrap();
        assert_eq!(
            config.presenter.getter_pattern.as_deref(),
            Some(DEFAULT_GETTER_PATTERN)
        );
    }

    #[test]
    fn test_init_keeps_existing_config_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PROJECT_CONFIG_FILE);
        std::fs::write(&path, "[presenter]\ngetter_pattern = ':(\\w*?):'\n").unwrap();

        init(dir.path(), false);
        let kept = Config::from_file(&path).unwrap();
        assert_eq!(kept.presenter.getter_pattern.as_deref(), Some(r":(\w*?):"));

        init(dir.path(), true);
        let replaced = Config::from_file(&path).unwrap();
        assert_eq!(
            replaced.presenter.getter_pattern.as_deref(),
            Some(DEFAULT_GETTER_PATTERN)
        );
    }

    #[test]
    fn test_show_renders_every_format() {
        let config = ConfigBuilder::new().getter_pattern(r":(\w*?):").build();

        for format in [ConfigFormat::Toml, ConfigFormat::Json, ConfigFormat::Yaml] {
            handle_config_show(ConfigShowArgs { format }, &config, &mut quiet_writer()).unwrap();
        }
    }
}
