mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./ffbatch.toml", "~/.config/ffbatch/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.encoding.video_codec.trim().is_empty() {
        anyhow::bail!("encoding.video_codec cannot be empty");
    }

    for path in [&config.tools.ffmpeg_path, &config.tools.ffprobe_path]
        .into_iter()
        .flatten()
    {
        if !path.exists() {
            tracing::warn!("Configured tool does not exist: {:?}", path);
        }
    }

    Ok(())
}

/// Validate the parts of a run that must hold before any file is touched.
pub fn validate_run(run: &RunConfig) -> Result<()> {
    if !run.input_dir.is_dir() {
        anyhow::bail!("Input directory not supplied or not found: {:?}", run.input_dir);
    }
    if run.pattern.trim().is_empty() {
        anyhow::bail!("Search pattern cannot be empty");
    }
    Ok(())
}

/// Resolve an external tool, preferring the configured path over PATH lookup.
///
/// Falls back to the bare name when nothing is found so the failure surfaces
/// per file rather than at startup.
pub fn resolve_tool(name: &str, configured: Option<&Path>, required: bool) -> PathBuf {
    let path = match ffbatch_av::get_tool_path(name, configured) {
        Ok(path) => path,
        Err(e) => {
            if required {
                tracing::warn!("{}; conversions will fail", e);
            }
            return configured
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(name));
        }
    };

    let info = ffbatch_av::check_tool(&path);
    match info.version {
        Some(ref version) => tracing::debug!("Using {} at {:?}: {}", info.name, path, version),
        None if required => tracing::warn!("{} at {:?} did not report a version", name, path),
        None => {}
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Container, ConversionType};
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.encoding.video_codec, "hevc");
        assert_eq!(config.encoding.container, Container::Mkv);
        assert_eq!(config.encoding.threads, 0);
        assert!(config.tools.ffmpeg_path.is_none());
    }

    #[test]
    fn test_load_config_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ffbatch.toml");
        std::fs::write(
            &path,
            r#"
[encoding]
container = "matroska"
threads = 4

[tools]
ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.encoding.container, Container::Mkv);
        assert_eq!(config.encoding.threads, 4);
        assert_eq!(config.encoding.video_codec, "hevc");
        assert_eq!(
            config.tools.ffmpeg_path,
            Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg"))
        );
    }

    #[test]
    fn test_load_config_rejects_empty_codec() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ffbatch.toml");
        std::fs::write(&path, "[encoding]\nvideo_codec = \"\"\n").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config(Path::new("/no/such/ffbatch.toml")).is_err());
    }

    #[test]
    fn test_validate_run_requires_input_dir() {
        let dir = tempdir().unwrap();
        let mut run = RunConfig {
            input_dir: dir.path().join("missing"),
            output_dir: dir.path().join("out"),
            pattern: "*.mp4".to_string(),
            simulate: false,
            conversion_type: ConversionType::Video,
            config: Config::default(),
        };
        assert!(validate_run(&run).is_err());

        run.input_dir = dir.path().to_path_buf();
        assert!(validate_run(&run).is_ok());
    }

    #[test]
    fn test_plan_settings_from_run() {
        let mut config = Config::default();
        config.encoding.container = Container::Mp4;
        let run = RunConfig {
            input_dir: PathBuf::from("/in"),
            output_dir: PathBuf::from("/out"),
            pattern: "*".to_string(),
            simulate: true,
            conversion_type: ConversionType::SubtitleOnly,
            config,
        };

        let settings = run.plan_settings();
        assert_eq!(settings.container, Container::Mp4);
        assert!(settings.simulate);
        assert_eq!(settings.video_codec, "hevc");
    }

    #[test]
    fn test_resolve_tool_falls_back_to_name() {
        let path = resolve_tool("nonexistent_tool_12345", None, false);
        assert_eq!(path, PathBuf::from("nonexistent_tool_12345"));
    }
}
