use crate::app::cli::Cli;
use crate::app::models::{RuntimeConfig, TextEncoding};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TARGETS: [&str; 4] = [
    "src/app/chat",
    "src/components",
    "src/context",
    "src/utils",
];
pub const DEFAULT_OUTPUT: &str = "backend.txt";

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct PresetConfig {
    targets: Option<Vec<String>>,
    output: Option<PathBuf>,
    encoding: Option<TextEncoding>,
}

fn presets_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home
        .join(".config")
        .join("dir_snapshot")
        .join("presets.toml"))
}

fn load_presets_file(config_path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(config_path)
        .context(format!("Failed to read config at {:?}", config_path))?;

    parse_presets(&content)
}

fn parse_presets(content: &str) -> Result<HashMap<String, PresetConfig>> {
    let parsed: PresetsFile = toml::from_str(content).context("Failed to parse presets.toml")?;
    Ok(parsed.presets)
}

fn merge_vecs(preset_vec: Option<Vec<String>>, cli_vec: Option<Vec<String>>) -> Vec<String> {
    let mut combined = preset_vec.unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    // Deduplicate while keeping order
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

/// Builds the runtime configuration from the CLI, the user's presets file and the built-in defaults.
pub fn resolve_config(cli: Cli, current_dir: PathBuf) -> Result<RuntimeConfig> {
    let presets = load_presets_file(&presets_path()?)?;
    Ok(resolve_with_presets(cli, current_dir, &presets))
}

fn resolve_with_presets(
    cli: Cli,
    current_dir: PathBuf,
    presets: &HashMap<String, PresetConfig>,
) -> RuntimeConfig {
    let base = cli.base.unwrap_or(current_dir);

    // Determine preset to use: CLI flag > folder name of the base > None
    let project_name = base.file_name().and_then(|n| n.to_str());
    let preset_key = cli.preset.as_deref().or(project_name);
    let preset = preset_key
        .and_then(|k| presets.get(k))
        .cloned()
        .unwrap_or_default();
    if let Some(key) = preset_key.filter(|k| presets.contains_key(*k)) {
        log::debug!("Using preset '{}'", key);
    }

    let mut targets = merge_vecs(preset.targets, cli.target);
    if targets.is_empty() {
        targets = DEFAULT_TARGETS.iter().map(|t| t.to_string()).collect();
    }

    RuntimeConfig {
        base,
        targets,
        output: cli
            .output
            .or(preset.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        encoding: cli.encoding.or(preset.encoding).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("dir_snapshot").chain(args.iter().copied()))
    }

    #[test]
    fn no_flags_reproduce_the_builtin_defaults() {
        let config = resolve_with_presets(cli(&[]), PathBuf::from("/proj"), &HashMap::new());

        assert_eq!(config.base, PathBuf::from("/proj"));
        assert_eq!(config.targets, DEFAULT_TARGETS);
        assert_eq!(config.output, PathBuf::from("backend.txt"));
        assert_eq!(config.encoding, TextEncoding::Utf8);
    }

    #[test]
    fn preset_is_picked_from_the_base_folder_name() {
        let presets = parse_presets(
            r#"
            [proj]
            targets = ["lib", "bin"]
            output = "proj.txt"
            encoding = "latin-1"
            "#,
        )
        .unwrap();

        let config = resolve_with_presets(
            cli(&["--target", "bin", "docs"]),
            PathBuf::from("/work/proj"),
            &presets,
        );

        assert_eq!(config.targets, vec!["lib", "bin", "docs"]);
        assert_eq!(config.output, PathBuf::from("proj.txt"));
        assert_eq!(config.encoding, TextEncoding::Latin1);
    }

    #[test]
    fn cli_flags_override_the_preset() {
        let presets = parse_presets("[other]\noutput = \"other.txt\"\n").unwrap();

        let config = resolve_with_presets(
            cli(&["--preset", "other", "--output", "mine.txt", "--encoding", "utf-8"]),
            PathBuf::from("/proj"),
            &presets,
        );

        assert_eq!(config.output, PathBuf::from("mine.txt"));
        assert_eq!(config.targets, DEFAULT_TARGETS);
    }

    #[test]
    fn malformed_presets_are_rejected() {
        assert!(parse_presets("[broken\ntargets = 1").is_err());
    }

    #[test]
    fn missing_presets_file_means_no_presets() {
        let dir = tempfile::tempdir().unwrap();
        let presets = load_presets_file(&dir.path().join("presets.toml")).unwrap();
        assert!(presets.is_empty());
    }
}
