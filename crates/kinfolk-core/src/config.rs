use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::Path;

use crate::kinship::Locale;

/// Project-level settings read from `.kinfolk/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub kinship: KinshipConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Bounds and vocabulary for kinship title resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KinshipConfig {
    /// Longest relational path (in edges) the resolver will search.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Paths at least this long that match no pattern read as distant kin.
    #[serde(default = "default_distant_after")]
    pub distant_after: usize,
    #[serde(default)]
    pub locale: Locale,
}

impl Default for KinshipConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            distant_after: default_distant_after(),
            locale: Locale::default(),
        }
    }
}

impl KinshipConfig {
    /// Same bounds with a different vocabulary.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

/// Geometry and weighting used when building layout graphs.
///
/// All lengths are in the renderer's pixel units. Person nodes inside a
/// marriage group sit in fixed-width slots; union anchors are square.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_slot_width")]
    pub slot_width: f64,
    #[serde(default = "default_member_width")]
    pub member_width: f64,
    #[serde(default = "default_anchor_width")]
    pub anchor_width: f64,
    #[serde(default = "default_group_height")]
    pub group_height: f64,
    /// Top offset of person nodes inside a group.
    #[serde(default = "default_member_top")]
    pub member_top: f64,
    /// Top offset of union anchors inside a group, level with the person
    /// nodes' side handles.
    #[serde(default = "default_anchor_top")]
    pub anchor_top: f64,
    #[serde(default = "default_group_padding")]
    pub group_padding: f64,
    /// Size of an ungrouped person node.
    #[serde(default = "default_node_size")]
    pub node_width: f64,
    #[serde(default = "default_node_size")]
    pub node_height: f64,
    #[serde(default = "default_lineage_weight")]
    pub lineage_weight: u32,
    #[serde(default = "default_spouse_weight")]
    pub spouse_weight: u32,
    #[serde(default = "default_node_sep")]
    pub node_sep: f64,
    #[serde(default = "default_rank_sep")]
    pub rank_sep: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            slot_width: default_slot_width(),
            member_width: default_member_width(),
            anchor_width: default_anchor_width(),
            group_height: default_group_height(),
            member_top: default_member_top(),
            anchor_top: default_anchor_top(),
            group_padding: default_group_padding(),
            node_width: default_node_size(),
            node_height: default_node_size(),
            lineage_weight: default_lineage_weight(),
            spouse_weight: default_spouse_weight(),
            node_sep: default_node_sep(),
            rank_sep: default_rank_sep(),
        }
    }
}

/// Per-user preferences read from the platform config directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

/// Project and user settings merged with environment overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
}

/// Load `.kinfolk/config.toml` under `project_root`, or defaults if absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".kinfolk/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    parse_project_config(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Parse project config TOML.
///
/// # Errors
///
/// Returns an error on TOML syntax or type errors.
pub fn parse_project_config(content: &str) -> Result<ProjectConfig> {
    Ok(toml::from_str(content)?)
}

/// Load the user config from `<config_dir>/kinfolk/config.toml`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("kinfolk/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Merge project config, user config, and the `FORMAT` environment variable.
///
/// `cli_format` is the explicit `--format`/`--json` choice, if any.
///
/// # Errors
///
/// Returns an error if either config file is malformed.
pub fn resolve_config(project_root: &Path, cli_format: Option<&str>) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(
        cli_format,
        user.output.as_deref(),
        env_format.as_deref(),
        std::io::stdout().is_terminal(),
    );

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
    })
}

/// Output-mode precedence: CLI flag, `FORMAT` env, user config, TTY default.
fn resolve_output(
    cli_format: Option<&str>,
    user_output: Option<&str>,
    env_format: Option<&str>,
    is_tty: bool,
) -> String {
    fn normalize_output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" | "human" => Some("pretty"),
            "text" | "table" => Some("text"),
            "json" => Some("json"),
            _ => None,
        }
    }

    let chosen = cli_format
        .and_then(normalize_output_mode)
        .or_else(|| env_format.and_then(normalize_output_mode))
        .or_else(|| user_output.and_then(normalize_output_mode));

    match chosen {
        Some(mode) => mode.to_string(),
        None if is_tty => "pretty".to_string(),
        None => "text".to_string(),
    }
}

const fn default_max_depth() -> usize {
    8
}

const fn default_distant_after() -> usize {
    6
}

const fn default_slot_width() -> f64 {
    180.0
}

const fn default_member_width() -> f64 {
    120.0
}

const fn default_anchor_width() -> f64 {
    32.0
}

const fn default_group_height() -> f64 {
    250.0
}

const fn default_member_top() -> f64 {
    50.0
}

const fn default_anchor_top() -> f64 {
    74.0
}

const fn default_group_padding() -> f64 {
    20.0
}

const fn default_node_size() -> f64 {
    220.0
}

const fn default_lineage_weight() -> u32 {
    20
}

const fn default_spouse_weight() -> u32 {
    5
}

const fn default_node_sep() -> f64 {
    80.0
}

const fn default_rank_sep() -> f64 {
    100.0
}
