use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Name of the optional per-project configuration document.
pub const CONFIG_FILE_NAME: &str = "textify.config.json";

/// Effective configuration: compiled-in defaults overridden key by key
/// by the on-disk document. Immutable once built.
#[derive(Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub include_extensions: Vec<String>,
    pub exclude_extensions: Vec<String>,
    pub include_dirs: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub max_files_warning: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include_extensions: strings(&[".ts", ".tsx", ".js", ".jsx"]),
            exclude_extensions: strings(&[".log", ".md"]),
            include_dirs: strings(&["."]),
            exclude_dirs: strings(&["node_modules", ".git", "dist", "build"]),
            max_files_warning: 100,
        }
    }
}

impl Config {
    /// Reads `textify.config.json` from the root. A missing or malformed
    /// file is not an error, the defaults apply instead.
    pub fn load(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE_NAME);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => {
                log::info!("Config file not found, using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                log::info!("Config file is not valid JSON ({}), using defaults", err);
                Self::default()
            }
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
