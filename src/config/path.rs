//! Module for searching for inputfuse config files

use std::path::PathBuf;

/// Name of the config file in the working directory
const LOCAL_CONFIG_FILE: &str = "./inputfuse.yaml";
/// System wide config file
const SYSTEM_CONFIG_FILE: &str = "/etc/inputfuse/config.yaml";

/// Returns the user config file path (e.g. "~/.config/inputfuse/config.yaml")
pub fn get_user_config_path() -> Option<PathBuf> {
    let Ok(base_dirs) = xdg::BaseDirectories::with_prefix("inputfuse") else {
        log::warn!("Unable to determine user config path.");
        return None;
    };
    Some(base_dirs.get_config_home().join("config.yaml"))
}

/// Returns a list of config file paths in load order.
/// E.g. ["./inputfuse.yaml", "~/.config/inputfuse/config.yaml", "/etc/inputfuse/config.yaml"]
pub fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(path) = get_user_config_path() {
        paths.push(path);
    }
    paths.push(PathBuf::from(SYSTEM_CONFIG_FILE));

    paths
}

/// Returns the first config file that exists
pub fn find_config_file() -> Option<PathBuf> {
    get_config_paths().into_iter().find(|path| {
        log::trace!("Checking for config file: {path:?}");
        path.is_file()
    })
}
