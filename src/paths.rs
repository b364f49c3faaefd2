use std::path::PathBuf;

const BASE_DIR_ENV: &str = "COPY_GENERATOR_DIR";
const HISTORY_SLOT: &str = "copy-history";

pub fn base_dir() -> PathBuf {
    if let Ok(value) = std::env::var(BASE_DIR_ENV)
        && let Some(path) = normalize_dir(&value)
    {
        return path;
    }
    dirs::home_dir()
        .map(|home| home.join(".copy-generator"))
        .unwrap_or_else(|| PathBuf::from(".copy-generator"))
}

pub fn history_path() -> PathBuf {
    base_dir().join(format!("{}.json", HISTORY_SLOT))
}

fn normalize_dir(value: &str) -> Option<PathBuf> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(normalize_path(expand_tilde(trimmed)))
}

fn normalize_path(path: PathBuf) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        normalized.push(component.as_os_str());
    }
    normalized
}

fn expand_tilde(value: &str) -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        if value == "~" {
            return home;
        }
        if let Some(rest) = value.strip_prefix("~/") {
            return home.join(rest);
        }
    }
    PathBuf::from(value)
}
