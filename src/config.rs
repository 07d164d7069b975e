//! Runtime settings read from the environment once at startup.
//!
//! | Variable     | Default                    |
//! |--------------|----------------------------|
//! | `HOST`       | `0.0.0.0`                  |
//! | `PORT`       | `8080`                     |
//! | `DATA_DIR`   | `data` (local cache)       |
//! | `STORE_PATH` | `$DATA_DIR/matches.json`   |
//! | `STATIC_DIR` | `static`                   |

use std::path::PathBuf;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub store_path: PathBuf,
    pub static_dir: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

impl Default for Settings {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            host: default_host(),
            port: default_port(),
            store_path: data_dir.join("matches.json"),
            data_dir,
            static_dir: default_static_dir(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unset, empty or unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let data_dir = get("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        Self {
            host: get("HOST").unwrap_or_else(default_host),
            port: get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(default_port),
            store_path: get("STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join("matches.json")),
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_static_dir),
            data_dir,
        }
    }

    /// Directory of the local fallback cache.
    pub fn cache_dir(&self) -> PathBuf {
        self.data_dir.join("cache")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_nothing_set() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.store_path, PathBuf::from("data/matches.json"));
    }

    #[test]
    fn store_path_follows_data_dir() {
        let env: HashMap<&str, &str> = [("DATA_DIR", "/srv/padel"), ("PORT", "9000")].into();
        let settings = Settings::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.store_path, PathBuf::from("/srv/padel/matches.json"));
        assert_eq!(settings.cache_dir(), PathBuf::from("/srv/padel/cache"));
    }

    #[test]
    fn bad_port_falls_back() {
        let settings = Settings::from_lookup(|k| (k == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(settings.port, 8080);
    }
}
