use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

pub const NO_TITLE: &str = "🚧 제목 고민중... 🚧";
pub const NO_DATE: &str = "🗓️ 날짜 없음";
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

pub const CFG_FILE_NAME: &str = "brewlog.toml";

const BASE_URL_ENV: &str = "BREWLOG_BASE_URL";
const ANALYTICS_ID_ENV: &str = "BREWLOG_ANALYTICS_ID";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Paths {
    pub content_dir: PathBuf,
    pub index_file: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            content_dir: PathBuf::from("data/posts/blog"),
            index_file: PathBuf::from("data/posts.json"),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Defaults {
    pub description_max_chars: usize,
    pub no_title: String,
    pub no_date: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            description_max_chars: DESCRIPTION_MAX_CHARS,
            no_title: NO_TITLE.to_string(),
            no_date: NO_DATE.to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SiteSection {
    pub base_url: String,
    pub analytics_id: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub site: SiteSection,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if path.starts_with("${exe_dir}") {
        let cur_exe = env::current_exe()?;
        let exe_dir = cur_exe.parent()
            .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Executable has no parent directory"))?;
        let rest = path.strip_prefix("${exe_dir}").unwrap_or(&path);
        Ok(exe_dir.join(rest))
    } else {
        Ok(path)
    }
}

/// Applies environment overrides for the site section. This is the only place
/// where the process environment is consulted.
fn apply_env(site: &mut SiteSection) {
    if let Ok(base_url) = env::var(BASE_URL_ENV) {
        site.base_url = base_url;
    }
    if let Ok(analytics_id) = env::var(ANALYTICS_ID_ENV) {
        site.analytics_id = if analytics_id.is_empty() { None } else { Some(analytics_id) };
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        content_dir: parse_path(cfg.paths.content_dir)?,
        index_file: parse_path(cfg.paths.index_file)?,
    };

    if let Some(ref mut log) = cfg.log {
        if let Some(location) = log.location.take() {
            log.location = Some(parse_path(location)?);
        }
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    let mut cfg = parse_config(&cfg_content)?;
    apply_env(&mut cfg.site);
    Ok(cfg)
}

/// Configuration used when no configuration file could be found.
pub fn default_config() -> Config {
    let mut cfg = Config::default();
    apply_env(&mut cfg.site);
    cfg
}

fn find_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf));
    let cur_dir = env::current_dir().ok();
    let cfg_dir = dirs::config_dir();

    [exe_dir, cur_dir, cfg_dir].into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

/// Opens the given configuration file, or looks for `brewlog.toml` next to the
/// executable, in the current directory and in the user config directory.
/// Built-in defaults are used when no file is found.
pub fn open_config(cfg_path: Option<PathBuf>) -> io::Result<Config> {
    let mut config = match cfg_path.or_else(find_config_path) {
        Some(config_path) => {
            eprintln!("Reading config from {}", config_path.display());
            read_config(&config_path)?
        }
        None => {
            eprintln!("No {} found, using defaults", CFG_FILE_NAME);
            default_config()
        }
    };

    if let Some(ref mut log) = config.log {
        if log.location.is_none() {
            log.location = dirs::cache_dir().map(|dir| dir.join("Brewlog").join("log").join("brewlog.log"));
        }
        match log.location {
            Some(ref location) => eprintln!("Log enabled. Files will be written in {}", location.display()),
            None => eprintln!("Log enabled. No cache directory, logging to console"),
        }
    }

    Ok(config)
}
