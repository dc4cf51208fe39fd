//! Profile store: the persisted server URL, token and cached build number.
//!
//! The file is YAML with exactly the keys `build`, `token` and `url`. Only
//! `login` writes it (or refreshes its build); every other command loads it
//! before touching the network.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use url::Url;

use crate::error::CliError;

/// Environment variable overriding the profile location.
pub const CONFIG_ENV: &str = "FMESERVER_CLI_CONFIG";
/// File name used under the XDG / home configuration directory.
pub const CONFIG_FILE_NAME: &str = ".fmeflow-cli.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub url: String,
    pub token: String,
    pub build: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawProfile {
    url: Option<String>,
    token: Option<String>,
    build: Option<u32>,
}

/// On-disk field order is `build`, `token`, `url`.
#[derive(Serialize)]
struct StoredProfile<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    build: Option<u32>,
    token: &'a str,
    url: &'a str,
}

impl Profile {
    fn from_raw(raw: RawProfile) -> Result<Self, String> {
        let url = raw.url.ok_or_else(|| "missing `url`".to_string())?;
        let url = normalize_url(&url).map_err(|err| err.to_string())?;
        let token = raw
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| "missing `token`".to_string())?;
        Ok(Self {
            url,
            token,
            build: raw.build,
        })
    }
}

/// Validate a server URL and strip trailing slashes.
pub fn normalize_url(raw: &str) -> Result<String, CliError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
        .map_err(|err| CliError::usage(format!("invalid URL `{raw}`: {err}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(CliError::usage(format!(
            "invalid URL `{raw}`: scheme must be http or https, not `{other}`"
        ))),
    }
}

/// Resolve the profile path: flag, then `FMESERVER_CLI_CONFIG`, then
/// `$XDG_CONFIG_HOME`, then `$HOME/.config`.
pub fn resolve_path(
    flag: Option<&Path>,
    env: impl Fn(&str) -> Option<OsString>,
) -> Result<PathBuf, CliError> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    let non_empty = |key: &str| env(key).filter(|v| !v.is_empty());
    if let Some(path) = non_empty(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    if let Some(dir) = non_empty("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(dir).join(CONFIG_FILE_NAME));
    }
    if let Some(home) = non_empty("HOME") {
        return Ok(PathBuf::from(home).join(".config").join(CONFIG_FILE_NAME));
    }
    Err(CliError::usage(
        "cannot determine the configuration path; pass --config or set FMESERVER_CLI_CONFIG",
    ))
}

/// [`resolve_path`] against the process environment.
pub fn resolve_from_env(flag: Option<&Path>) -> Result<PathBuf, CliError> {
    resolve_path(flag, |key| std::env::var_os(key))
}

/// Load and validate the profile at `path`.
pub fn load(path: &Path) -> Result<Profile, CliError> {
    if !path.exists() {
        return Err(CliError::ConfigMissing {
            path: path.to_path_buf(),
        });
    }
    let malformed = |reason: String| CliError::ConfigMalformed {
        path: path.to_path_buf(),
        reason,
    };

    let raw: RawProfile = Config::builder()
        .add_source(File::from(path).format(FileFormat::Yaml).required(true))
        .build()
        .and_then(Config::try_deserialize)
        .map_err(|err| malformed(err.to_string()))?;

    let profile = Profile::from_raw(raw).map_err(malformed)?;
    debug!(path = %path.display(), build = ?profile.build, "profile loaded");
    Ok(profile)
}

/// Write the profile atomically with owner-only permissions.
pub fn save(path: &Path, profile: &Profile) -> Result<(), CliError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|err| CliError::io(dir, err))?;

    let yaml = serde_yaml::to_string(&StoredProfile {
        build: profile.build,
        token: &profile.token,
        url: &profile.url,
    })
    .map_err(|err| CliError::io(path, std::io::Error::other(err)))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|err| CliError::io(dir, err))?;
    tmp.write_all(yaml.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|err| CliError::io(tmp.path(), err))?;
    restrict_permissions(tmp.as_file()).map_err(|err| CliError::io(tmp.path(), err))?;
    tmp.persist(path)
        .map_err(|err| CliError::io(path, err.error))?;

    info!(path = %path.display(), "profile written");
    Ok(())
}

/// Rewrite only the cached build of the profile at `path`.
pub fn set_build(path: &Path, build: u32) -> Result<(), CliError> {
    let mut profile = load(path)?;
    if profile.build == Some(build) {
        return Ok(());
    }
    debug!(path = %path.display(), old = ?profile.build, new = build, "updating cached build");
    profile.build = Some(build);
    save(path, &profile)
}

#[cfg(unix)]
fn restrict_permissions(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}
