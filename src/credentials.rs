//! Zulip credentials ("zuliprc") loading.
//!
//! The file is INI style, as downloaded from the Zulip web UI:
//!
//! ```text
//! [api]
//! email=bot@example.zulipchat.com
//! key=abcdef123456
//! site=https://example.zulipchat.com
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ExportError, ExportResult};

const API_SECTION: &str = "api";

/// Login details for one Zulip account.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub key: String,
    /// Server base URL with scheme and without trailing slash.
    pub site: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("key", &"<redacted>")
            .field("site", &self.site)
            .finish()
    }
}

impl Credentials {
    /// Read credentials from a zuliprc file. A leading `~/` is expanded.
    pub fn load(path: &Path) -> ExportResult<Self> {
        let path = expand_home(path);
        let contents = fs::read_to_string(&path).map_err(|e| ExportError::Credentials {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Self::parse(&contents).map_err(|reason| ExportError::Credentials { path, reason })
    }

    /// Parse the contents of a zuliprc file.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let mut section = String::new();
        let mut email = None;
        let mut key = None;
        let mut site = None;

        for (lineno, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                section = name.trim().to_lowercase();
                continue;
            }
            let Some((name, value)) = split_entry(line) else {
                return Err(format!("line {}: expected key=value", lineno + 1));
            };
            if section != API_SECTION {
                continue;
            }
            match name.to_lowercase().as_str() {
                "email" => email = Some(value.to_string()),
                "key" => key = Some(value.to_string()),
                "site" => site = Some(value.to_string()),
                _ => {}
            }
        }

        let require = |value: Option<String>, name: &str| {
            value
                .filter(|v| !v.is_empty())
                .ok_or_else(|| format!("missing '{}' in [{}] section", name, API_SECTION))
        };

        Ok(Self {
            email: require(email, "email")?,
            key: require(key, "key")?,
            site: normalize_site(&require(site, "site")?),
        })
    }
}

/// Split `name=value` or `name: value`, whichever separator comes first.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let idx = line.find(['=', ':'])?;
    let (name, rest) = line.split_at(idx);
    Some((name.trim(), rest[1..].trim()))
}

fn normalize_site(site: &str) -> String {
    let site = site.trim_end_matches('/');
    if site.starts_with("http://") || site.starts_with("https://") {
        site.to_string()
    } else {
        format!("https://{}", site)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}
