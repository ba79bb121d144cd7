//! Prompt derivation from the operating identity and host name

use std::env;
use std::fs;

/// Identity shown in the prompt and window title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user: String,
    pub host: String,
}

impl Identity {
    pub fn new(user: impl Into<String>, host: &str) -> Self {
        Self {
            user: user.into(),
            host: short_host(host).to_string(),
        }
    }

    /// Detect user and host from the environment
    pub fn detect() -> Self {
        let user = first_env(&["USER", "USERNAME", "LOGNAME"]).unwrap_or_else(|| "user".to_string());
        let host = first_env(&["HOSTNAME", "COMPUTERNAME"])
            .or_else(|| {
                fs::read_to_string("/etc/hostname")
                    .ok()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or_else(|| "localhost".to_string());
        Self::new(user, &host)
    }

    /// `user@host $ `
    pub fn prompt(&self) -> String {
        format!("{}@{} $ ", self.user, self.host)
    }

    /// `user@host`
    pub fn label(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }
}

/// Strip a `.local` domain, keeping the first label
fn short_host(host: &str) -> &str {
    if host.ends_with(".local") {
        host.split('.').next().unwrap_or(host)
    } else {
        host
    }
}

fn first_env(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_format() {
        let id = Identity::new("alice", "box");
        assert_eq!(id.prompt(), "alice@box $ ");
        assert_eq!(id.label(), "alice@box");
    }

    #[test]
    fn test_local_suffix_stripped() {
        assert_eq!(Identity::new("a", "macbook.local").host, "macbook");
        assert_eq!(Identity::new("a", "mac.home.local").host, "mac");
        assert_eq!(Identity::new("a", "srv.example.com").host, "srv.example.com");
    }

    #[test]
    fn test_detect_is_never_empty() {
        let id = Identity::detect();
        assert!(!id.user.is_empty());
        assert!(!id.host.is_empty());
    }
}
