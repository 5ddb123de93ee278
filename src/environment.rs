use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents the different deployment environments the dashboard client can talk to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Production dashboard API.
    #[default]
    Production,
    /// Staging environment for pre-production testing.
    Staging,
    /// Self-hosted or local API, mainly for development.
    Custom { api_url: String },
}

impl Environment {
    /// Returns the dashboard API base URL associated with the environment.
    pub fn api_url(&self) -> String {
        match self {
            Environment::Production => "https://api.sandboxcloud.io".to_string(),
            Environment::Staging => "https://staging.api.sandboxcloud.io".to_string(),
            Environment::Custom { api_url } => api_url.clone(),
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "staging" => Ok(Environment::Staging),
            url if url.starts_with("http://") || url.starts_with("https://") => {
                Ok(Environment::Custom {
                    api_url: url.to_string(),
                })
            }
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "Production"),
            Environment::Staging => write!(f, "Staging"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_url())
    }
}
