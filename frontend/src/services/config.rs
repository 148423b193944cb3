const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_USER_ID: &str = "default-user";

/// Client settings baked in at build time and read once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub user_id: String,
}

impl ClientConfig {
    /// Resolve from `EXPENSE_API_BASE_URL` and `EXPENSE_USER_ID` as set when the bundle was built
    pub fn from_env() -> Self {
        Self::from_values(option_env!("EXPENSE_API_BASE_URL"), option_env!("EXPENSE_USER_ID"))
    }

    fn from_values(api_base_url: Option<&str>, user_id: Option<&str>) -> Self {
        let pick = |value: Option<&str>, default: &str| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };

        Self {
            api_base_url: pick(api_base_url, DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            user_id: pick(user_id, DEFAULT_USER_ID),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.user_id, "default-user");
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = ClientConfig::from_values(Some("https://api.example.com/"), Some("u1"));
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.user_id, "u1");
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = ClientConfig::from_values(Some("  "), Some(""));
        assert_eq!(config, ClientConfig::default());
    }
}
