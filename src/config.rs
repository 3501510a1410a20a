use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub base_url: String,
    pub max_body_size: usize,
    pub log_level: String,
    pub default_from_email: String,
    pub quote_to_email: Option<String>,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub tls: TlsMode,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TlsMode {
    StartTls,
    Tls,
    None,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the config from a variable lookup, e.g. a fixed map in tests.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let env_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());
        let env_optional = |key: &str| var(key).filter(|v| !v.trim().is_empty());
        let env_required = |key: &str| {
            env_optional(key).ok_or_else(|| format!("Missing required environment variable: {key}"))
        };

        let host: IpAddr = env_or("BRISBANE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid BRISBANE_HOST: {e}"))?;

        let port: u16 = env_or("BRISBANE_PORT", "8000")
            .parse()
            .map_err(|e| format!("Invalid BRISBANE_PORT: {e}"))?;

        let base_url = env_or("BRISBANE_BASE_URL", &format!("http://{host}:{port}"))
            .trim_end_matches('/')
            .to_string();

        let max_body_size: usize = env_or("BRISBANE_MAX_BODY_SIZE", "67108864")
            .parse()
            .map_err(|e| format!("Invalid BRISBANE_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("BRISBANE_LOG_LEVEL", "info");

        let default_from_email = env_required("DEFAULT_FROM_EMAIL")?;
        let quote_to_email = env_optional("QUOTE_TO_EMAIL");

        let smtp = match env_optional("BRISBANE_SMTP_HOST") {
            Some(host) => {
                let tls = match env_or("BRISBANE_SMTP_TLS", "starttls").as_str() {
                    "starttls" => TlsMode::StartTls,
                    "tls" => TlsMode::Tls,
                    "none" => TlsMode::None,
                    other => return Err(format!("Invalid BRISBANE_SMTP_TLS: {other}")),
                };

                Some(SmtpConfig {
                    host,
                    port: env_or("BRISBANE_SMTP_PORT", "587")
                        .parse()
                        .map_err(|e| format!("Invalid BRISBANE_SMTP_PORT: {e}"))?,
                    user: env_optional("BRISBANE_SMTP_USER"),
                    pass: env_optional("BRISBANE_SMTP_PASS"),
                    tls,
                })
            }
            None => None,
        };

        Ok(Config {
            host,
            port,
            base_url,
            max_body_size,
            log_level,
            default_from_email,
            quote_to_email,
            smtp,
        })
    }

    /// Address quote requests are delivered to. Falls back to the sender address.
    pub fn quote_recipient(&self) -> &str {
        self.quote_to_email
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(self.default_from_email.as_str())
    }
}
