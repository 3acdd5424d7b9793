//! Application configuration management.
//!
//! Configuration is loaded exactly once at process start and injected into
//! every component as an immutable value. No component reads the environment
//! or a secret store directly.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Authentication configuration.
    pub auth: AuthConfig,
    /// Static user accounts (username, password hash, role, display name).
    #[serde(default)]
    pub users: Vec<UserAccount>,
    /// Mobile carrier names offered by entry forms. Informational only.
    #[serde(default = "default_operators")]
    pub operators: Vec<String>,
    /// Outbound notification configuration.
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// The default carrier list offered by entry forms.
#[must_use]
pub fn default_operators() -> Vec<String> {
    ["Vivo", "Claro", "TIM", "Oi", "Algar", "Nextel", "Sercomtel", "Other"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL (a SQLite file path, e.g.
    /// `sqlite://offertory.db?mode=rwc`).
    pub url: String,
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret key for signing session tokens.
    pub jwt_secret: String,
    /// Session token expiry in seconds.
    #[serde(default = "default_session_expiry")]
    pub session_expiry_secs: u64,
}

fn default_session_expiry() -> u64 {
    43200 // 12 hours
}

/// A static user account.
///
/// Accounts are defined at configuration time and are immutable at runtime.
/// `password_hash` is optional because a deployment may fail to provision the
/// secret; such accounts exist but can never authenticate.
#[derive(Debug, Clone, Deserialize)]
pub struct UserAccount {
    /// Unique login name.
    pub username: String,
    /// Argon2id hash in PHC string format, from the secret store.
    #[serde(default)]
    pub password_hash: Option<String>,
    /// Role name (`viewer`, `editor`, or `admin`).
    pub role: String,
    /// Human-readable name shown in the UI.
    pub display_name: String,
}

/// Outbound notification configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationConfig {
    /// Master switch for all outbound notifications.
    #[serde(default)]
    pub enabled: bool,
    /// Whether receipt emails are sent after entry creation.
    #[serde(default)]
    pub email_enabled: bool,
    /// Whether receipt messages (WhatsApp/SMS) are sent after entry creation.
    #[serde(default)]
    pub sms_enabled: bool,
    /// SMTP transport configuration.
    #[serde(default)]
    pub email: EmailConfig,
    /// Twilio messaging configuration.
    #[serde(default)]
    pub messaging: MessagingConfig,
}

/// SMTP email configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// SMTP server host.
    pub smtp_host: String,
    /// SMTP server port.
    pub smtp_port: u16,
    /// SMTP username.
    pub smtp_username: String,
    /// SMTP password.
    pub smtp_password: String,
    /// Sender display name.
    pub from_name: String,
    /// Sender email address.
    pub from_email: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_name: "Offertory".to_string(),
            from_email: "no-reply@localhost".to_string(),
        }
    }
}

/// Twilio messaging configuration (SMS and WhatsApp).
#[derive(Debug, Clone, Deserialize)]
pub struct MessagingConfig {
    /// Twilio account SID.
    pub account_sid: String,
    /// Twilio auth token.
    pub auth_token: String,
    /// Sender number for SMS, in E.164 format.
    pub from_number: String,
    /// Sender number for WhatsApp, in `whatsapp:+...` format. Empty disables
    /// the WhatsApp channel and falls back to SMS.
    #[serde(default)]
    pub whatsapp_from: String,
    /// Country calling code prepended to national numbers.
    #[serde(default = "default_country_code")]
    pub country_code: String,
    /// Twilio API base URL (overridable for tests).
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_country_code() -> String {
    "55".to_string()
}

fn default_api_base() -> String {
    "https://api.twilio.com".to_string()
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            whatsapp_from: String::new(),
            country_code: default_country_code(),
            api_base: default_api_base(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("OFFERTORY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
