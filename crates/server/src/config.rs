use shared_types::{AppConfig, FeatureFlags};
use std::sync::OnceLock;

static FLAGS: OnceLock<FeatureFlags> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Parse the contents of `config.toml`. Unparseable input yields all flags off.
pub fn parse_feature_flags(contents: &str) -> FeatureFlags {
    match toml::from_str::<AppConfig>(contents) {
        Ok(config) => config.features,
        Err(e) => {
            tracing::warn!(path = CONFIG_PATH, error = %e, "Failed to parse config, defaulting all flags off");
            FeatureFlags::default()
        }
    }
}

/// Read `config.toml`, parse feature flags, and store them in the global
/// `OnceLock`. Only the first call has effect.
///
/// If the file is missing or unparseable, all flags default to `false`.
pub fn load_feature_flags() {
    FLAGS.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => {
            let flags = parse_feature_flags(&contents);
            eprintln!("[config] Feature flags: {flags:?}");
            flags
        }
        Err(e) => {
            eprintln!("[config] {CONFIG_PATH} not found ({e}), defaulting all flags off");
            FeatureFlags::default()
        }
    });
}

/// Loaded feature flags, or all-false defaults before `load_feature_flags()`.
pub fn feature_flags() -> &'static FeatureFlags {
    static DEFAULT: FeatureFlags = FeatureFlags {
        telemetry: false,
        demo_accounts: false,
    };
    FLAGS.get().unwrap_or(&DEFAULT)
}

/// Environment problems that must stop the process before it serves requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    MissingJwtSecret,
    WeakJwtSecret { len: usize },
}

impl std::fmt::Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvError::MissingJwtSecret => write!(f, "JWT_SECRET must be set"),
            EnvError::WeakJwtSecret { len } => {
                write!(f, "JWT_SECRET must be at least {MIN_SECRET_LEN} bytes (got {len})")
            }
        }
    }
}

impl std::error::Error for EnvError {}

const MIN_SECRET_LEN: usize = 16;

/// Check a candidate `JWT_SECRET` value.
pub fn check_jwt_secret(secret: Option<&str>) -> Result<(), EnvError> {
    match secret {
        None | Some("") => Err(EnvError::MissingJwtSecret),
        Some(s) if s.len() < MIN_SECRET_LEN => Err(EnvError::WeakJwtSecret { len: s.len() }),
        Some(_) => Ok(()),
    }
}

/// Validate the process environment. Loads `.env` first when present.
pub fn validate_env() -> Result<(), EnvError> {
    let _ = dotenvy::dotenv();
    check_jwt_secret(std::env::var("JWT_SECRET").ok().as_deref())
}
