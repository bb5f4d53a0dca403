use serde::{Deserialize, Serialize};

/// Optional behaviour toggled from `config.toml`.
///
/// Every flag defaults to `false`, so a missing or partial file turns
/// everything optional off.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FeatureFlags {
    /// Export traces and logs over OTLP.
    #[serde(default)]
    pub telemetry: bool,
    /// Seed the `admin`, `billing` and `tailor` demo accounts and show
    /// their credentials on the sign-in page.
    #[serde(default)]
    pub demo_accounts: bool,
}

/// Shape of `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
}
