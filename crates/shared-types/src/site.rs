/// Document-level metadata applied by the root layout.
pub struct SiteMetadata;

impl SiteMetadata {
    pub const BRAND: &'static str = "STAR TAILORS";
    pub const TITLE: &'static str = "STAR TAILORS - Business Management System";
    pub const DESCRIPTION: &'static str = "Complete tailoring business management system with customer management, billing, and tailor coordination";
    pub const THEME_COLOR: &'static str = "#7c3aed";
    pub const MANIFEST: &'static str = "/manifest.json";
    pub const VIEWPORT: &'static str =
        "width=device-width, initial-scale=1, maximum-scale=1, user-scalable=no";
    pub const APPLE_STATUS_BAR_STYLE: &'static str = "default";
    pub const FONT_STYLESHEET: &'static str =
        "https://fonts.googleapis.com/css2?family=DM+Sans:wght@400;500;600;700&display=swap";

    /// `(name, content)` pairs for the `<meta>` tags of every page.
    pub fn meta_tags() -> [(&'static str, &'static str); 7] {
        [
            ("description", Self::DESCRIPTION),
            ("theme-color", Self::THEME_COLOR),
            ("viewport", Self::VIEWPORT),
            ("apple-mobile-web-app-capable", "yes"),
            ("apple-mobile-web-app-status-bar-style", Self::APPLE_STATUS_BAR_STYLE),
            ("apple-mobile-web-app-title", Self::BRAND),
            ("mobile-web-app-capable", "yes"),
        ]
    }
}
