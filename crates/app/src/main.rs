use dioxus::prelude::*;
use shared_types::{AuthUser, FeatureFlags, SiteMetadata};

mod auth;
mod format_helpers;
mod guard;
mod routes;

use auth::AuthState;
use routes::Route;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        shared_types::validate_static_tables()?;
        server::config::load_feature_flags();
        server::config::validate_env()?;
        let flags = server::config::feature_flags();

        if flags.telemetry {
            server::telemetry::init_telemetry()?;
        }
        server::health::record_start_time();

        let state = server::state::shared_state().clone();
        let mut router =
            dioxus::server::router(App).merge(server::openapi::api_router(state.clone()));

        if flags.telemetry {
            router = router.layer(server::telemetry::OtelTraceLayer);
        }

        let router = router
            .layer(axum::middleware::from_fn_with_state(
                state,
                server::auth::middleware::auth_middleware,
            ))
            .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
            .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
                tower_http::request_id::MakeRequestUuid,
            ));
        Ok(router)
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

/// Detect the client platform from compile-time feature flags.
pub fn client_platform() -> &'static str {
    if cfg!(feature = "web") {
        "web"
    } else if cfg!(feature = "desktop") {
        "desktop"
    } else if cfg!(feature = "mobile") {
        "mobile"
    } else {
        "unknown"
    }
}

#[component]
fn App() -> Element {
    // Set the X-Client-Platform header on all server function calls
    use_hook(|| {
        use dioxus::fullstack::{set_request_headers, HeaderMap, HeaderValue};

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-client-platform",
            HeaderValue::from_static(client_platform()),
        );
        set_request_headers(headers);
    });

    let flags_resource =
        use_server_future(move || async move { server::api::get_feature_flags().await })?;
    let session =
        use_server_future(move || async move { server::api::get_current_user().await })?;

    let flags = flags_resource
        .read()
        .as_ref()
        .cloned()
        .unwrap_or(Ok(FeatureFlags::default()))
        .unwrap_or_default();
    use_context_provider(|| flags);

    // A failed session lookup counts as signed out.
    let user: Option<AuthUser> = session.read().as_ref().cloned().and_then(Result::ok).flatten();
    use_context_provider(move || AuthState::new(user));

    rsx! {
        document::Title { "{SiteMetadata::TITLE}" }
        for (name, content) in SiteMetadata::meta_tags() {
            document::Meta { name: name.to_string(), content: content.to_string() }
        }
        document::Link { rel: "manifest", href: SiteMetadata::MANIFEST }
        document::Link { rel: "preconnect", href: "https://fonts.googleapis.com" }
        document::Link { rel: "stylesheet", href: SiteMetadata::FONT_STYLESHEET }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        SuspenseBoundary {
            fallback: |_| rsx! {
                div { class: "page-loading",
                    p { "Loading..." }
                }
            },
            Router::<Route> {}
        }
    }
}
