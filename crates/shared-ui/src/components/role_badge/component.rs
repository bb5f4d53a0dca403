use dioxus::prelude::*;
use shared_types::Role;

use crate::components::{Badge, BadgeVariant};

fn variant_for(role: Role) -> BadgeVariant {
    match role {
        Role::Admin => BadgeVariant::Primary,
        Role::Billing => BadgeVariant::Warning,
        Role::Tailor => BadgeVariant::Success,
    }
}

/// Role name shown next to the signed-in user.
#[component]
pub fn RoleBadge(role: Role) -> Element {
    rsx! {
        Badge { variant: variant_for(role), "{role.display_name()}" }
    }
}
