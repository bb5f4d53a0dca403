use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdBarChart3, LdHome, LdReceipt, LdScissors, LdUsers};
use dioxus_free_icons::Icon;
use shared_types::IconRef;

/// Concrete glyph for a navigation icon reference.
#[component]
pub fn NavIcon(icon: IconRef, #[props(default = 20)] size: u32) -> Element {
    match icon {
        IconRef::Home => rsx! {
            Icon::<LdHome> { icon: LdHome, width: size, height: size }
        },
        IconRef::Users => rsx! {
            Icon::<LdUsers> { icon: LdUsers, width: size, height: size }
        },
        IconRef::Receipt => rsx! {
            Icon::<LdReceipt> { icon: LdReceipt, width: size, height: size }
        },
        IconRef::Scissors => rsx! {
            Icon::<LdScissors> { icon: LdScissors, width: size, height: size }
        },
        IconRef::BarChart => rsx! {
            Icon::<LdBarChart3> { icon: LdBarChart3, width: size, height: size }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(app: fn() -> Element) -> String {
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    #[test]
    fn home_uses_the_house_glyph() {
        fn nav() -> Element {
            rsx! { NavIcon { icon: IconRef::Home } }
        }
        fn glyph() -> Element {
            rsx! { Icon::<LdHome> { icon: LdHome, width: 20, height: 20 } }
        }
        assert_eq!(render(nav), render(glyph));
    }

    #[test]
    fn reports_use_the_column_chart_glyph() {
        fn nav() -> Element {
            rsx! { NavIcon { icon: IconRef::BarChart, size: 24 } }
        }
        fn glyph() -> Element {
            rsx! { Icon::<LdBarChart3> { icon: LdBarChart3, width: 24, height: 24 } }
        }
        assert_eq!(render(nav), render(glyph));
    }
}
