use dioxus::prelude::*;

/// Edge the sheet slides in from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SheetSide {
    #[default]
    Left,
    Right,
}

impl SheetSide {
    fn class(&self) -> &'static str {
        match self {
            SheetSide::Left => "left",
            SheetSide::Right => "right",
        }
    }
}

/// Slide-out panel over a dimmed backdrop. Clicking the backdrop closes it;
/// clicks inside the panel do not.
#[component]
pub fn Sheet(
    open: bool,
    on_close: EventHandler<()>,
    #[props(default)] side: SheetSide,
    children: Element,
) -> Element {
    if !open {
        return rsx! {};
    }

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "sheet-overlay",
            onclick: move |_| on_close.call(()),
            aside {
                class: "sheet-panel",
                "data-side": side.class(),
                role: "dialog",
                onclick: move |evt| evt.stop_propagation(),
                {children}
            }
        }
    }
}
