use dioxus::prelude::*;
use granthika::components::App as GranthikaApp;

const MAIN_CSS: Asset = asset!("/assets/granthika.css");

fn main() {
    // Cross-platform logger (web console + desktop stdout). DEBUG for
    // development builds, WARN for release so production stays quiet.
    #[cfg(debug_assertions)]
    dioxus::logger::init(dioxus::logger::tracing::Level::DEBUG).expect("logger failed to init");
    #[cfg(not(debug_assertions))]
    dioxus::logger::init(dioxus::logger::tracing::Level::WARN).expect("logger failed to init");

    #[cfg(feature = "desktop")]
    {
        use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

        let config = Config::default().with_window(
            WindowBuilder::new()
                .with_title("Granthika")
                .with_resizable(true)
                .with_inner_size(LogicalSize::new(1240.0, 900.0))
                .with_min_inner_size(LogicalSize::new(860.0, 600.0)),
        );

        dioxus::LaunchBuilder::desktop().with_cfg(config).launch(App);
    }

    #[cfg(all(feature = "web", not(feature = "desktop")))]
    {
        dioxus::launch(App);
    }
}

#[component]
fn App() -> Element {
    rsx! {
        // asset! resolution is unreliable in the desktop webview; inline
        // the stylesheet there and link it on web.
        if cfg!(target_arch = "wasm32") {
            document::Stylesheet { href: MAIN_CSS }
        } else {
            style { {include_str!("../assets/granthika.css")} }
        }

        body { class: "gk-body",
            GranthikaApp {}
        }
    }
}
