//! Demo page hosting the rendered header

use leptos::prelude::*;

/// Module script that loads the wasm client from `/pkg`
const BOOTSTRAP: &str =
    "import init, { hydrate } from '/pkg/ionsnav_web.js';\ninit().then(() => hydrate());";

pub struct DemoPage {
    pub brand: String,
    /// Already rendered (and escaped) header markup
    pub header: String,
    /// Store health, shown under the header
    pub status: &'static str,
    pub live_reload: bool,
}

impl DemoPage {
    pub fn render(self) -> String {
        let DemoPage {
            brand,
            header,
            status,
            live_reload,
        } = self;
        let live = if live_reload { "true" } else { "false" };
        let title = brand.clone();

        view! {
            <!DOCTYPE html>
            <html lang="en">
                <head>
                    <meta charset="utf-8"/>
                    <meta name="viewport" content="width=device-width, initial-scale=1"/>
                    <title>{title}</title>
                </head>
                <body data-ionsnav-live=live>
                    <div id="ionsnav-mount" inner_html=header></div>
                    <main class="ionsnav-demo">
                        <h1>{brand}</h1>
                        <p class="ionsnav-demo-status">{status}</p>
                    </main>
                    <script type="module" inner_html=BOOTSTRAP></script>
                </body>
            </html>
        }
        .to_html()
    }
}
