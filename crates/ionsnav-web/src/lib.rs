//! ionsnav-web - Web surface for ionsnav
//!
//! Two halves behind cargo features:
//! - `ssr`: Axum router serving the rendered header, its assets, a demo
//!   page and live-reload events
//! - `hydrate`: wasm client that binds the disclosure controller to the
//!   server-rendered markup

#![recursion_limit = "256"]

#[cfg(feature = "hydrate")]
pub mod client;
#[cfg(feature = "ssr")]
pub mod page;
#[cfg(feature = "ssr")]
pub mod router;
#[cfg(feature = "ssr")]
pub mod sse;

#[cfg(feature = "ssr")]
pub use router::{create_router, ServeOptions};

/// Body attribute of the demo page telling the client to follow
/// `/api/events`
pub const LIVE_RELOAD_ATTR: &str = "data-ionsnav-live";

#[cfg(feature = "ssr")]
mod server {
    use crate::router::{create_router, ServeOptions};
    use anyhow::{Context, Result};
    use ionsnav_core::MenuStore;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::net::TcpListener;
    use tracing::{info, warn};

    /// Run the web server until the process is stopped
    pub async fn run(store: Arc<MenuStore>, options: ServeOptions, addr: SocketAddr) -> Result<()> {
        if !options.pkg_dir.is_dir() {
            warn!(
                pkg_dir = %options.pkg_dir.display(),
                "wasm bundle not found, header will render without interactivity"
            );
        }

        let router = create_router(store, options);
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("Web server listening on http://{}", addr);
        println!("Web server listening on http://{}", addr);

        axum::serve(listener, router).await?;

        Ok(())
    }
}

#[cfg(feature = "ssr")]
pub use server::run;

/// Entry point called by the generated wasm bootstrap script
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    client::start();
}
