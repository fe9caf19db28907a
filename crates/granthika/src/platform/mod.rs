//! Platform-specific async helpers.
//!
//! The poll loop and the debounce timers need to sleep without blocking
//! the UI. Each platform has its own way:
//!
//! - **Desktop**: `tokio::time::sleep` on the runtime Dioxus already runs
//! - **Web**: `gloo_timers::future::TimeoutFuture` over `setTimeout`

/// Sleep for `ms` milliseconds without blocking the event loop.
#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

/// Sleep for `ms` milliseconds without blocking the event loop.
#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u64) {
    gloo_timers::future::TimeoutFuture::new(ms as u32).await;
}
