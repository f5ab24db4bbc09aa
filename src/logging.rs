use tracing_subscriber::EnvFilter;

/// Filter for the subscriber. Debug output is limited to this crate so egui
/// and eframe internals stay at `warn`.
fn build_filter(enable_debug: bool) -> EnvFilter {
    if enable_debug {
        EnvFilter::new("warn,range_seek=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,range_seek=info"))
    }
}

/// Initialize tracing and bridge `log` to `tracing`.
/// Calling this multiple times is safe (subsequent attempts are ignored).
pub fn init_tracing(enable_debug: bool) {
    let _ = tracing_log::LogTracer::init();

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(enable_debug))
        .with_target(false)
        .with_thread_names(false)
        .try_init()
        .ok();
}
