use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";
const DEBUG_FILTER: &str = "warn,axfrscan_core=debug,axfrscan_recon=debug,axfrscan_cli=debug";

/// Send diagnostics to stderr so stdout stays clean for results.
///
/// RUST_LOG overrides the defaults, e.g. to trace every dig invocation:
///   RUST_LOG=axfrscan_recon=TRACE
pub fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { DEBUG_FILTER } else { DEFAULT_FILTER }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .without_time()
        .try_init()
        .ok();
}
