use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "procaudit=info,procaudit_engine=info,procaudit_io=info";
const VERBOSE_DIRECTIVES: &str = "procaudit=debug,procaudit_engine=debug,procaudit_io=debug";

/// Install the stderr subscriber. `RUST_LOG` wins over `verbose` when set.
///
/// `log` records from the library crates reach the subscriber through the
/// tracing-log bridge that `init` installs.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { VERBOSE_DIRECTIVES } else { DEFAULT_DIRECTIVES };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    // Already installed is fine.
    let _ = tracing_subscriber::registry().with(filter).with(console_layer).try_init();
}
