use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

/// Install the stderr subscriber. `RUST_LOG` overrides `default_level`.
pub fn init(default_level: &str) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	let installed = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_timer(ChronoLocal::rfc_3339())
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init();

	if let Err(e) = installed {
		eprintln!("Logging was already initialized: {}", e);
	}
}
