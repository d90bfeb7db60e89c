use crate::Environment;
use tracing_subscriber::{EnvFilter, Layer, Registry, prelude::*};

/// Hook color-eyre into the binary's error reports.
///
/// Later calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Filter applied when `RUST_LOG` is unset
pub fn default_filter(environment: &Environment) -> &'static str {
    if environment.is_production() {
        "info,sea_orm=warn,sqlx=warn"
    } else {
        "debug,tower_http=debug,sqlx=info"
    }
}

fn fmt_layer(environment: &Environment) -> Box<dyn Layer<Registry> + Send + Sync> {
    if environment.is_production() {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .flatten_event(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .pretty()
            .boxed()
    }
}

/// Install the global subscriber: flattened JSON in production, pretty
/// lines otherwise, with span traces captured for eyre reports.
///
/// Only the first call in a process takes effect.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(environment)));

    let installed = tracing_subscriber::registry()
        .with(fmt_layer(environment))
        .with(tracing_error::ErrorLayer::default())
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(?environment, "Tracing initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_filter_quiets_orm() {
        let filter = default_filter(&Environment::Production);
        assert!(filter.starts_with("info"));
        assert!(filter.contains("sea_orm=warn"));
        assert!(default_filter(&Environment::Development).starts_with("debug"));
    }

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing(&Environment::Development);
        temp_env::with_var("RUST_LOG", Some("warn"), || {
            init_tracing(&Environment::Production);
        });
    }

    #[test]
    fn test_install_color_eyre_twice() {
        install_color_eyre();
        install_color_eyre();
    }
}
