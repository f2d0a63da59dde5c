use tracing::{error, info};

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION"),
        platform = std::env::consts::OS
    );
}

/// Record which native capture backend this process uses.
pub fn log_backend_selected(backend: &str) {
    info!(
        event = "core.platform.backend_selected",
        backend = backend,
        platform = std::env::consts::OS,
        arch = std::env::consts::ARCH
    );
}

pub fn log_app_error(error: &dyn std::error::Error) {
    error!(
        event = "core.app.error_occurred",
        error = %error,
        source = ?error.source().map(|s| s.to_string()),
        error_type = std::any::type_name_of_val(error)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_events() {
        log_app_startup();
        log_backend_selected("unsupported");

        let test_error = std::io::Error::other("test");
        log_app_error(&test_error);
    }
}
