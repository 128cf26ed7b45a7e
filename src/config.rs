/// Application-level constants
pub const APP_NAME: &str = "MedsMate";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum non-blank characters an OCR engine must return before its
/// output is accepted. Shorter results fall through to the next engine.
pub const MIN_OCR_TEXT_LENGTH: usize = 20;

/// Log filter used when `RUST_LOG` is not set.
///
/// Keeps the binary quiet: parser decisions are logged at `debug`, so only
/// warnings and the run summary surface by default.
pub fn default_log_filter() -> &'static str {
    "warn,medsmate=info,medsmate_lib=info"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_medsmate() {
        assert_eq!(APP_NAME, "MedsMate");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn default_filter_parses() {
        let filter = tracing_subscriber::EnvFilter::try_new(default_log_filter());
        assert!(filter.is_ok());
    }

    #[test]
    fn min_text_length_is_twenty() {
        assert_eq!(MIN_OCR_TEXT_LENGTH, 20);
    }
}
