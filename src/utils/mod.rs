//! The `utils` module holds the error types and logging setup shared by the
//! rest of the crate.

pub mod error;
pub mod logging;

pub use error::{AppError, AppResult};

#[cfg(test)]
mod tests {
    use super::{AppError, logging};

    #[test]
    fn logging_init_accepts_levels() {
        // Should not panic
        logging::init("info");
        logging::init("debug");
        logging::init("bogus");
    }

    #[test]
    fn app_error_messages() {
        assert_eq!(AppError::NoTargets.to_string(), "No targets configured");
        let bind = AppError::Bind {
            addr: "127.0.0.1:1".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
        };
        assert!(bind.to_string().starts_with("Failed to bind query interface on 127.0.0.1:1"));
    }
}
