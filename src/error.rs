// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Catalog(CatalogError),
    Engine(String),
    Image(String),
}

/// Failures while populating the store from a catalog source.
/// Used to pick a user-facing, localized notification.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// The catalog file or endpoint does not exist.
    NotFound(String),

    /// The server answered with a non-success status code.
    Status(u16),

    /// The payload could not be decoded into catalog entries.
    Malformed(String),

    /// Transport-level failure (DNS, TLS, connection reset, ...).
    Network(String),
}

impl CatalogError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            CatalogError::NotFound(_) => "notification-catalog-not-found",
            CatalogError::Status(_) => "notification-catalog-status",
            CatalogError::Malformed(_) => "notification-catalog-malformed",
            CatalogError::Network(_) => "notification-catalog-network",
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::NotFound(what) => write!(f, "Catalog entry not found: {}", what),
            CatalogError::Status(code) => write!(f, "Catalog server returned HTTP {}", code),
            CatalogError::Malformed(msg) => write!(f, "Malformed catalog data: {}", msg),
            CatalogError::Network(msg) => write!(f, "Network error: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Catalog(e) => write!(f, "Catalog Error: {}", e),
            Error::Engine(e) => write!(f, "Engine Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Error::Catalog(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            return Error::Catalog(CatalogError::NotFound(err.to_string()));
        }
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Catalog(CatalogError::Malformed(err.to_string()))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Error::Catalog(CatalogError::Status(status.as_u16()));
        }
        if err.is_decode() {
            return Error::Catalog(CatalogError::Malformed(err.to_string()));
        }
        Error::Catalog(CatalogError::Network(err.to_string()))
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl Error {
    /// Returns the i18n key of the notification shown for this error.
    pub fn notification_key(&self) -> &'static str {
        match self {
            Error::Catalog(e) => e.i18n_key(),
            Error::Io(_) => "notification-io-error",
            Error::Config(_) => "notification-config-load-error",
            Error::Engine(_) => "notification-engine-error",
            Error::Image(_) => "notification-panorama-load-error",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn missing_file_maps_to_catalog_not_found() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "layers.json");
        let err: Error = io_error.into();
        assert!(matches!(err, Error::Catalog(CatalogError::NotFound(_))));
    }

    #[test]
    fn other_io_errors_stay_io() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn json_errors_are_malformed_catalog() {
        let err: Error = serde_json::from_str::<Vec<u32>>("{").unwrap_err().into();
        assert!(matches!(err, Error::Catalog(CatalogError::Malformed(_))));
        assert_eq!(err.notification_key(), "notification-catalog-malformed");
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn catalog_error_i18n_keys() {
        assert_eq!(
            CatalogError::Status(500).i18n_key(),
            "notification-catalog-status"
        );
        assert_eq!(
            CatalogError::Network("reset".into()).i18n_key(),
            "notification-catalog-network"
        );
    }

    #[test]
    fn catalog_error_display_includes_status() {
        let err = CatalogError::Status(404);
        assert!(format!("{}", err).contains("404"));
    }
}
