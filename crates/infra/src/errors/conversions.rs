//! Conversions from external infrastructure errors into domain errors.

use osdb_domain::OsdbError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub OsdbError);

impl From<InfraError> for OsdbError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<OsdbError> for InfraError {
    fn from(value: OsdbError) -> Self {
        Self(value)
    }
}

trait IntoOsdbError {
    fn into_osdb(self) -> OsdbError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → OsdbError */
/* -------------------------------------------------------------------------- */

impl IntoOsdbError for HttpError {
    fn into_osdb(self) -> OsdbError {
        if self.is_timeout() {
            return OsdbError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return OsdbError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return OsdbError::Config(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() || self.is_body() {
            return OsdbError::Network(format!("failed to read HTTP response: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => OsdbError::Auth(message),
                400..=499 => OsdbError::InvalidInput(message),
                _ => OsdbError::Network(message),
            };
        }

        OsdbError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_osdb())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → OsdbError */
/* -------------------------------------------------------------------------- */

impl IntoOsdbError for url::ParseError {
    fn into_osdb(self) -> OsdbError {
        OsdbError::Config(format!("invalid server URL: {self}"))
    }
}

impl From<url::ParseError> for InfraError {
    fn from(value: url::ParseError) -> Self {
        Self(value.into_osdb())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
