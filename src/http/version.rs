//! # Versiones HTTP
//! src/http/version.rs
//!
//! Versiones aceptadas en la primera línea del request. La versión se
//! emite en la respuesta tal como se recibió, normalizando el sufijo `.0`
//! (`HTTP/1.0` se emite como `HTTP/1`).

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Versión del protocolo HTTP
///
/// # Ejemplo
/// ```
/// use web_server::http::Version;
///
/// let version: Version = "HTTP/1.1".parse().unwrap();
/// assert_eq!(version, Version::Http1_1);
/// assert_eq!(version.to_string(), "HTTP/1.1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Version {
    /// HTTP Versión 1 (acepta `HTTP/1` y `HTTP/1.0`)
    Http1,

    /// HTTP Versión 1.1 - la versión por defecto
    #[default]
    Http1_1,

    /// HTTP Versión 2 (acepta `HTTP/2` y `HTTP/2.0`)
    Http2,

    /// HTTP Versión 3 (acepta `HTTP/3` y `HTTP/3.0`)
    Http3,
}

impl Version {
    /// Todas las versiones aceptadas
    const ALLOWED_VERSIONS: &'static [Self] =
        &[Self::Http1, Self::Http1_1, Self::Http2, Self::Http3];

    /// Retorna la versión tal como se escribe en la línea de respuesta
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http1 => "HTTP/1",
            Self::Http1_1 => "HTTP/1.1",
            Self::Http2 => "HTTP/2",
            Self::Http3 => "HTTP/3",
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Version {
    type Err = InvalidVersionError;

    /// Parsea una versión en la forma `HTTP/{major}` o `HTTP/{major}.{minor}`
    ///
    /// El parseo ignora mayúsculas/minúsculas y normaliza el sufijo `.0`.
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::Version;
    ///
    /// assert_eq!("http/2".parse::<Version>().unwrap(), Version::Http2);
    /// assert_eq!("HTTP/1.0".parse::<Version>().unwrap(), Version::Http1);
    /// assert!("1.1".parse::<Version>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Version, Self::Err> {
        let upper = s.to_uppercase();
        let normalized = upper.strip_suffix(".0").unwrap_or(&upper);

        Self::ALLOWED_VERSIONS
            .iter()
            .find(|version| version.as_str() == normalized)
            .copied()
            .ok_or_else(|| InvalidVersionError::new(s))
    }
}

/// Indica que se intentó parsear una versión HTTP desconocida
#[derive(Debug, Clone)]
pub struct InvalidVersionError {
    entry: String,
}

impl InvalidVersionError {
    fn new(entry: impl Into<String>) -> Self {
        Self { entry: entry.into() }
    }
}

impl Display for InvalidVersionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid HTTP version: '{}'", self.entry)
    }
}

impl std::error::Error for InvalidVersionError {}
