//! # Métodos HTTP
//! src/http/method.rs
//!
//! Un [`Method`] es el par (verbo, URI) que identifica una ruta. Es la
//! clave del registro de handlers: dos rutas con el mismo par son la misma
//! ruta.
//!
//! [MDN - Methods](https://developer.mozilla.org/en-US/docs/Web/HTTP/Methods)

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

/// Verbos HTTP aceptados en la primera línea del request
///
/// `UPDATE` no es un verbo HTTP estándar (el estándar define `PUT`); se
/// conserva por compatibilidad con la gramática aceptada en el cable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Update,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
    Connect,
}

impl Verb {
    /// Convierte el verbo a su forma en mayúsculas del protocolo
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Update => "UPDATE",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
            Verb::Head => "HEAD",
            Verb::Options => "OPTIONS",
            Verb::Trace => "TRACE",
            Verb::Connect => "CONNECT",
        }
    }
}

impl Display for Verb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Verb {
    type Err = MethodError;

    /// Parsea un verbo ignorando mayúsculas/minúsculas
    fn from_str(s: &str) -> Result<Verb, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Verb::Get),
            "POST" => Ok(Verb::Post),
            "UPDATE" => Ok(Verb::Update),
            "PATCH" => Ok(Verb::Patch),
            "DELETE" => Ok(Verb::Delete),
            "HEAD" => Ok(Verb::Head),
            "OPTIONS" => Ok(Verb::Options),
            "TRACE" => Ok(Verb::Trace),
            "CONNECT" => Ok(Verb::Connect),
            _ => Err(MethodError::InvalidVerb(s.to_string())),
        }
    }
}

fn uri_pattern() -> &'static Regex {
    static URI_PATTERN: OnceLock<Regex> = OnceLock::new();
    URI_PATTERN.get_or_init(|| Regex::new(r"^(?:/[^ ]*)+$").expect("the URI pattern is valid"))
}

/// URI de un request: no vacía, empieza por `/` y no contiene espacios
///
/// # Ejemplo
/// ```
/// use web_server::http::Uri;
///
/// assert!(Uri::new("/").is_ok());
/// assert!(Uri::new("/slow_request").is_ok());
/// assert!(Uri::new("").is_err());
/// assert!(Uri::new("sin_barra").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri(String);

impl Uri {
    /// Valida y construye la URI
    pub fn new(value: impl AsRef<str>) -> Result<Uri, MethodError> {
        let value = value.as_ref();

        if !uri_pattern().is_match(value) {
            return Err(MethodError::InvalidUri(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Uri {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Par (verbo, URI) que identifica una ruta del servidor
///
/// La igualdad es estructural y el tipo es hashable: sirve de clave en el
/// registro de handlers.
///
/// # Ejemplo
/// ```
/// use web_server::http::Method;
///
/// let get_index = Method::get("/").unwrap();
/// assert_eq!(get_index.to_string(), "GET /");
///
/// let parsed: Method = "GET /".try_into().unwrap();
/// assert_eq!(parsed, get_index);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Method {
    verb: Verb,
    uri: Uri,
}

impl Method {
    /// Construye el método con un verbo ya parseado y una URI validada
    pub fn new(verb: Verb, uri: Uri) -> Method {
        Self { verb, uri }
    }

    /// Crea un método `GET` con la URI
    pub fn get(uri: impl AsRef<str>) -> Result<Method, MethodError> {
        Self::build(Verb::Get, uri)
    }

    /// Crea un método `POST` con la URI
    pub fn post(uri: impl AsRef<str>) -> Result<Method, MethodError> {
        Self::build(Verb::Post, uri)
    }

    /// Crea un método `UPDATE` con la URI
    pub fn update(uri: impl AsRef<str>) -> Result<Method, MethodError> {
        Self::build(Verb::Update, uri)
    }

    /// Crea un método `PATCH` con la URI
    pub fn patch(uri: impl AsRef<str>) -> Result<Method, MethodError> {
        Self::build(Verb::Patch, uri)
    }

    /// Crea un método `DELETE` con la URI
    pub fn delete(uri: impl AsRef<str>) -> Result<Method, MethodError> {
        Self::build(Verb::Delete, uri)
    }

    /// Crea un método `HEAD` con la URI
    pub fn head(uri: impl AsRef<str>) -> Result<Method, MethodError> {
        Self::build(Verb::Head, uri)
    }

    /// Crea un método `OPTIONS` con la URI
    pub fn options(uri: impl AsRef<str>) -> Result<Method, MethodError> {
        Self::build(Verb::Options, uri)
    }

    /// Crea un método `TRACE` con la URI
    pub fn trace(uri: impl AsRef<str>) -> Result<Method, MethodError> {
        Self::build(Verb::Trace, uri)
    }

    /// Crea un método `CONNECT` con la URI
    pub fn connect(uri: impl AsRef<str>) -> Result<Method, MethodError> {
        Self::build(Verb::Connect, uri)
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    fn build(verb: Verb, uri: impl AsRef<str>) -> Result<Method, MethodError> {
        Ok(Self { verb, uri: Uri::new(uri)? })
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.verb, self.uri)
    }
}

impl TryFrom<&str> for Method {
    type Error = MethodError;

    /// Parsea un método desde una línea con la forma `VERBO URI`
    fn try_from(line: &str) -> Result<Method, Self::Error> {
        let mut parts = line.split(' ');

        let verb = parts.next().unwrap_or("");
        let uri = parts.next().unwrap_or("");

        Ok(Self { verb: verb.parse()?, uri: Uri::new(uri)? })
    }
}

impl FromStr for Method {
    type Err = MethodError;

    fn from_str(s: &str) -> Result<Method, Self::Err> {
        Self::try_from(s)
    }
}

/// Indica que se leyó una parte inválida (verbo o URI) al construir un [`Method`]
#[derive(Debug, Clone)]
pub enum MethodError {
    /// El verbo no pertenece al conjunto aceptado
    InvalidVerb(String),

    /// La URI está vacía, no empieza por `/` o contiene espacios
    InvalidUri(String),
}

impl Display for MethodError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidVerb(entry) => write!(f, "Invalid Method verb: '{}'", entry),
            Self::InvalidUri(entry) => write!(f, "Invalid Method URI: '{}'", entry),
        }
    }
}

impl std::error::Error for MethodError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_cover_all_verbs() {
        assert_eq!(Method::get("/").unwrap().verb(), Verb::Get);
        assert_eq!(Method::post("/").unwrap().verb(), Verb::Post);
        assert_eq!(Method::update("/").unwrap().verb(), Verb::Update);
        assert_eq!(Method::patch("/").unwrap().verb(), Verb::Patch);
        assert_eq!(Method::delete("/").unwrap().verb(), Verb::Delete);
        assert_eq!(Method::head("/").unwrap().verb(), Verb::Head);
        assert_eq!(Method::options("/").unwrap().verb(), Verb::Options);
        assert_eq!(Method::trace("/").unwrap().verb(), Verb::Trace);
        assert_eq!(Method::connect("/").unwrap().verb(), Verb::Connect);
    }

    #[test]
    fn test_uri_must_start_with_slash() {
        assert!(Uri::new("/").is_ok());
        assert!(Uri::new("/a/b/c").is_ok());
        assert!(Uri::new("").is_err());
        assert!(Uri::new("index").is_err());
        assert!(Uri::new("/con espacio").is_err());
    }

    #[test]
    fn test_display_is_verb_space_uri() {
        let method = Method::get("/slow_request").unwrap();
        assert_eq!(method.to_string(), "GET /slow_request");
    }

    #[test]
    fn test_parse_from_line() {
        let method: Method = "GET /".try_into().unwrap();
        assert_eq!(method, Method::get("/").unwrap());
    }

    #[test]
    fn test_parse_verb_is_case_insensitive() {
        let method: Method = "get /".try_into().unwrap();
        assert_eq!(method.verb(), Verb::Get);
    }

    #[test]
    fn test_parse_rejects_unknown_verb() {
        let result = Method::try_from("BREW /");
        assert!(matches!(result, Err(MethodError::InvalidVerb(_))));
    }

    #[test]
    fn test_parse_rejects_missing_uri() {
        let result = Method::try_from("GET");
        assert!(matches!(result, Err(MethodError::InvalidUri(_))));
    }

    #[test]
    fn test_methods_are_hashable_keys() {
        use std::collections::HashMap;

        let mut routes = HashMap::new();
        routes.insert(Method::get("/").unwrap(), 1);
        routes.insert(Method::post("/").unwrap(), 2);

        assert_eq!(routes.get(&Method::get("/").unwrap()), Some(&1));
        assert_eq!(routes.get(&Method::post("/").unwrap()), Some(&2));
        assert_eq!(routes.get(&Method::get("/otro").unwrap()), None);
    }
}
