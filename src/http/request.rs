//! # Lectura de Requests HTTP
//! src/http/request.rs
//!
//! Este módulo lee y valida la primera línea de un request. El resto del
//! request (headers, body) no se interpreta: queda en el socket y se drena
//! durante el cierre gradual de la conexión.
//!
//! ## Gramática aceptada
//!
//! ```text
//! VERBO URI HTTP/{version}\r\n
//! ```
//!
//! El verbo se acepta sin distinguir mayúsculas; la URI empieza por `/` y
//! no contiene espacios; la versión es `HTTP/1`, `HTTP/1.1`, `HTTP/2` o
//! `HTTP/3` (con `.0` opcional en las versiones enteras).
//!
//! ## Requests demasiado grandes
//!
//! Si la primera línea supera [`MAX_REQUEST_LINE`] bytes sin aparecer el
//! delimitador `\r\n`, el servidor responde
//! `{version} 422 UNPROCESSABLE CONTENT\r\n\r\n` (con la versión extraída
//! del fragmento leído, o `HTTP/1.1` si no se reconoce ninguna), cierra la
//! conexión y reporta [`RequestError::TooBigRequest`].

use std::fmt::{Display, Formatter};
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::OnceLock;

use regex::Regex;

use super::{close_gracefully, Method, Response, SendError, Status, Uri, Verb, Version};

/// Tamaño máximo aceptado para la primera línea del request, en bytes
pub const MAX_REQUEST_LINE: usize = 8192;

fn first_line_pattern() -> &'static Regex {
    static FIRST_LINE_PATTERN: OnceLock<Regex> = OnceLock::new();
    FIRST_LINE_PATTERN.get_or_init(|| {
        Regex::new(
            r"^((?i:GET|POST|UPDATE|PATCH|DELETE|HEAD|OPTIONS|TRACE|CONNECT)) (/[^ ]*(?:/[^ ]*)*) (HTTP/(?:1\.1|[1-3](?:\.0)?))\r\n",
        )
        .expect("the request-line pattern is valid")
    })
}

fn version_pattern() -> &'static Regex {
    static VERSION_PATTERN: OnceLock<Regex> = OnceLock::new();
    VERSION_PATTERN.get_or_init(|| {
        Regex::new(r"HTTP/(?:1\.1|[1-3](?:\.0)?)").expect("the version pattern is valid")
    })
}

/// Request HTTP parseado, dueño de su conexión
///
/// De un `Request` se deriva exactamente una [`Response`], que hereda el
/// stream y la versión.
#[derive(Debug)]
pub struct Request {
    method: Method,
    version: Version,
    stream: TcpStream,
}

impl Request {
    /// Lee la primera línea del stream y construye el [`Request`]
    ///
    /// El stream debe estar en modo bloqueante. Se acumulan bytes hasta el
    /// primer `\r\n`; si se alcanza [`MAX_REQUEST_LINE`] sin delimitador se
    /// ejecuta el rechazo con `422` descrito en el módulo.
    ///
    /// # Errores
    ///
    /// - [`RequestError::InvalidRequest`] si la línea no respeta la gramática.
    /// - [`RequestError::TooBigRequest`] si la línea supera el máximo.
    /// - [`RequestError::Reject`] si la página de error del rechazo no se
    ///   pudo enviar completa.
    /// - [`RequestError::Io`] ante fallos del socket.
    pub fn from_stream(mut stream: TcpStream) -> Result<Request, RequestError> {
        let raw = Self::read_until_delimiter(&mut stream)?;
        let content = String::from_utf8_lossy(&raw).into_owned();

        if !content.contains("\r\n") && raw.len() >= MAX_REQUEST_LINE {
            return Err(Self::reject_too_big(stream, &content));
        }

        let captures = first_line_pattern()
            .captures(&content)
            .ok_or_else(|| RequestError::InvalidRequest(content.clone()))?;

        let verb: Verb = captures[1]
            .parse()
            .map_err(|_| RequestError::InvalidRequest(content.clone()))?;
        let uri = Uri::new(&captures[2]).map_err(|_| RequestError::InvalidRequest(content.clone()))?;
        let version: Version = captures[3]
            .parse()
            .map_err(|_| RequestError::InvalidRequest(content.clone()))?;

        Ok(Request {
            method: Method::new(verb, uri),
            version,
            stream,
        })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Consume el request y crea la [`Response`] que hereda su stream
    ///
    /// # Ejemplo
    /// ```ignore
    /// let request = Request::from_stream(stream)?;
    /// let response = request.make_response_with_status(Status::Ok);
    /// response.send()?;
    /// ```
    pub fn make_response_with_status(self, status: Status) -> Response {
        Response::new(self.version, status, self.stream)
    }

    /// Acumula bytes hasta ver `\r\n`, llegar al tope o encontrar EOF
    fn read_until_delimiter(stream: &mut TcpStream) -> Result<Vec<u8>, RequestError> {
        let mut content = Vec::new();
        let mut chunk = [0u8; 1024];

        loop {
            if content.windows(2).any(|pair| pair == b"\r\n") {
                break;
            }
            if content.len() >= MAX_REQUEST_LINE {
                break;
            }

            let read = stream.read(&mut chunk).map_err(RequestError::Io)?;
            if read == 0 {
                break;
            }

            content.extend_from_slice(&chunk[..read]);
        }

        Ok(content)
    }

    /// Rechaza una primera línea demasiado grande: responde `422` y cierra
    fn reject_too_big(mut stream: TcpStream, content: &str) -> RequestError {
        let version = version_pattern()
            .find(content)
            .and_then(|token| token.as_str().parse::<Version>().ok())
            .unwrap_or_default();

        let reject_line = format!("{} {}\r\n\r\n", version, Status::UnprocessableContent);

        let peer = match stream.peer_addr() {
            Ok(peer) => peer,
            Err(error) => return RequestError::Io(error),
        };

        let sent = match stream.write(reject_line.as_bytes()) {
            Ok(sent) => sent,
            Err(error) => return RequestError::Reject(SendError::Io(error)),
        };

        if sent < reject_line.len() {
            let _ = close_gracefully(stream);
            return RequestError::Reject(SendError::PartiallySent {
                missing: reject_line.len() - sent,
                peer,
            });
        }

        if let Err(error) = close_gracefully(stream) {
            return RequestError::Io(error);
        }

        RequestError::TooBigRequest(peer)
    }
}

/// Errores al construir un [`Request`] desde el stream
#[derive(Debug)]
pub enum RequestError {
    /// La primera línea no respeta la gramática aceptada
    InvalidRequest(String),

    /// La primera línea supera [`MAX_REQUEST_LINE`]; el cliente ya recibió
    /// el `422` y la conexión quedó cerrada
    TooBigRequest(SocketAddr),

    /// La página de error del rechazo no se pudo enviar completa
    Reject(SendError),

    /// Fallo del socket durante la lectura
    Io(io::Error),
}

impl Display for RequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest(line) => write!(
                f,
                "The HTTP request is invalid, cannot extract the first line. The given request: '{}'",
                line.trim_end(),
            ),
            Self::TooBigRequest(peer) => {
                write!(f, "The request received from the client ({}) is too big", peer)
            }
            Self::Reject(error) => write!(f, "{}", error),
            Self::Io(error) => write!(f, "I/O error while reading the request: {}", error),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Reject(error) => Some(error),
            Self::Io(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::{Shutdown, TcpListener};
    use std::thread;

    fn socket_pair() -> (TcpStream, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let address = listener.local_addr().unwrap();

        let client = TcpStream::connect(address).unwrap();
        let (server, _) = listener.accept().unwrap();

        (client, server)
    }

    fn request_from(payload: &[u8]) -> Result<Request, RequestError> {
        let (mut client, server) = socket_pair();
        client.write_all(payload).unwrap();
        client.shutdown(Shutdown::Write).unwrap();

        Request::from_stream(server)
    }

    #[test]
    fn test_parse_simple_get() {
        let request = request_from(b"GET / HTTP/1.1\r\n\r\n").unwrap();

        assert_eq!(request.method(), &Method::get("/").unwrap());
        assert_eq!(request.version(), Version::Http1_1);
    }

    #[test]
    fn test_parse_ignores_headers() {
        let request = request_from(b"GET /ruta HTTP/1.1\r\nHost: localhost\r\n\r\n").unwrap();

        assert_eq!(request.method(), &Method::get("/ruta").unwrap());
    }

    #[test]
    fn test_parse_every_accepted_verb() {
        for verb in ["GET", "POST", "UPDATE", "PATCH", "DELETE", "HEAD", "OPTIONS", "TRACE", "CONNECT"] {
            let payload = format!("{verb} / HTTP/1.1\r\n\r\n");
            let request = request_from(payload.as_bytes()).unwrap();
            assert_eq!(request.method().verb().as_str(), verb);
        }
    }

    #[test]
    fn test_parse_verb_is_case_insensitive() {
        let request = request_from(b"get / HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(request.method().verb(), Verb::Get);
    }

    #[test]
    fn test_parse_versions() {
        let request = request_from(b"GET / HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(request.version(), Version::Http1);

        let request = request_from(b"GET / HTTP/2\r\n\r\n").unwrap();
        assert_eq!(request.version(), Version::Http2);
    }

    #[test]
    fn test_unknown_verb_is_invalid() {
        let result = request_from(b"BREW / HTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(RequestError::InvalidRequest(_))));
    }

    #[test]
    fn test_uri_without_slash_is_invalid() {
        let result = request_from(b"GET ruta HTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(RequestError::InvalidRequest(_))));
    }

    #[test]
    fn test_unknown_version_is_invalid() {
        let result = request_from(b"GET / HTTP/4\r\n\r\n");
        assert!(matches!(result, Err(RequestError::InvalidRequest(_))));
    }

    #[test]
    fn test_missing_delimiter_is_invalid() {
        let result = request_from(b"GET / HTTP/1.1");
        assert!(matches!(result, Err(RequestError::InvalidRequest(_))));
    }

    #[test]
    fn test_too_big_request_line_gets_rejected_with_422() {
        let (mut client, server) = socket_pair();

        let worker = thread::spawn(move || Request::from_stream(server));

        let mut payload = Vec::from(&b"GET /"[..]);
        payload.extend(std::iter::repeat(b'A').take(2 * MAX_REQUEST_LINE));
        payload.extend_from_slice(b" HTTP/1.1\r\n\r\n");

        client.write_all(&payload).unwrap();
        client.shutdown(Shutdown::Write).unwrap();

        let mut received = String::new();
        client.read_to_string(&mut received).unwrap();
        assert_eq!(received, "HTTP/1.1 422 UNPROCESSABLE CONTENT\r\n\r\n");

        let result = worker.join().unwrap();
        assert!(matches!(result, Err(RequestError::TooBigRequest(_))));
    }

    #[test]
    fn test_too_big_request_line_keeps_the_parsed_version() {
        let (mut client, server) = socket_pair();

        let worker = thread::spawn(move || Request::from_stream(server));

        // La versión viaja al principio: queda dentro del fragmento leído
        let mut payload = Vec::from(&b"GET /inicio HTTP/2 "[..]);
        payload.extend(std::iter::repeat(b'A').take(2 * MAX_REQUEST_LINE));

        client.write_all(&payload).unwrap();
        client.shutdown(Shutdown::Write).unwrap();

        let mut received = String::new();
        client.read_to_string(&mut received).unwrap();
        assert_eq!(received, "HTTP/2 422 UNPROCESSABLE CONTENT\r\n\r\n");

        let result = worker.join().unwrap();
        assert!(matches!(result, Err(RequestError::TooBigRequest(_))));
    }
}
