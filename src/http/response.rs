//! # Construcción y Envío de Respuestas HTTP
//! src/http/response.rs
//!
//! Una [`Response`] nace de un [`Request`](super::Request) (hereda su
//! stream y su versión), acumula el contenido de una plantilla HTML y se
//! consume con [`Response::send`], que escribe el mensaje completo y cierra
//! la conexión de forma gradual.
//!
//! ## Formato serializado
//!
//! ```text
//! {version} {status}\r\nContent-Length: {len}\r\n\r\n{body}
//! ```
//!
//! El único header emitido es `Content-Length`; no hay keep-alive.

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpStream};
use std::path::Path;

use super::{close_gracefully, Status, Version};

/// Respuesta HTTP dirigida a una conexión concreta
#[derive(Debug)]
pub struct Response {
    version: Version,
    status: Status,
    content: String,
    stream: TcpStream,
}

impl Response {
    /// Crea la respuesta vacía que hereda el stream del request
    pub(crate) fn new(version: Version, status: Status, stream: TcpStream) -> Response {
        Self {
            version,
            status,
            content: String::new(),
            stream,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Agrega el contenido de un archivo de plantilla a la respuesta
    ///
    /// El archivo se lee línea por línea y cada línea se termina con `\n`.
    /// Una respuesta solo admite un archivo: agregar un segundo es un error
    /// de lógica y el proceso entra en pánico.
    ///
    /// # Errores
    ///
    /// Retorna el error de I/O si el archivo no se puede abrir o leer. Para
    /// el handler que estaba armando la respuesta ese error es fatal.
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> io::Result<&mut Response> {
        let path = path.as_ref();

        assert!(
            self.content.is_empty(),
            "Cannot add the file '{}': the response already has a content.",
            path.display(),
        );

        let file = File::open(path)?;
        for line in BufReader::new(file).lines() {
            self.content.push_str(&line?);
            self.content.push('\n');
        }

        Ok(self)
    }

    /// Envía la respuesta y cierra la conexión
    ///
    /// Escribe exactamente `header_bytes + body_bytes` sobre el stream. Si
    /// la escritura reporta menos bytes que el mensaje serializado, falla
    /// con [`SendError::PartiallySent`] indicando los bytes faltantes y la
    /// dirección del cliente. Tras un envío completo realiza el cierre
    /// gradual del socket (half-close + drenado hasta EOF).
    pub fn send(mut self) -> Result<(), SendError> {
        let message = self.to_string();

        let peer = self.stream.peer_addr().map_err(SendError::Io)?;
        let sent = self.stream.write(message.as_bytes()).map_err(SendError::Io)?;

        if sent < message.len() {
            return Err(SendError::PartiallySent {
                missing: message.len() - sent,
                peer,
            });
        }

        close_gracefully(self.stream).map_err(SendError::Io)?;

        Ok(())
    }
}

impl Display for Response {
    /// Serializa la respuesta completa, lista para escribir en el socket
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}\r\nContent-Length: {}\r\n\r\n{}",
            self.version,
            self.status,
            self.content.len(),
            self.content,
        )
    }
}

/// Errores de red al escribir una respuesta sobre el stream
#[derive(Debug)]
pub enum SendError {
    /// La escritura reportó menos bytes que el mensaje serializado
    PartiallySent {
        /// Bytes que quedaron sin enviar
        missing: usize,
        /// Dirección del cliente
        peer: SocketAddr,
    },

    /// Fallo del socket durante la escritura o el cierre
    Io(io::Error),
}

impl Display for SendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PartiallySent { missing, peer } => write!(
                f,
                "A message to the client ('{}') is partially sent, the missing size: {} Bytes",
                peer, missing,
            ),
            Self::Io(error) => write!(f, "I/O error while sending the response: {}", error),
        }
    }
}

impl std::error::Error for SendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PartiallySent { .. } => None,
            Self::Io(error) => Some(error),
        }
    }
}
