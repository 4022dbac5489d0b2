//! # Módulo HTTP
//! src/http/mod.rs
//!
//! Este módulo implementa el framing HTTP/1.x desde cero, sin librerías
//! de alto nivel. Solo se parsea la primera línea del request; los headers
//! y el body quedan fuera del alcance del servidor.
//!
//! ### Formato de Request (solo la primera línea se interpreta)
//!
//! ```text
//! GET /path HTTP/1.1\r\n
//! ...headers ignorados...
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Length: 13\r\n
//! \r\n
//! <h1>Hola</h1>
//! ```
//!
//! Cada conexión transporta exactamente un request y una respuesta; al
//! enviar la respuesta el stream se cierra con la secuencia de cierre
//! gradual (half-close + drenado hasta EOF).

use std::io::{self, Read};
use std::net::{Shutdown, TcpStream};

pub mod method; // Verbos, URIs y el par (verbo, URI)
pub mod request; // Lectura y validación de la primera línea
pub mod response; // Serialización y envío de respuestas
pub mod status; // Códigos de estado
pub mod version; // Versiones del protocolo

// Re-exportamos los tipos principales para facilitar su uso
pub use method::{Method, MethodError, Uri, Verb};
pub use request::{Request, RequestError};
pub use response::{Response, SendError};
pub use status::Status;
pub use version::Version;

/// Cierra el stream de forma gradual: se cierra la mitad de escritura,
/// se drena la mitad de lectura hasta EOF y recién entonces se libera el
/// socket.
///
/// Cerrar directamente provocaría un RST y respuestas truncadas en
/// clientes que siguen leyendo después de su propio half-close.
pub(crate) fn close_gracefully(mut stream: TcpStream) -> io::Result<()> {
    stream.shutdown(Shutdown::Write)?;

    let mut sink = [0u8; 512];
    loop {
        match stream.read(&mut sink) {
            Ok(0) => break,
            Ok(_) => {}
            Err(error) => return Err(error),
        }
    }

    Ok(())
}
