//! # Handler 404 Incorporado
//! src/routes/not_found.rs

use std::path::Path;

use crate::http::{Request, Response, Status};

/// Responde `404 NOT FOUND` con la página `not_found.html`
///
/// Es el fallback del registro: se invoca cuando ningún handler está
/// registrado para el método del request.
///
/// # Panics
///
/// - Si `not_found.html` no se puede abrir o leer. El fallo es fatal para
///   la invocación del handler: termina el worker que lo ejecutaba.
pub fn handler(request: Request, templates_dir: &Path) -> Response {
    let mut response = request.make_response_with_status(Status::NotFound);
    response
        .add_file(templates_dir.join("not_found.html"))
        .expect("Cannot load 'not_found.html'");

    response
}
