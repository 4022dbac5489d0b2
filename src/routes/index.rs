//! # Ruta `GET /`
//! src/routes/index.rs

use std::path::Path;

use crate::http::{Request, Response, Status};

/// Procesa el `GET /`: responde `200 OK` con la página `index.html`
///
/// # Panics
///
/// - Si `index.html` no se puede abrir o leer. El fallo es fatal para la
///   invocación del handler: termina el worker que lo ejecutaba.
pub fn get(request: Request, templates_dir: &Path) -> Response {
    let mut response = request.make_response_with_status(Status::Ok);
    response
        .add_file(templates_dir.join("index.html"))
        .expect("Cannot load 'index.html'");

    response
}
