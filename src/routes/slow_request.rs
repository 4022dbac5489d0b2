//! # Ruta `GET /slow_request`
//! src/routes/slow_request.rs

use std::path::Path;
use std::thread::sleep;
use std::time::Duration;

use crate::http::{Request, Response, Status};

/// Tiempo que duerme el handler para simular una tarea lenta
const SLEEP_TIME: Duration = Duration::from_secs(5);

/// Procesa el `GET /slow_request`: duerme 5 segundos y responde `200 OK`
/// con la página `slow_request.html`
///
/// La espera demuestra la concurrencia del pool: mientras un worker duerme
/// aquí, otro worker puede atender el resto de las conexiones.
///
/// # Panics
///
/// - Si `slow_request.html` no se puede abrir o leer. El fallo es fatal
///   para la invocación del handler: termina el worker que lo ejecutaba.
pub fn get(request: Request, templates_dir: &Path) -> Response {
    let mut response = request.make_response_with_status(Status::Ok);
    response
        .add_file(templates_dir.join("slow_request.html"))
        .expect("Cannot load 'slow_request.html'");

    sleep(SLEEP_TIME);

    response
}
