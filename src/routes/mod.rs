//! # Rutas de Demostración
//! src/routes/mod.rs
//!
//! Handlers que sirve el binario: la página de inicio, una ruta lenta que
//! simula una tarea de 5 segundos y el handler 404 incorporado.
//!
//! Cada handler recibe el [`Request`](crate::http::Request) en propiedad y
//! el directorio de plantillas inyectado en la configuración del servidor.

pub mod index;
pub mod not_found;
pub mod slow_request;
