//! # Web Server
//! src/lib.rs
//!
//! Servidor HTTP/1.x minimalista y multithread: acepta conexiones TCP en
//! un endpoint local, parsea la primera línea del request, despacha al
//! handler registrado para el par (verbo, URI) y escribe la respuesta
//! sobre la misma conexión antes de cerrarla.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: framing HTTP/1.x (primera línea, respuesta, cierre gradual)
//! - `jobs`: la cola FIFO cerrable y la unidad de trabajo (request + handler)
//! - `workers`: el pool fijo de threads consumidores
//! - `router`: el registro (verbo, URI) → handler con fallback 404
//! - `routes`: los handlers de demostración que sirve el binario
//! - `server`: el bucle de aceptación con apagado por señales
//! - `config`: configuración via CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```ignore
//! use web_server::config::Config;
//! use web_server::http::Method;
//! use web_server::routes;
//! use web_server::server::Server;
//!
//! let config = Config::default();
//! let templates_dir = config.templates_dir.clone();
//!
//! let mut server = Server::new(config);
//! server.link(Method::get("/").unwrap(), move |request| {
//!     routes::index::get(request, &templates_dir)
//! });
//!
//! server.serve().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod http;
pub mod jobs;
pub mod router;
pub mod routes;
pub mod server;
pub mod workers;
