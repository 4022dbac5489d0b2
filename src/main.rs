//! # Web Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor. Registra las dos rutas de demostración
//! (`GET /` y `GET /slow_request`) y sirve en `127.0.0.1:8000` hasta
//! recibir una señal de apagado.

use web_server::config::Config;
use web_server::http::Method;
use web_server::routes;
use web_server::server::Server;

fn main() {
    println!("=================================");
    println!("  Web Server HTTP/1.x");
    println!("  Pool fijo de workers");
    println!("=================================\n");

    // Parsear configuración desde CLI/env
    let config = Config::new();

    // Validar configuración
    if let Err(error) = config.validate() {
        eprintln!("❌ Error de configuración: {error}");
        eprintln!("\nUsa --help para ver las opciones disponibles");
        std::process::exit(1);
    }

    config.print_summary();

    let templates_dir = config.templates_dir.clone();
    let mut server = Server::new(config);

    let index_dir = templates_dir.clone();
    let slow_dir = templates_dir;
    server
        .link(Method::get("/").expect("the index URI is valid"), move |request| {
            routes::index::get(request, &index_dir)
        })
        .link(
            Method::get("/slow_request").expect("the slow_request URI is valid"),
            move |request| routes::slow_request::get(request, &slow_dir),
        );

    // Servir (esto bloquea el thread hasta la señal de apagado)
    if let Err(error) = server.serve() {
        eprintln!("💥 Error fatal: {error}");
        std::process::exit(1);
    }
}
