//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor con soporte para
//! argumentos CLI y variables de entorno. Los valores por defecto son los
//! del servicio real (escucha fija en `127.0.0.1:8000`); las opciones
//! existen sobre todo para que los tests puedan inyectar un puerto libre y
//! un directorio de plantillas temporal.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./web_server --workers 8 --templates-dir ./templates --debug
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_WORKERS=8 TEMPLATES_DIR=./templates ./web_server
//! ```

use std::path::PathBuf;

use clap::Parser;

/// Configuración del servidor HTTP/1.x
#[derive(Debug, Clone, Parser)]
#[command(name = "web_server")]
#[command(about = "Servidor HTTP/1.x concurrente con un pool fijo de workers")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Host/IP en el que escucha el servidor
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8000", env = "HTTP_PORT")]
    pub port: u16,

    /// Número de workers del pool (debe ser >= 1)
    #[arg(short, long, default_value = "4", env = "HTTP_WORKERS")]
    pub workers: usize,

    /// Directorio con las plantillas HTML de las respuestas
    #[arg(long = "templates-dir", default_value = "templates", env = "TEMPLATES_DIR")]
    pub templates_dir: PathBuf,

    /// Activa el modo debug: loggea cada request aceptado con su contador
    #[arg(long, env = "HTTP_DEBUG")]
    pub debug: bool,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI y entorno
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para el bind (host:port)
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8000");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna un error si hay valores inválidos.
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Workers must be >= 1".to_string());
        }

        if self.templates_dir.as_os_str().is_empty() {
            return Err("Templates directory must not be empty".to_string());
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════╗");
        println!("║        Web Server Configuration          ║");
        println!("╚══════════════════════════════════════════╝");
        println!();
        println!("🌐 Network:");
        println!("   Address:      {}", self.address());
        println!();
        println!("👷 Workers:");
        println!("   Pool size:    {}", self.workers);
        println!();
        println!("📄 Templates:");
        println!("   Directory:    {}", self.templates_dir.display());
        println!();
        println!("🐞 Debug mode:   {}", if self.debug { "on" } else { "off" });
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto: el endpoint fijo del servicio
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            workers: 4,
            templates_dir: PathBuf::from("templates"),
            debug: false,
        }
    }
}
