//! # Registro de Handlers
//! src/router/mod.rs
//!
//! Este módulo implementa el registro que mapea métodos (par verbo + URI)
//! a handlers.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! El registro se construye completo antes de `serve()` y es de solo
//! lectura durante el servicio: no necesita ningún lock. Si no hay handler
//! para el método pedido, se usa el handler 404 incorporado, que sirve
//! `not_found.html` del directorio de plantillas.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::http::{Method, Request, Response};
use crate::routes;

/// Tipo de los handlers registrados
///
/// Un handler toma el [`Request`] en propiedad y retorna la [`Response`];
/// solo toca el stream a través de la abstracción de la respuesta. Se
/// almacena con borrado de tipo para admitir clausuras que capturan (por
/// ejemplo, el directorio de plantillas).
pub type Handler = Arc<dyn Fn(Request) -> Response + Send + Sync + 'static>;

/// Registro método → handler con fallback 404
pub struct Router {
    routes: HashMap<Method, Handler>,
    fallback: Handler,
}

impl Router {
    /// Crea un registro vacío cuyo fallback sirve `not_found.html` desde
    /// el directorio de plantillas dado
    pub fn new(templates_dir: PathBuf) -> Router {
        let fallback: Handler =
            Arc::new(move |request| routes::not_found::handler(request, &templates_dir));

        Self {
            routes: HashMap::new(),
            fallback,
        }
    }

    /// Registra una ruta con su handler
    ///
    /// # Panics
    ///
    /// Registrar dos veces el mismo método es un error de lógica: el
    /// proceso entra en pánico con un diagnóstico.
    pub fn link(&mut self, method: Method, handler: Handler) {
        if self.routes.contains_key(&method) {
            panic!("The method {method} has already a handler registered.");
        }

        self.routes.insert(method, handler);
    }

    /// Retorna el handler registrado para el método, o el fallback 404
    pub fn linked_to(&self, method: &Method) -> Handler {
        self.routes.get(method).unwrap_or(&self.fallback).clone()
    }
}
