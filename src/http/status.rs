//! # Códigos de Estado HTTP
//! src/http/status.rs
//!
//! Este módulo define los códigos de estado que emite el servidor.
//! Solo se usan tres: éxito, ruta desconocida y request demasiado grande.
//!
//! Las frases de razón se emiten en mayúsculas, con un único espacio
//! entre código y frase: `200 OK`, `404 NOT FOUND`, `422 UNPROCESSABLE CONTENT`.

/// Representa los códigos de estado HTTP que soporta el servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// 200 OK - La petición fue exitosa
    Ok = 200,

    /// 404 NOT FOUND - Ninguna ruta registrada para el método pedido
    NotFound = 404,

    /// 422 UNPROCESSABLE CONTENT - La primera línea del request supera el
    /// tamaño máximo aceptado
    UnprocessableContent = 422,
}

impl Status {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::Status;
    /// assert_eq!(Status::Ok.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna la frase de razón asociada al código, en mayúsculas
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::Status;
    /// assert_eq!(Status::Ok.phrase(), "OK");
    /// assert_eq!(Status::NotFound.phrase(), "NOT FOUND");
    /// ```
    pub fn phrase(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::NotFound => "NOT FOUND",
            Status::UnprocessableContent => "UNPROCESSABLE CONTENT",
        }
    }
}

impl std::fmt::Display for Status {
    /// Formatea el estado como aparece en la línea de respuesta
    ///
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.phrase())
    }
}
