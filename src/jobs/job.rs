//! # Unidad de Trabajo
//! src/jobs/job.rs
//!
//! Un [`Job`] empaqueta un request ya parseado junto con el handler que lo
//! va a procesar. El server loop lo encola y exactamente un worker lo
//! consume: ejecuta el handler y envía la respuesta sobre la conexión que
//! viaja dentro del request.

use crate::http::{Request, Response, SendError};
use crate::router::Handler;

/// Par (request, handler) pendiente de ejecución
pub struct Job {
    request: Request,
    handler: Handler,
}

impl Job {
    pub fn new(request: Request, handler: Handler) -> Job {
        Self { request, handler }
    }

    /// Invoca el handler con el request y retorna la respuesta
    pub fn execute(self) -> Response {
        (self.handler)(self.request)
    }

    /// Ejecuta el handler y envía la respuesta resultante
    ///
    /// # Errores
    ///
    /// Propaga el error de red de [`Response::send`]; el worker que lo
    /// reciba termina su ejecución.
    pub fn execute_and_send(self) -> Result<(), SendError> {
        self.execute().send()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Status;
    use std::io::{Read, Write};
    use std::net::{Shutdown, TcpListener, TcpStream};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn parsed_request() -> (TcpStream, Request) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let address = listener.local_addr().unwrap();

        let mut client = TcpStream::connect(address).unwrap();
        let (server, _) = listener.accept().unwrap();

        client.write_all(b"GET / HTTP/1.1\r\n\r\n").unwrap();
        client.shutdown(Shutdown::Write).unwrap();

        (client, Request::from_stream(server).unwrap())
    }

    #[test]
    fn test_execute_invokes_the_handler_exactly_once() {
        let (_client, request) = parsed_request();

        let calls = Arc::new(AtomicUsize::new(0));
        let handler: Handler = {
            let calls = Arc::clone(&calls);
            Arc::new(move |request: Request| {
                calls.fetch_add(1, Ordering::SeqCst);
                request.make_response_with_status(Status::Ok)
            })
        };

        let response = Job::new(request, handler).execute();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(response.status(), Status::Ok);
    }

    #[test]
    fn test_execute_and_send_writes_the_response() {
        let (mut client, request) = parsed_request();

        let handler: Handler =
            Arc::new(|request: Request| request.make_response_with_status(Status::NotFound));

        Job::new(request, handler).execute_and_send().unwrap();

        let mut received = String::new();
        client.read_to_string(&mut received).unwrap();
        assert_eq!(received, "HTTP/1.1 404 NOT FOUND\r\nContent-Length: 0\r\n\r\n");
    }
}
