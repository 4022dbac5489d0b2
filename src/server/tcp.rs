//! # Server Loop
//! src/server/tcp.rs
//!
//! Implementa el bucle de aceptación: bind del listener, registro de las
//! señales de apagado, aceptación no bloqueante de conexiones y despacho
//! de cada request al pool de workers.
//!
//! ## Apagado
//!
//! Un thread dedicado espera `SIGINT`, `SIGTERM` y `SIGABRT` en bloqueo;
//! al recibir una señal loggea el número recibido y levanta el flag
//! atómico que el bucle consulta en cada vuelta. Al salir del bucle se
//! suelta el pool: la cola se cierra, los jobs pendientes se drenan y los
//! workers se joinean.

use std::io;
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use signal_hook::consts::{SIGABRT, SIGINT, SIGTERM};
use signal_hook::iterator::{Handle, Signals};

use crate::config::Config;
use crate::http::{Method, Request, RequestError, Response};
use crate::jobs::Job;
use crate::router::{Handler, Router};
use crate::workers::WorkerPool;

/// Pausa entre reintentos de accept cuando no hay conexiones pendientes
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(5);

/// El servidor web
///
/// # ¿Cómo usarlo?
///
/// ```ignore
/// use web_server::config::Config;
/// use web_server::http::{Method, Status};
/// use web_server::server::Server;
///
/// let mut server = Server::new(Config::default());
/// server.link(Method::get("/").unwrap(), |request| {
///     request.make_response_with_status(Status::Ok)
/// });
///
/// server.serve().unwrap();
/// ```
pub struct Server {
    config: Config,
    router: Router,
    stop: Arc<AtomicBool>,
    cpt: usize,
}

impl Server {
    /// Crea el servidor con su configuración
    ///
    /// El registro de rutas arranca vacío, con el fallback 404 apuntando
    /// al directorio de plantillas configurado.
    pub fn new(config: Config) -> Server {
        let router = Router::new(config.templates_dir.clone());

        Self {
            config,
            router,
            stop: Arc::new(AtomicBool::new(false)),
            cpt: 0,
        }
    }

    /// Registra una ruta con su handler
    ///
    /// Retorna la referencia mutable al servidor para poder encadenar
    /// registros.
    ///
    /// # Panics
    ///
    /// - Si el método ya tiene un handler registrado.
    pub fn link(
        &mut self,
        method: Method,
        handler: impl Fn(Request) -> Response + Send + Sync + 'static,
    ) -> &mut Server {
        let handler: Handler = Arc::new(handler);
        self.router.link(method, handler);

        self
    }

    /// Retorna el flag de apagado que consultará el bucle de aceptación
    ///
    /// Es el mismo flag que levanta el thread de señales al recibir una;
    /// los tests lo usan para apagar el servidor sin señales.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Ejecuta el servidor y procesa los requests entrantes
    ///
    /// Bloquea el thread hasta que una señal de apagado (o el flag de
    /// [`Server::stop_handle`]) detenga el bucle; en ese momento el pool
    /// se suelta, los jobs encolados se drenan y los workers se joinean.
    ///
    /// # Errores
    ///
    /// - Si el bind del listener falla.
    /// - Si el listener no puede entrar en modo no bloqueante.
    /// - Si el registro de las señales falla.
    pub fn serve(&mut self) -> io::Result<()> {
        let listener = TcpListener::bind(self.config.address())?;
        listener.set_nonblocking(true)?;

        let (signals, watcher) = self.spawn_signal_watcher()?;

        println!(
            "Server started and waiting for incoming connections on '{}'.",
            listener.local_addr()?,
        );

        let pool = WorkerPool::new(self.config.workers);

        while !self.stop.load(Ordering::SeqCst) {
            match listener.accept() {
                Ok((stream, _)) => {
                    if let Err(error) = stream.set_nonblocking(false) {
                        eprintln!("Error during the acceptation of a new connection: {error}.");
                        continue;
                    }

                    self.handle(stream, &pool);
                }
                Err(ref error) if error.kind() == io::ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_RETRY_DELAY);
                }
                Err(error) => {
                    eprintln!("Error during the acceptation of a new connection: {error}.");
                }
            }
        }

        // Terminar el thread de señales si el apagado no vino de una señal
        signals.close();
        watcher.join().expect("Cannot join the signal watcher thread");

        drop(pool);

        Ok(())
    }

    /// Lanza el thread dedicado que espera SIGINT, SIGTERM y SIGABRT
    ///
    /// Al recibir una señal, el thread loggea el número recibido y levanta
    /// el flag de apagado. El [`Handle`] retornado permite terminar la
    /// espera cuando el bucle sale por otro camino.
    fn spawn_signal_watcher(&self) -> io::Result<(Handle, thread::JoinHandle<()>)> {
        let mut signals = Signals::new([SIGINT, SIGTERM, SIGABRT])?;
        let handle = signals.handle();

        let stop = Arc::clone(&self.stop);
        let watcher = thread::Builder::new()
            .name("signal-watcher".to_string())
            .spawn(move || {
                if let Some(signal) = signals.forever().next() {
                    println!("Receive the signal {signal}. Start the procedure of shutdown the server.");
                    stop.store(true, Ordering::SeqCst);
                }
            })?;

        Ok((handle, watcher))
    }

    /// Procesa un stream aceptado: framing, lookup del handler y submit
    ///
    /// Los errores por conexión se loggean y el bucle continúa; ninguno
    /// tumba el servidor.
    fn handle(&mut self, stream: TcpStream, pool: &WorkerPool) {
        match Request::from_stream(stream) {
            Ok(request) => {
                if self.config.debug {
                    println!("Request {}: {}", self.cpt, request.method());
                }
                self.cpt += 1;

                let handler = self.router.linked_to(request.method());
                pool.submit(Job::new(request, handler));
            }
            Err(error @ RequestError::TooBigRequest(_)) => {
                eprintln!("Error during the building of the request from the stream: {error}.");
            }
            Err(error @ RequestError::Reject(_)) => {
                eprintln!("Error during the error page sent: {error}.");
            }
            Err(error) => {
                eprintln!("Error during the build of the request: {error}.");
            }
        }
    }
}
