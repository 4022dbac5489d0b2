//! # Worker
//! src/workers/worker.rs
//!
//! Un worker es un thread en segundo plano que repite el ciclo
//! `pop → execute → send` hasta que la cola reporta su cierre.
//!
//! El thread creado se llama `Worker-{id}`.

use std::thread::{Builder, JoinHandle};

use crate::jobs::{Extractor, Job, QueueClosed};

/// Capa de abstracción sobre el [`JoinHandle`] de un thread consumidor
///
/// No se crea directamente: es el [`WorkerPool`](super::WorkerPool) quien
/// construye los workers con sus extractores. Al soltar el worker se hace
/// join del thread; como el thread termina solo cuando la cola se cierra,
/// el join no se cuelga siempre que el cierre ya ocurrió u ocurrirá.
pub struct Worker {
    id: usize,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Crea el worker y lanza su thread inmediatamente
    ///
    /// # Panics
    ///
    /// - Si el sistema operativo no puede crear el thread.
    pub fn new(id: usize, queue: Extractor<Job>) -> Worker {
        let handle = Builder::new()
            .name(format!("Worker-{id}"))
            .spawn(move || loop {
                match queue.pop() {
                    Ok(job) => {
                        if let Err(error) = job.execute_and_send() {
                            eprintln!("Worker {id} disconnected due to an error: {error}.");
                            break;
                        }
                    }
                    Err(QueueClosed) => {
                        println!("Worker {id} disconnected: shutting down.");
                        break;
                    }
                }
            })
            .expect("Cannot spawn the worker thread");

        Self { id, handle: Some(handle) }
    }

    /// Espera a que el thread termine su ejecución
    pub fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                // El handler de un job hizo panic: solo murió este worker
                eprintln!("Worker {} terminated by a panic.", self.id);
            }
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.join();
    }
}
