//! # Pool de Workers
//! src/workers/pool.rs
//!
//! El pool es el dueño de los N workers y de la única manija de inserción
//! de la cola. Su destrucción garantiza el apagado limpio: se cierra la
//! cola (lo que despierta a todos los workers bloqueados) y después se
//! hace join de cada worker, en orden inverso de creación.

use crate::jobs::{Inserter, Job};

use super::worker::Worker;

/// Pool de N workers alimentados por una cola compartida
///
/// # ¿Cómo crearlo?
///
/// ```ignore
/// use web_server::workers::WorkerPool;
///
/// // Crea un pool de 4 workers, que quedan esperando jobs.
/// let pool = WorkerPool::new(4);
/// pool.submit(job);
///
/// // Para apagarlo basta con soltarlo: los jobs encolados se drenan
/// // antes de que los workers vean el cierre.
/// drop(pool);
/// ```
pub struct WorkerPool {
    workers: Vec<Worker>,
    queue: Option<Inserter<Job>>,
}

impl WorkerPool {
    /// Crea un nuevo pool con `amount` workers
    ///
    /// # Panics
    ///
    /// - Si `amount` es cero.
    pub fn new(amount: usize) -> WorkerPool {
        if amount == 0 {
            panic!("Pool capacity cannot be zero");
        }

        let queue = Inserter::new();
        let workers = (0..amount)
            .map(|id| Worker::new(id, queue.make_extractor()))
            .collect();

        Self { workers, queue: Some(queue) }
    }

    /// Encola un job para que lo ejecute algún worker
    ///
    /// No bloquea al llamador más allá del mutex de la cola. El único
    /// cerrador legítimo de la cola es el propio pool, así que encolar
    /// después del cierre es un error de lógica.
    ///
    /// # Panics
    ///
    /// - Si el pool ya fue cerrado.
    pub fn submit(&self, job: Job) {
        match &self.queue {
            Some(queue) => queue.push(job),
            None => panic!("Cannot submit a job: the pool is already closed."),
        }
    }

    /// Cierra la cola y espera a que todos los workers terminen
    ///
    /// Idempotente: el `drop` posterior no tiene efecto.
    pub fn close(&mut self) {
        // Soltar el inserter cierra la cola y despierta a los workers
        self.queue.take();

        for mut worker in self.workers.drain(..).rev() {
            worker.join();
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.close();
    }
}
