//! # Cola de Jobs Cerrable
//! src/jobs/queue.rs
//!
//! Implementa una cola FIFO thread-safe con un estado terminal "cerrada".
//! El cierre es la señal de apagado del pool: despierta a todos los
//! consumidores bloqueados, que drenan los elementos pendientes y después
//! reciben [`QueueClosed`] en cada `pop`.
//!
//! El acceso a la cola se reparte en dos manijas:
//!
//! - [`Inserter`]: la única manija de producción. Su `drop` cierra la cola.
//! - [`Extractor`]: una manija de consumo por worker, derivada del inserter.
//!
//! Un mutex protege la lista de elementos y el flag de cierre; la condvar
//! se notifica a un consumidor en cada `push` y a todos en el `close`. Eso
//! establece el happens-before que pide el apagado: un consumidor que
//! observa la cola cerrada observa también todos los `push` previos al
//! cierre.

use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Condvar, Mutex};

struct State<T> {
    elements: VecDeque<T>,
    closed: bool,
}

struct Shared<T> {
    state: Mutex<State<T>>,
    available: Condvar,
}

impl<T> Shared<T> {
    /// Cierra la cola y despierta a todos los consumidores
    ///
    /// Silenciosamente idempotente: el `drop` del inserter puede volver a
    /// cerrar después de un cierre explícito sin efecto observable.
    fn close(&self) {
        // El cierre también corre durante un unwind (drop del inserter);
        // un mutex envenenado no debe impedir despertar a los consumidores.
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };

        if state.closed {
            return;
        }
        state.closed = true;
        drop(state);

        self.available.notify_all();
    }
}

/// Señal de que la cola está cerrada y vacía
///
/// No es un error: es la señal normal de apagado para los workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueClosed;

impl Display for QueueClosed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "The queue is closed")
    }
}

impl std::error::Error for QueueClosed {}

/// Manija de producción de la cola
///
/// Existe exactamente una por cola. Al soltarla, la cola se cierra y los
/// consumidores bloqueados despiertan.
///
/// # Ejemplo
/// ```
/// use web_server::jobs::Inserter;
///
/// let inserter = Inserter::new();
/// let extractor = inserter.make_extractor();
///
/// inserter.push(1);
/// inserter.push(2);
/// drop(inserter); // cierra la cola
///
/// assert_eq!(extractor.pop(), Ok(1));
/// assert_eq!(extractor.pop(), Ok(2));
/// assert!(extractor.pop().is_err());
/// ```
pub struct Inserter<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Inserter<T> {
    /// Crea la cola y retorna su única manija de producción
    pub fn new() -> Inserter<T> {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    elements: VecDeque::new(),
                    closed: false,
                }),
                available: Condvar::new(),
            }),
        }
    }

    /// Deriva una manija de consumo sobre la misma cola
    pub fn make_extractor(&self) -> Extractor<T> {
        Extractor {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Encola un elemento al final y despierta a un consumidor
    ///
    /// Nunca bloquea más allá del mutex interno.
    ///
    /// # Panics
    ///
    /// Encolar sobre una cola cerrada es un error de lógica: el proceso
    /// entra en pánico con un diagnóstico.
    pub fn push(&self, element: T) {
        let mut state = self.shared.state.lock().unwrap();

        assert!(!state.closed, "Cannot push into the queue: it is already closed.");

        state.elements.push_back(element);
        drop(state);

        self.shared.available.notify_one();
    }

    /// Cierra la cola explícitamente
    ///
    /// El `drop` posterior de la manija no tiene efecto observable.
    pub fn close(&self) {
        self.shared.close();
    }
}

impl<T> Default for Inserter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Inserter<T> {
    fn drop(&mut self) {
        self.shared.close();
    }
}

/// Manija de consumo de la cola: una por worker
pub struct Extractor<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Extractor<T> {
    /// Extrae el primer elemento, bloqueando hasta que haya uno o la cola
    /// se cierre
    ///
    /// Los elementos encolados antes del cierre se entregan siempre: el
    /// consumidor prefiere drenar un elemento antes que reportar el cierre.
    /// Con la cola cerrada y vacía retorna [`QueueClosed`].
    pub fn pop(&self) -> Result<T, QueueClosed> {
        let mut state = self.shared.state.lock().unwrap();

        loop {
            if let Some(element) = state.elements.pop_front() {
                return Ok(element);
            }
            if state.closed {
                return Err(QueueClosed);
            }

            state = self.shared.available.wait(state).unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_fifo_order_with_a_single_consumer() {
        let inserter = Inserter::new();
        let extractor = inserter.make_extractor();

        for value in 0..100 {
            inserter.push(value);
        }
        inserter.close();

        let drained: Vec<i32> = std::iter::from_fn(|| extractor.pop().ok()).collect();
        assert_eq!(drained, (0..100).collect::<Vec<i32>>());
    }

    #[test]
    fn test_pop_drains_pending_elements_after_close() {
        let inserter = Inserter::new();
        let extractor = inserter.make_extractor();

        inserter.push("a");
        inserter.push("b");
        drop(inserter);

        assert_eq!(extractor.pop(), Ok("a"));
        assert_eq!(extractor.pop(), Ok("b"));
        assert_eq!(extractor.pop(), Err(QueueClosed));
        // Cada pop posterior sigue reportando el cierre
        assert_eq!(extractor.pop(), Err(QueueClosed));
    }

    #[test]
    fn test_close_wakes_every_blocked_consumer() {
        let inserter: Inserter<()> = Inserter::new();

        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let extractor = inserter.make_extractor();
                thread::spawn(move || extractor.pop())
            })
            .collect();

        // Dar tiempo a que los consumidores queden bloqueados en la condvar
        thread::sleep(Duration::from_millis(100));
        inserter.close();

        for consumer in consumers {
            assert_eq!(consumer.join().unwrap(), Err(QueueClosed));
        }
    }

    #[test]
    fn test_every_element_is_delivered_exactly_once() {
        const ELEMENTS: usize = 200;

        let inserter = Inserter::new();
        let delivered = Arc::new(AtomicUsize::new(0));

        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let extractor = inserter.make_extractor();
                let delivered = Arc::clone(&delivered);
                thread::spawn(move || {
                    let mut seen = Vec::new();
                    while let Ok(value) = extractor.pop() {
                        delivered.fetch_add(1, Ordering::SeqCst);
                        seen.push(value);
                    }
                    seen
                })
            })
            .collect();

        for value in 0..ELEMENTS {
            inserter.push(value);
        }
        drop(inserter);

        let mut all: Vec<usize> = consumers
            .into_iter()
            .flat_map(|consumer| consumer.join().unwrap())
            .collect();
        all.sort_unstable();

        assert_eq!(delivered.load(Ordering::SeqCst), ELEMENTS);
        assert_eq!(all, (0..ELEMENTS).collect::<Vec<usize>>());
    }

    #[test]
    fn test_explicit_close_then_drop_is_silent() {
        let inserter: Inserter<()> = Inserter::new();
        let extractor = inserter.make_extractor();

        inserter.close();
        drop(inserter); // segundo cierre, absorbido en silencio

        assert_eq!(extractor.pop(), Err(QueueClosed));
    }

    #[test]
    #[should_panic(expected = "already closed")]
    fn test_push_after_close_panics() {
        let inserter = Inserter::new();
        inserter.close();
        inserter.push(1);
    }
}
