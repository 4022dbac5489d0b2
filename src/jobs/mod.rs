//! # Sistema de Jobs
//! src/jobs/mod.rs
//!
//! El canal entre el server loop y el pool de workers:
//!
//! - [`Job`]: el par (request, handler) pendiente de ejecución.
//! - [`Inserter`] / [`Extractor`]: las manijas de producción y consumo de
//!   la cola FIFO cerrable que transporta los jobs.
//! - [`QueueClosed`]: la señal de apagado que reciben los consumidores.

pub mod job;
pub mod queue;

pub use job::Job;
pub use queue::{Extractor, Inserter, QueueClosed};
