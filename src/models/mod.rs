//! Scheduling domain models.
//!
//! Provides the data types a simulation run consumes and produces:
//! processes in, a timeline out.
//!
//! # Domain Mappings
//!
//! | cpu-schedule | OS textbook | Gantt chart |
//! |--------------|-------------|-------------|
//! | Process | Job / PCB | Row label |
//! | Interval | CPU burst slice | Bar |
//! | Timeline | Dispatch trace | Chart |
//! | ProcessTable | Job queue input | Legend |

mod process;
mod registry;
mod timeline;

pub use process::{Process, ProcessId};
pub use registry::ProcessTable;
pub use timeline::{Interval, Occupant, Timeline};
pub(crate) use timeline::TimelineBuilder;
