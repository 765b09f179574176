mod display;
mod error;
mod font;
mod instruction;
mod keypad;
mod memory;
mod options;
mod processor;
mod program;
mod scheduler;
mod stack;

// Re-exports: the public surface is the processor itself plus the
// configuration and error types needed to drive it. Memory, the stack, the
// framebuffer, the keypad and font tables are internal to `Processor`.
pub use crate::error::{ErrorDetail, MachineError};
pub use crate::options::{Options, Quirks, COSMAC_VIP_PROCESSOR_SPEED_HERTZ};
pub use crate::processor::{FramebufferSnapshot, Processor, StateSnapshot, StepResult};
pub use crate::scheduler::Scheduler;
