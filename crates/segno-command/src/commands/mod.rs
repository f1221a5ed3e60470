//! The built-in command set.

mod cable;
mod interval;
mod move_event;
mod process;
mod rename;
mod script;

pub use cable::{CreateCable, RemoveCable};
pub use interval::{CreateIntervalAndEndEvent, CreateIntervalBetween, RemoveInterval};
pub use move_event::MoveEvent;
pub use process::{AddProcess, RemoveProcess};
pub use rename::Rename;
pub use script::EditScript;
