pub mod report;
pub mod runner;
pub mod script;

pub use report::RunReport;
pub use runner::HeadlessRunner;
pub use script::{InfectEvent, InputScript, PauseWindow, PokeEvent, ScriptError};
