// TUI widget modules for each form zone.

pub mod counters;
pub mod dialog;
pub mod results;
pub mod text_field;
pub mod trigger;
