// Library root: re-exports the app orchestrator and the TUI so the binary
// and integration tests share one code path.

pub mod app;
pub mod tui;
