pub mod app;
pub mod services;
pub mod ui;

pub use app::App;

use crossterm::{
    cursor,
    event::{DisableBracketedPaste, DisableMouseCapture},
    terminal::{self, LeaveAlternateScreen},
};

/// Puts the terminal back into cooked mode so the panic report is readable.
/// Does nothing when the UI never took over the terminal.
pub fn destruct_terminal_for_panic() {
    if !terminal::is_raw_mode_enabled().unwrap_or(false) {
        return;
    }
    let _ = terminal::disable_raw_mode();
    let _ = crossterm::execute!(
        std::io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste,
        cursor::Show
    );
}
