//! Terminal setup and restoration

use ratatui::DefaultTerminal;

/// Enter the alternate screen in raw mode
///
/// A panic anywhere afterwards restores the terminal before the panic
/// message is printed.
pub fn init() -> DefaultTerminal {
    install_panic_hook();
    ratatui::init()
}

/// Leave the alternate screen and raw mode
pub fn restore() {
    ratatui::restore();
}

fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore();
        original_hook(panic_info);
    }));
}
