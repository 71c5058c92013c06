pub fn set_panic_hook() {
    // We call this once during initialization so that panics show up in the
    // browser console with a readable message instead of `unreachable`.
    //
    // For more details see
    // https://github.com/rustwasm/console_error_panic_hook#readme
    console_error_panic_hook::set_once();
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Level {
    Log,
    Warn,
    Error,
}

#[cfg(target_arch = "wasm32")]
pub fn console_write(level: Level, msg: &str) {
    let value = wasm_bindgen::JsValue::from_str(msg);
    match level {
        Level::Log => web_sys::console::log_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Error => web_sys::console::error_1(&value),
    }
}

// Host builds (unit tests) have no console to talk to.
#[cfg(not(target_arch = "wasm32"))]
pub fn console_write(level: Level, msg: &str) {
    eprintln!("[{:?}] {}", level, msg);
}

macro_rules! console_log {
    ($($t:tt)*) => {
        $crate::utils::console_write($crate::utils::Level::Log, &format!($($t)*))
    };
}

macro_rules! console_warn {
    ($($t:tt)*) => {
        $crate::utils::console_write($crate::utils::Level::Warn, &format!($($t)*))
    };
}

macro_rules! console_error {
    ($($t:tt)*) => {
        $crate::utils::console_write($crate::utils::Level::Error, &format!($($t)*))
    };
}
