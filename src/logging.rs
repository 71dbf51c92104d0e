//! Diagnostic output
//!
//! Messages go to `esp-println` when the `esp32-log` feature is enabled.
//! Without it the arguments are still type-checked but nothing is emitted.

#[cfg(feature = "esp32-log")]
macro_rules! log {
    ($($arg:tt)*) => {
        esp_println::println!($($arg)*)
    };
}

#[cfg(not(feature = "esp32-log"))]
macro_rules! log {
    ($($arg:tt)*) => {{
        let _ = ::core::format_args!($($arg)*);
    }};
}

pub(crate) use log;
