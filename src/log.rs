//! Logging macros.
//!
//! - `defmt` feature: forwarded to `defmt`
//! - Host unit tests: printed to stdout
//! - Otherwise: compiled out

macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);

        #[cfg(all(test, not(feature = "defmt")))]
        std::println!("[INFO] {}", format_args!($($arg)*));

        #[cfg(not(any(test, feature = "defmt")))]
        let _ = format_args!($($arg)*);
    }};
}

macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(test, not(feature = "defmt")))]
        std::println!("[WARN] {}", format_args!($($arg)*));

        #[cfg(not(any(test, feature = "defmt")))]
        let _ = format_args!($($arg)*);
    }};
}

macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(test, not(feature = "defmt")))]
        std::println!("[DEBUG] {}", format_args!($($arg)*));

        #[cfg(not(any(test, feature = "defmt")))]
        let _ = format_args!($($arg)*);
    }};
}
