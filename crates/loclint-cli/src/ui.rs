// Macros for console output with status icons.

#[macro_export]
macro_rules! ui_ok {
    ($($arg:tt)*) => {{
        println!("✔ {}", format!($($arg)*));
    }};
}

#[macro_export]
macro_rules! ui_info {
    ($($arg:tt)*) => {{
        eprintln!("ℹ {}", format!($($arg)*));
    }};
}

#[macro_export]
macro_rules! ui_warn {
    ($($arg:tt)*) => {{
        eprintln!("⚠ {}", format!($($arg)*));
    }};
}

#[macro_export]
macro_rules! ui_err {
    ($($arg:tt)*) => {{
        eprintln!("✖ {}", format!($($arg)*));
    }};
}

#[macro_export]
macro_rules! ui_out {
    ($($arg:tt)*) => {{
        println!($($arg)*);
    }};
}
