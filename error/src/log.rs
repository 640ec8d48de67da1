use lazy_static::lazy_static;
use std::sync::atomic::{AtomicBool, Ordering};

lazy_static! {
    static ref ENABLED: AtomicBool = AtomicBool::new(false);
}

pub fn enable() {
    ENABLED.store(true, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

#[macro_export]
macro_rules! log {
    (solver, $($token:tt)*) => (
        $crate::log!(@tagged "solver", on_blue, $($token)*)
    );
    (codegen, $($token:tt)*) => (
        $crate::log!(@tagged "codegen", on_green, $($token)*)
    );
    (lower, $($token:tt)*) => (
        $crate::log!(@tagged "lower", on_cyan, $($token)*)
    );
    (@tagged $tag:literal, $color:ident, $($token:tt)*) => (
        if $crate::log::is_enabled() {
            use $crate::colored::Colorize;

            eprintln!("<{}> [{}] {}", "LOG".black().on_purple(), $tag.black().$color(), format_args!($($token)*));
        }
    );
    ($($token:tt)*) => (
        if $crate::log::is_enabled() {
            use $crate::colored::Colorize;

            eprintln!("<{}> {}", "LOG".black().on_purple(), format_args!($($token)*));
        }
    );
}
