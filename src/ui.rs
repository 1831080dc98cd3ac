use colored::ColoredString;
use std::io::{self, IsTerminal, Write};

/// write one colored line to stdout, ignoring broken pipes
pub fn out_line(text: &ColoredString) {
    let _ = writeln!(io::stdout(), "{text}");
}

/// write one colored line to stderr
pub fn err_line(text: &ColoredString) {
    let _ = writeln!(io::stderr(), "{text}");
}

/// true when both ends of the session are attached to a terminal
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

#[macro_export]
macro_rules! warning {
    ($fmt:literal $(, $($arg:tt)*)?) => {{
        use colored::Colorize;
        $crate::ui::err_line(&format!($fmt $(, $($arg)*)?).yellow());
    }};
    ($expr:expr) => {{
        use colored::Colorize;
        $crate::ui::err_line(&format!("{}", $expr).yellow());
    }};
}

#[macro_export]
macro_rules! error {
    ($fmt:literal $(, $($arg:tt)*)?) => {{
        use colored::Colorize;
        $crate::ui::err_line(&format!($fmt $(, $($arg)*)?).red());
    }};
    ($expr:expr) => {{
        use colored::Colorize;
        $crate::ui::err_line(&format!("{}", $expr).red());
    }};
}

#[macro_export]
macro_rules! status {
    ($fmt:literal $(, $($arg:tt)*)?) => {{
        use colored::Colorize;
        $crate::ui::out_line(&format!($fmt $(, $($arg)*)?).green());
    }};
    ($expr:expr) => {{
        use colored::Colorize;
        $crate::ui::out_line(&format!("{}", $expr).green());
    }};
}

#[macro_export]
macro_rules! info {
    () => {{
        use std::io::{self, Write};
        let _ = writeln!(io::stdout());
    }};
    ($fmt:literal $(, $($arg:tt)*)?) => {{
        use colored::Colorize;
        $crate::ui::out_line(&format!($fmt $(, $($arg)*)?).normal());
    }};
    ($expr:expr) => {{
        use colored::Colorize;
        $crate::ui::out_line(&format!("{}", $expr).normal());
    }};
}

/// dimmed trace output, only printed when `$on` is true (--verbose)
#[macro_export]
macro_rules! debug {
    ($on:expr, $fmt:literal $(, $($arg:tt)*)?) => {{
        if $on {
            use colored::Colorize;
            $crate::ui::err_line(&format!($fmt $(, $($arg)*)?).dimmed());
        }
    }};
}
