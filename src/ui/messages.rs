use ansi_term::Colour::{Blue, Cyan, Green, Red, Yellow};
use ansi_term::Style;
use std::fmt;

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";
const ICON_DETAIL: &str = "•";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{} {}", Blue.bold().paint(ICON_INFO), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", Green.bold().paint(ICON_OK), msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{} {}", Yellow.bold().paint(ICON_WARN), msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", Red.bold().paint(ICON_ERR), msg);
}

/// Riga secondaria (un record aggiunto / saltato), indentata.
pub fn detail<T: fmt::Display>(msg: T) {
    println!("   {} {}", Cyan.paint(ICON_DETAIL), msg);
}

/// Section header, one per fireman
pub fn header<T: fmt::Display>(msg: T) {
    println!(
        "{}",
        Blue.bold()
            .paint(format!("====================== {msg}"))
    );
}

/// Closing separator printed after each fireman.
pub fn separator() {
    println!("{}\n", Style::new().dimmed().paint("--------------------------------"));
}
