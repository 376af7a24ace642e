use std::path::Path;

use colored::*;

pub fn print_error(description: &str) {
    eprintln!("{}: {}", "Error".bold().red(), description);
}

pub fn print_warning(description: &str) {
    eprintln!("{}: {}", "Warning".bold().yellow(), description);
}

pub fn print_info_1(message: &str) {
    println!("{} {}", "::".blue(), message);
}

pub fn print_info_2(message: &str) {
    println!("{} {}", "->".blue(), message);
}

/// Report a single env vars file copy
pub fn print_copied(src: &Path, dest: &Path) {
    print_info_2(&format!(
        "Copied {} to {}",
        src.display(),
        dest.display().to_string().bold()
    ));
}
