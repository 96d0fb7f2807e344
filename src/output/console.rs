//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Kemono Downloader                                 ║
║     Profile post downloader for kemono.su / coomer.su ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(profiles: &[String], mode: &str, range: &str, download_dir: &str) {
    println!();
    println!("{}", style("Configuration:").bold());
    if !profiles.is_empty() {
        println!("  Profiles:  {}", profiles.join(", "));
    }
    println!("  Mode:      {}", mode);
    println!("  Range:     {}", range);
    println!("  Directory: {}", download_dir);
    println!();
}
