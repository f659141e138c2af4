use colored::Colorize;

pub fn display_success(message: &str) {
    println!("{} {}", "Success:".green().bold(), message);
}

pub fn display_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "Warning:".yellow().bold(), message);
}

pub fn display_info(message: &str) {
    println!("{} {}", "Info:".cyan(), message);
}

/// `₦12,500`
pub fn format_naira(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if whole < 0 { "-" } else { "" };
    format!("{}₦{}", sign, grouped)
}
