use brainbloom_core::session::{classify, matched_phrases};
use colored::Colorize;

pub fn run(text: &str) {
    let classification = classify(text);
    if !classification.is_crisis {
        println!("{}", "normal".bright_green());
        return;
    }

    let matched = matched_phrases(text);
    println!("{} (matched: {})", "crisis".bright_red().bold(), matched.join(", "));
    if let Some(alert) = classification.alert() {
        println!("  {} {}", alert.level.as_ref().red(), alert.message);
    }
}
