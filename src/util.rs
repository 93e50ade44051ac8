use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str =
    "[{spinner:.green} {elapsed_precise}] {bar:40.cyan/blue} {pos:>3}% {msg}";

pub(crate) fn create_progress_bar(total_steps: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total_steps);

    if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(msg.to_owned());

    pb
}

/// Format bytes as space separated upper case hex
pub(crate) fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
