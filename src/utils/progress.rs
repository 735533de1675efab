use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while the suite talks to the server; hidden when disabled
#[derive(Debug)]
pub struct ProgressBar {
    inner: Option<IndicatifBar>,
}

impl ProgressBar {
    pub fn new_spinner(enabled: bool) -> Self {
        if !enabled {
            return Self { inner: None };
        }
        let bar = IndicatifBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
            bar.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
        }
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { inner: Some(bar) }
    }

    pub fn set_message<S: Into<String>>(&self, msg: S) {
        if let Some(ref bar) = self.inner {
            bar.set_message(msg.into());
        }
    }

    pub fn finish_and_clear(&self) {
        if let Some(ref bar) = self.inner {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_api() {
        let pb = ProgressBar::new_spinner(true);
        pb.set_message("create-bucket");
        pb.finish_and_clear();

        let hidden = ProgressBar::new_spinner(false);
        hidden.set_message("ignored");
        hidden.finish_and_clear();
    }
}
