//! Application UI. For now, this is progress bars and the occasional
//! question.

use std::{
    io::{self, BufRead as _, Write as _},
    sync::Arc,
    time::Duration,
};

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// How to label a progress bar.
pub struct ProgressConfig<'a> {
    /// Shown to the left of the bar.
    pub emoji: &'a str,
    /// Shown while we're working.
    pub msg: &'a str,
    /// Shown once we're done.
    pub done_msg: &'a str,
}

/// Application UI state.
#[derive(Clone)]
pub struct Ui {
    /// Our progress bars.
    multi_progress: Arc<MultiProgress>,
}

impl Ui {
    /// Create a new UI. This sets up logging and progress bars.
    pub fn init() -> Ui {
        // Wrapping the logger so it cooperates with progress bars does not
        // work reliably, so log lines may occasionally tear a bar.
        env_logger::init();

        let multi_progress = Arc::new(MultiProgress::new());
        Ui { multi_progress }
    }

    /// Create a UI which draws nothing.
    pub fn init_for_tests() -> Ui {
        let _ = env_logger::builder().is_test(true).try_init();
        let multi_progress =
            Arc::new(MultiProgress::with_draw_target(ProgressDrawTarget::hidden()));
        Ui { multi_progress }
    }

    /// Create a new progress bar with default settings.
    pub fn new_progress_bar(&self, config: &ProgressConfig<'_>, len: u64) -> ProgressBar {
        let pb = ProgressBar::new(len).with_style(default_progress_style());
        let pb = self.multi_progress.add(pb);
        pb.set_prefix(config.emoji.to_owned());
        pb.set_message(config.msg.to_owned());
        pb.enable_steady_tick(Duration::from_secs(1));
        pb
    }

    /// Mark a progress bar as finished.
    pub fn finish(&self, config: &ProgressConfig<'_>, pb: ProgressBar) {
        pb.finish_with_message(config.done_msg.to_owned());
    }

    /// Print something without corrupting our progress bars.
    pub fn println(&self, msg: &str) {
        if self.multi_progress.println(msg).is_err() {
            println!("{}", msg);
        }
    }

    /// Ask a yes/no question on the terminal. Anything but "y" or "yes" is
    /// treated as "no".
    pub fn confirm(&self, question: &str) -> io::Result<bool> {
        print!("{} [y/n]: ", question);
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(is_yes(&answer))
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

pub(crate) fn default_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("  {prefix:3}{msg:25} {pos:>4}/{len:4} {elapsed_precise} {wide_bar:.cyan/blue} {eta_precise}")
        .expect("bad progress bar template")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn hidden_progress_bars_work() {
        let ui = Ui::init_for_tests();
        let config = ProgressConfig {
            emoji: "🧪",
            msg: "Testing",
            done_msg: "Tested",
        };
        let pb = ui.new_progress_bar(&config, 2);
        pb.inc(2);
        assert_eq!(pb.position(), 2);
        ui.finish(&config, pb);
    }
}
