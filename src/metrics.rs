use std::fmt;

/// Final results of a completed test
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Metrics {
    pub wpm: u32,
    pub accuracy_percent: f64,
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WPM: {} | Accuracy: {:.1}%",
            self.wpm, self.accuracy_percent
        )
    }
}

pub fn word_count(sample: &str) -> usize {
    sample.split_whitespace().count()
}

/// Number of overlapping positions where `input` matches `sample`
pub fn correct_chars(sample: &str, input: &str) -> usize {
    sample
        .chars()
        .zip(input.chars())
        .filter(|(expected, typed)| expected == typed)
        .count()
}

pub fn compute(sample: &str, input: &str, elapsed_seconds: f64) -> Metrics {
    let minutes = elapsed_seconds / 60.0;
    let wpm = if elapsed_seconds > 0.0 {
        (word_count(sample) as f64 / minutes).floor() as u32
    } else {
        0
    };

    let sample_len = sample.chars().count();
    let accuracy_percent = match sample_len {
        0 => 0.0,
        len => correct_chars(sample, input) as f64 / len as f64 * 100.0,
    };

    Metrics {
        wpm,
        accuracy_percent,
    }
}
