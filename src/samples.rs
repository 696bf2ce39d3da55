/// Sentences offered for the test, in the order reset cycles through them
pub const SAMPLE_TEXTS: [&str; 5] = [
    "The quick brown fox jumps over the lazy dog.",
    "Programming is the art of telling another human what one wants the computer to do.",
    "Practice makes perfect. Keep typing to improve your speed and accuracy.",
    "Python is an interpreted, high-level, general-purpose programming language.",
    "Success is not final, failure is not fatal: it is the courage to continue that counts.",
];

/// Index of the sample that follows `current`, wrapping at the end of `list`
pub fn next_sample<T>(list: &[T], current: usize) -> usize {
    if list.is_empty() {
        return 0;
    }
    (current + 1) % list.len()
}

/// Cursor over a fixed list of sample texts
#[derive(Debug, Clone)]
pub struct SampleDeck {
    texts: &'static [&'static str],
    index: usize,
}

impl SampleDeck {
    pub fn new(texts: &'static [&'static str]) -> Self {
        Self { texts, index: 0 }
    }

    /// Start at `index`, wrapped into range
    pub fn with_start(texts: &'static [&'static str], index: usize) -> Self {
        let index = if texts.is_empty() {
            0
        } else {
            index % texts.len()
        };
        Self { texts, index }
    }

    pub fn current(&self) -> &'static str {
        self.texts.get(self.index).copied().unwrap_or_default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn advance(&mut self) -> &'static str {
        self.index = next_sample(self.texts, self.index);
        self.current()
    }
}

impl Default for SampleDeck {
    fn default() -> Self {
        Self::new(&SAMPLE_TEXTS)
    }
}
