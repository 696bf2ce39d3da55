use itertools::{EitherOrBoth, Itertools};

/// How a single typed position compares against the sample text
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum CharState {
    Correct,
    Incorrect,
    /// typed past the end of the sample
    Extra,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharProgress {
    pub index: usize,
    pub state: CharState,
}

/// Result of comparing the current input against the sample text.
///
/// `classifications` has one entry per typed character, in order. Positions
/// the user has not reached yet are not listed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub classifications: Vec<CharProgress>,
    pub completed: bool,
}

impl Evaluation {
    pub fn state_at(&self, index: usize) -> Option<CharState> {
        self.classifications.get(index).map(|p| p.state)
    }

    pub fn correct_count(&self) -> usize {
        self.count(CharState::Correct)
    }

    pub fn incorrect_count(&self) -> usize {
        self.count(CharState::Incorrect)
    }

    pub fn extra_count(&self) -> usize {
        self.count(CharState::Extra)
    }

    /// Index of the first position that is not `Correct`
    pub fn first_mismatch(&self) -> Option<usize> {
        self.classifications
            .iter()
            .find(|p| p.state != CharState::Correct)
            .map(|p| p.index)
    }

    fn count(&self, state: CharState) -> usize {
        self.classifications
            .iter()
            .filter(|p| p.state == state)
            .count()
    }
}

/// Classify every typed character against `sample`.
///
/// Positions are counted in chars, not bytes.
pub fn evaluate(sample: &str, input: &str) -> Evaluation {
    let classifications = sample
        .chars()
        .zip_longest(input.chars())
        .enumerate()
        .filter_map(|(index, pair)| {
            let state = match pair {
                EitherOrBoth::Both(expected, typed) if expected == typed => CharState::Correct,
                EitherOrBoth::Both(_, _) => CharState::Incorrect,
                EitherOrBoth::Right(_) => CharState::Extra,
                EitherOrBoth::Left(_) => return None,
            };
            Some(CharProgress { index, state })
        })
        .collect();

    Evaluation {
        classifications,
        completed: input == sample,
    }
}
