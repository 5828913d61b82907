use rand::Rng;
use std::collections::BTreeSet;

use crate::words::WordBank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Active,
    Won,
    Lost,
}

/// What a call to [`WordSession::apply_guess`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Not a letter.
    Rejected,
    /// Already guessed, or the game is over.
    Ignored,
    /// The letter occurs `positions` times in the secret.
    Hit { positions: usize },
    Miss,
}

/// One round of hangman: the secret word and everything guessed so far.
///
/// `revealed` has one slot per letter of the secret; `None` is a blank.
/// Once the phase leaves [`Phase::Active`] nothing changes until the
/// session is replaced by [`WordSession::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSession {
    category: String,
    secret: Vec<char>,
    revealed: Vec<Option<char>>,
    guessed: BTreeSet<char>,
    wrong_count: u32,
    move_count: u32,
    phase: Phase,
    loss_threshold: u32,
}

impl WordSession {
    pub fn new(category: impl Into<String>, word: &str, loss_threshold: u32) -> Self {
        let secret: Vec<char> = word.chars().map(|c| c.to_ascii_lowercase()).collect();
        assert!(
            !secret.is_empty() && secret.iter().all(|c| c.is_ascii_lowercase()),
            "secret word must be non-empty ASCII letters, got {word:?}"
        );
        assert!(loss_threshold > 0, "loss threshold must be positive");

        Self {
            category: category.into(),
            revealed: vec![None; secret.len()],
            secret,
            guessed: BTreeSet::new(),
            wrong_count: 0,
            move_count: 0,
            phase: Phase::Active,
            loss_threshold,
        }
    }

    pub fn random<R: Rng + ?Sized>(bank: &WordBank, rng: &mut R, loss_threshold: u32) -> Self {
        let (category, word) = bank.choose(rng);
        Self::new(category, word, loss_threshold)
    }

    /// Replaces this session with a fresh one drawn from `bank`.
    pub fn reset<R: Rng + ?Sized>(&mut self, bank: &WordBank, rng: &mut R) {
        *self = Self::random(bank, rng, self.loss_threshold);
    }

    pub fn apply_guess(&mut self, letter: char) -> GuessOutcome {
        if !letter.is_ascii_alphabetic() {
            return GuessOutcome::Rejected;
        }
        let letter = letter.to_ascii_lowercase();
        if self.phase != Phase::Active || self.guessed.contains(&letter) {
            return GuessOutcome::Ignored;
        }

        self.guessed.insert(letter);

        assert_eq!(
            self.secret.len(),
            self.revealed.len(),
            "revealed slots out of step with the secret"
        );
        let mut positions = 0;
        for (slot, _) in self
            .revealed
            .iter_mut()
            .zip(&self.secret)
            .filter(|(_, s)| **s == letter)
        {
            *slot = Some(letter);
            positions += 1;
        }

        if positions == 0 {
            self.wrong_count += 1;
        }
        self.move_count += 1;

        assert!(
            self.wrong_count <= self.loss_threshold,
            "wrong count {} passed the loss threshold {}",
            self.wrong_count,
            self.loss_threshold
        );

        if self.revealed.iter().all(Option::is_some) {
            self.phase = Phase::Won;
        } else if self.wrong_count >= self.loss_threshold {
            self.phase = Phase::Lost;
        }

        if positions == 0 {
            GuessOutcome::Miss
        } else {
            GuessOutcome::Hit { positions }
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn secret(&self) -> String {
        self.secret.iter().collect()
    }

    pub fn revealed(&self) -> &[Option<char>] {
        &self.revealed
    }

    /// The word as shown to the player, e.g. `c _ t`.
    pub fn masked(&self) -> String {
        itertools::join(self.revealed.iter().map(|s| s.unwrap_or('_')), " ")
    }

    /// Guessed letters in alphabetical order.
    pub fn guessed(&self) -> Vec<char> {
        self.guessed.iter().copied().collect()
    }

    pub fn has_guessed(&self, letter: char) -> bool {
        self.guessed.contains(&letter.to_ascii_lowercase())
    }

    pub fn wrong_count(&self) -> u32 {
        self.wrong_count
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn loss_threshold(&self) -> u32 {
        self.loss_threshold
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }
}
