// src/report/celebration.rs
//! Confetti on a good score, once per successful submission

use colored::Colorize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;

use crate::core::submission::{StateKind, Transition, TransitionObserver};

pub const CELEBRATION_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfettiBurst {
    pub particle_count: usize,
    pub spread: usize,
    pub origin_y: f64,
}

impl Default for ConfettiBurst {
    fn default() -> Self {
        Self {
            particle_count: 100,
            spread: 70,
            origin_y: 0.6,
        }
    }
}

impl ConfettiBurst {
    const GLYPHS: [char; 6] = ['*', '+', 'o', '.', '~', '^'];
    const ROWS: usize = 5;

    /// Lay the particles out on a `spread` columns wide strip. The origin
    /// decides how many empty rows sit above the burst.
    pub fn layout(&self) -> Vec<String> {
        let width = self.spread.max(1);
        let lead = ((1.0 - self.origin_y.clamp(0.0, 1.0)) * Self::ROWS as f64).round() as usize;
        let mut rows = vec![vec![' '; width]; lead + Self::ROWS];

        for i in 0..self.particle_count {
            // Cheap scatter: a multiplicative hash keeps the pattern stable.
            let h = i.wrapping_mul(2_654_435_761) >> 7;
            let row = lead + h % Self::ROWS;
            let col = (h / Self::ROWS) % width;
            rows[row][col] = Self::GLYPHS[i % Self::GLYPHS.len()];
        }

        rows.into_iter().map(|r| r.into_iter().collect()).collect()
    }
}

/// The visible effect. Kept behind a trait so the trigger can be observed
/// without a terminal.
pub trait Celebration: Send + Sync {
    fn celebrate(&self, burst: &ConfettiBurst);
}

pub struct TerminalConfetti;

impl Celebration for TerminalConfetti {
    fn celebrate(&self, burst: &ConfettiBurst) {
        for line in burst.layout() {
            let colored_line: String = line
                .chars()
                .enumerate()
                .map(|(i, c)| match i % 4 {
                    0 => c.to_string().magenta().to_string(),
                    1 => c.to_string().yellow().to_string(),
                    2 => c.to_string().cyan().to_string(),
                    _ => c.to_string().green().to_string(),
                })
                .collect();
            println!("{}", colored_line);
        }
    }
}

/// Fires the effect on each transition into `Succeeded` whose total is at
/// least [`CELEBRATION_THRESHOLD`]. Reads of the state never fire it.
pub struct CelebrationTrigger {
    effect: Arc<dyn Celebration>,
    burst: ConfettiBurst,
    fired: AtomicUsize,
}

impl CelebrationTrigger {
    pub fn new(effect: Arc<dyn Celebration>) -> Self {
        Self {
            effect,
            burst: ConfettiBurst::default(),
            fired: AtomicUsize::new(0),
        }
    }

    pub fn fired(&self) -> usize {
        self.fired.load(Ordering::SeqCst)
    }
}

impl TransitionObserver for CelebrationTrigger {
    fn on_transition(&self, transition: &Transition<'_>) {
        if !transition.entered(StateKind::Succeeded) {
            return;
        }
        let Some(total) = transition.to.report().and_then(|r| r.total().value()) else {
            return;
        };
        if total >= CELEBRATION_THRESHOLD {
            info!("Score {} reached the celebration threshold", total);
            self.fired.fetch_add(1, Ordering::SeqCst);
            self.effect.celebrate(&self.burst);
        }
    }
}
