// src/report/mod.rs
//! Everything between a raw response and what the user sees

pub mod celebration;
pub mod classifier;
pub mod model;
pub mod render;
pub mod tabs;

pub use celebration::{Celebration, CelebrationTrigger, ConfettiBurst, TerminalConfetti};
pub use classifier::{Component, Tier};
pub use model::{AnalysisReport, ContactValue, Score};
pub use render::ReportRenderer;
pub use tabs::{ActiveTab, TabChanged, TabViewController};
