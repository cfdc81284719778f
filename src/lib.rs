//! Literacy Telemetry - analytics for student writing submissions.
//!
//! This library turns raw interaction capture (keystroke timing, pointer
//! samples, zone changes) plus the submitted text into layered metrics:
//! writing fluency, reading and attention, text quality, linguistic
//! findings, cognitive load, engagement and an overall proficiency level.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Literacy Telemetry                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌──────────────────────────────────────────┐  │
//! │  │ Submission │──▶│ Normalizer                               │  │
//! │  └────────────┘   └──────────────────────────────────────────┘  │
//! │                      │          │           │            │      │
//! │                      ▼          ▼           ▼            ▼      │
//! │                 ┌────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ │
//! │                 │Fluency │ │ Reading │ │ Quality │ │Linguistic│ │
//! │                 └────────┘ └─────────┘ └─────────┘ └──────────┘ │
//! │                      │          │           │            ▲      │
//! │                      ▼          ▼           ▼            │      │
//! │          ┌────────────────┐ ┌────────────┐ ┌───────────┐ │      │
//! │          │ Cognitive load │ │ Engagement │ │Proficiency│ remote │
//! │          └────────────────┘ └────────────┘ └───────────┘ checker│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use literacy_telemetry::{AnalysisEngine, EngineConfig, Submission};
//!
//! let engine = AnalysisEngine::new(EngineConfig::default());
//! let submission = Submission {
//!     text: "Hoje eu fui à escola com vc.".to_string(),
//!     time_spent_ms: 60_000,
//!     ..Default::default()
//! };
//!
//! let report = engine.analyze_local(&submission);
//! assert_eq!(report.linguistic.corrections.len(), 1);
//! ```

pub mod audit;
pub mod capture;
pub mod config;
pub mod core;
pub mod linguistic;

// Re-export key types at crate root for convenience
pub use audit::{AnalysisLog, AnalysisStats};
pub use capture::{InteractionEvent, Submission};
pub use config::{AugmentationConfig, Config, ConfigError};
pub use core::{AnalysisEngine, BlockingAnalysisEngine, EngineConfig, MetricReport};
pub use linguistic::{
    AugmentError, AugmentationStatus, GrammarChecker, Lexicon, LexiconError, RemoteFinding,
};

// LanguageTool client re-export (when enabled)
#[cfg(feature = "remote")]
pub use linguistic::language_tool::{LanguageToolClient, LanguageToolConfig};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
