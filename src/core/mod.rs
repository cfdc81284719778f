//! Core analytics for writing-activity submissions.
//!
//! This module contains:
//! - Telemetry normalization into sorted, validated event lists
//! - Fluency, reading, text-quality analyzers
//! - Cognitive-load, engagement and proficiency estimators
//! - The report pipeline that ties them together

pub mod cognitive;
pub mod engagement;
pub mod fluency;
pub mod normalize;
pub mod proficiency;
pub mod reading;
pub mod report;
pub mod text_quality;
pub mod tokens;

// Re-export commonly used types
pub use cognitive::{CognitiveLoad, LoadLevel};
pub use engagement::{EngagementMetrics, Tier, TieredScore};
pub use fluency::FluencyMetrics;
pub use normalize::{normalize, EventCounts, NormalizedTelemetry, TelemetrySummary};
pub use proficiency::{Proficiency, ProficiencyLevel, WriterProfile};
pub use reading::ReadingMetrics;
pub use report::{AnalysisEngine, BlockingAnalysisEngine, EngineConfig, MetricReport};
pub use text_quality::{EmotionalExpression, TextQualityMetrics, TextStatistics};
