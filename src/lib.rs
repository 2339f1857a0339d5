pub mod aggregate;
pub mod config;
pub mod domain_utils;
pub mod engine;
pub mod error;
pub mod extraction;
pub mod features;
pub mod recommendations;
pub mod report;
pub mod services;

pub use aggregate::{AggregateResult, Aggregator, RiskTier, ServiceUsage};
pub use config::{Config, IndicatorCategory};
pub use engine::ScamAnalyzer;
pub use error::{AnalysisError, ConfigError, ServiceError};
pub use extraction::{EntityExtractor, ExtractedEntities};
pub use features::{FeatureEngine, IndicatorHit, LocalAnalysis};
pub use report::{ReportFormatter, StructuredReport};
pub use services::{ServiceCallResult, ServiceKind, ServiceOrchestrator, ServiceStatus};
