use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;
use std::sync::OnceLock;

use crate::detector::DetectorError;

static INIT: OnceLock<Result<(), String>> = OnceLock::new();

/// ONNX Runtime settings for the inference session.
#[derive(Debug)]
pub struct RuntimeConfig {
    pub inter_threads: usize,
    pub intra_threads: usize,
    pub optimization_level: GraphOptimizationLevel,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            inter_threads: 0, // Let ONNX Runtime decide
            intra_threads: 0, // Let ONNX Runtime decide
            optimization_level: GraphOptimizationLevel::Level3,
        }
    }
}

fn copy_level(level: &GraphOptimizationLevel) -> GraphOptimizationLevel {
    match level {
        GraphOptimizationLevel::Level1 => GraphOptimizationLevel::Level1,
        GraphOptimizationLevel::Level2 => GraphOptimizationLevel::Level2,
        GraphOptimizationLevel::Level3 => GraphOptimizationLevel::Level3,
        GraphOptimizationLevel::Disable => GraphOptimizationLevel::Disable,
    }
}

// GraphOptimizationLevel is not Clone
impl Clone for RuntimeConfig {
    fn clone(&self) -> Self {
        Self {
            inter_threads: self.inter_threads,
            intra_threads: self.intra_threads,
            optimization_level: copy_level(&self.optimization_level),
        }
    }
}

impl RuntimeConfig {
    /// Maps a CLI level (0 disables, 1-3 select a level) onto ONNX Runtime levels.
    pub fn with_optimization(mut self, level: u8) -> Result<Self, DetectorError> {
        self.optimization_level = match level {
            0 => GraphOptimizationLevel::Disable,
            1 => GraphOptimizationLevel::Level1,
            2 => GraphOptimizationLevel::Level2,
            3 => GraphOptimizationLevel::Level3,
            other => {
                return Err(DetectorError::ValidationError(format!(
                    "Optimization level must be 0-3, got {}",
                    other
                )))
            }
        };
        Ok(self)
    }

    pub fn with_intra_threads(mut self, threads: usize) -> Self {
        self.intra_threads = threads;
        self
    }
}

fn init_onnx_environment() -> ort::Result<()> {
    ort::init()
        .with_name("component-detector")
        .commit()?;
    Ok(())
}

/// Initializes the process-wide ONNX Runtime environment once.
pub fn ensure_initialized() -> Result<(), DetectorError> {
    INIT.get_or_init(|| init_onnx_environment().map_err(|e| e.to_string()))
        .clone()
        .map_err(DetectorError::LoadError)
}

pub fn create_session_builder(config: &RuntimeConfig) -> Result<SessionBuilder, DetectorError> {
    ensure_initialized()?;
    let mut builder = Session::builder()?;

    if config.inter_threads > 0 {
        builder = builder.with_inter_threads(config.inter_threads)?;
    }
    if config.intra_threads > 0 {
        builder = builder.with_intra_threads(config.intra_threads)?;
    }
    builder = builder.with_optimization_level(copy_level(&config.optimization_level))?;

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimization_levels() {
        let config = RuntimeConfig::default().with_optimization(1).unwrap();
        assert!(matches!(config.optimization_level, GraphOptimizationLevel::Level1));
        let config = config.with_optimization(0).unwrap();
        assert!(matches!(config.clone().optimization_level, GraphOptimizationLevel::Disable));
        assert!(RuntimeConfig::default().with_optimization(7).is_err());
    }

    #[test]
    fn test_clone_keeps_threads() {
        let config = RuntimeConfig::default().with_intra_threads(2);
        assert_eq!(config.clone().intra_threads, 2);
    }
}
