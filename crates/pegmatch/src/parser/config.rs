use crate::strategy::{GuardConfig, StrategyKind};

/// Configuration options for a [`Parser`](super::Parser).
///
/// # Example
///
/// ```rust
/// use pegmatch::parser::ParserConfig;
/// use pegmatch::strategy::{GuardConfig, StrategyKind};
///
/// // Use default configuration
/// let config = ParserConfig::default();
/// assert_eq!(config.mode, StrategyKind::Diagnostic);
///
/// // Or customize it
/// let config = ParserConfig {
///     mode: StrategyKind::Fast,
///     guard: GuardConfig {
///         max_rules: 1_000_000,
///         max_nesting: 1_000,
///     },
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Strategy every rule invocation goes through
    pub mode: StrategyKind,

    /// Limits on rule invocations and nesting depth
    pub guard: GuardConfig,
}

impl ParserConfig {
    /// Default limits with the given strategy
    #[must_use]
    pub fn with_mode(mode: StrategyKind) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}
