/// Failures surfaced by the engine.
///
/// Everything else the engine does is total: guarded commands that are not
/// allowed in the current state are silently ignored instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifeError {
    /// Invalid configuration; the simulation cannot start.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A direct cell access outside `[0, rows) x [0, cols)`.
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    Index {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

pub type Result<T> = std::result::Result<T, LifeError>;
