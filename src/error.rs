//! Error types for labyrinth generation.
//!
//! Application-level failures travel as [`color_eyre`] reports; this module only holds the domain
//! errors that callers may want to match on before turning them into reports.

use thiserror::Error;

/// Errors raised while setting up a labyrinth generator.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GenerationError {
    /// The normalised grid does not hold enough carvable cells to place both a start and an exit.
    #[error("labyrinth of {width}x{height} cells is too small, it needs at least two open cells")]
    TooSmall {
        /// Normalised (odd) width of the rejected grid.
        width: usize,
        /// Normalised (odd) height of the rejected grid.
        height: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_small_message() {
        let err = GenerationError::TooSmall {
            width: 3,
            height: 3,
        };

        assert_eq!(
            err.to_string(),
            "labyrinth of 3x3 cells is too small, it needs at least two open cells"
        );
    }
}
