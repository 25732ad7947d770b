//! Independent check that a predecessor really evolves into its target

use crate::error::{GolError, Result};
use crate::game_of_life::{GameOfLifeRules, Grid};
use std::fmt;

/// A cell whose evolved state disagrees with the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    pub cell_position: (usize, usize),
    /// State the rules produce from the predecessor
    pub expected_state: bool,
    /// State recorded in the target
    pub actual_state: bool,
    pub predecessor_state: bool,
    pub neighbor_count: u8,
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (row, col) = self.cell_position;
        write!(
            f,
            "cell ({}, {}) should be {} but target has it {} (predecessor: {}, neighbors: {})",
            row,
            col,
            state_name(self.expected_state),
            state_name(self.actual_state),
            state_name(self.predecessor_state),
            self.neighbor_count
        )
    }
}

fn state_name(alive: bool) -> &'static str {
    if alive {
        "alive"
    } else {
        "dead"
    }
}

/// Outcome of validating one predecessor/target pair
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub rule_violations: Vec<RuleViolation>,
    pub cells_checked: usize,
}

impl ValidationResult {
    /// Short description of the first few violations
    pub fn error_message(&self) -> Option<String> {
        if self.is_valid {
            return None;
        }

        let mut message = format!("{} cells disagree with the target", self.rule_violations.len());
        for (i, violation) in self.rule_violations.iter().take(3).enumerate() {
            message.push_str(if i == 0 { ": " } else { "; " });
            message.push_str(&violation.to_string());
        }
        if self.rule_violations.len() > 3 {
            message.push_str(&format!("; ... and {} more", self.rule_violations.len() - 3));
        }
        Some(message)
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Result: {}", if self.is_valid { "VALID" } else { "INVALID" })?;
        writeln!(f, "Cells checked: {}", self.cells_checked)?;
        writeln!(f, "Rule violations: {}", self.rule_violations.len())?;
        for violation in &self.rule_violations {
            writeln!(f, "  - {}", violation)?;
        }
        Ok(())
    }
}

/// Stateless validator applying the forward rule cell by cell
#[derive(Debug, Clone, Copy, Default)]
pub struct SolutionValidator;

impl SolutionValidator {
    pub fn new() -> Self {
        Self
    }

    /// Compare one step of `predecessor` with `target`.
    ///
    /// Grids of different shapes are an error rather than an invalid result.
    pub fn validate(&self, predecessor: &Grid, target: &Grid) -> Result<ValidationResult> {
        if !predecessor.same_shape(target) {
            return Err(GolError::DimensionMismatch {
                expected_height: target.height(),
                expected_width: target.width(),
                height: predecessor.height(),
                width: predecessor.width(),
            });
        }

        let rule_violations = self.violations(predecessor, target);
        Ok(ValidationResult {
            is_valid: rule_violations.is_empty(),
            rule_violations,
            cells_checked: target.cell_count(),
        })
    }

    /// Whether one step of `predecessor` equals `target`
    pub fn quick_validate(&self, predecessor: &Grid, target: &Grid) -> bool {
        GameOfLifeRules::is_predecessor(predecessor, target)
    }

    fn violations(&self, predecessor: &Grid, target: &Grid) -> Vec<RuleViolation> {
        let mut violations = Vec::new();

        for row in 0..target.height() {
            for col in 0..target.width() {
                let predecessor_state = predecessor.get(row, col);
                let neighbor_count = predecessor.count_neighbors(row, col);
                let expected_state = GameOfLifeRules::should_be_alive(predecessor_state, neighbor_count);
                let actual_state = target.get(row, col);

                if expected_state != actual_state {
                    violations.push(RuleViolation {
                        cell_position: (row, col),
                        expected_state,
                        actual_state,
                        predecessor_state,
                        neighbor_count,
                    });
                }
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::parse_grid_from_string;

    fn grid(text: &str) -> Grid {
        parse_grid_from_string(text).unwrap()
    }

    #[test]
    fn test_valid_blinker_evolution() {
        let predecessor = grid("00000\n00100\n00100\n00100\n00000");
        let target = grid("00000\n00000\n01110\n00000\n00000");

        let result = SolutionValidator::new().validate(&predecessor, &target).unwrap();
        assert!(result.is_valid);
        assert!(result.rule_violations.is_empty());
        assert_eq!(result.cells_checked, 25);
        assert!(result.error_message().is_none());
    }

    #[test]
    fn test_rule_violation_detection() {
        // A lone cell dies, so a target keeping it alive is wrong at exactly that cell
        let predecessor = grid("0000\n0100\n0000\n0000");
        let target = predecessor.clone();

        let result = SolutionValidator::new().validate(&predecessor, &target).unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.rule_violations.len(), 1);

        let violation = &result.rule_violations[0];
        assert_eq!(violation.cell_position, (1, 1));
        assert_eq!(violation.neighbor_count, 0);
        assert!(!violation.expected_state);
        assert!(violation.actual_state);
        assert!(violation.predecessor_state);
        assert!(result.error_message().unwrap().contains("cell (1, 1)"));
    }

    #[test]
    fn test_empty_grid_cannot_reach_live_target() {
        let predecessor = Grid::new(3, 3).unwrap();
        let target = grid("000\n010\n000");

        let validator = SolutionValidator::new();
        assert!(!validator.quick_validate(&predecessor, &target));
        assert!(validator.quick_validate(&predecessor, &predecessor));
    }

    #[test]
    fn test_dimension_mismatch() {
        let predecessor = Grid::new(3, 3).unwrap();
        let target = Grid::new(4, 4).unwrap();

        let err = SolutionValidator::new().validate(&predecessor, &target).unwrap_err();
        assert!(matches!(err, GolError::DimensionMismatch { expected_height: 4, height: 3, .. }));
    }
}
