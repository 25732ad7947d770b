//! Linear encoding of one reverse Game of Life step
//!
//! Every cell contributes a handful of inequalities over its own predecessor
//! variable `c` and the eight wrapped neighbour variables `N`:
//!
//! * alive target: `ΣN <= 3`, `ΣN - 2c >= 0`, `ΣN + 3c >= 3`, which admit
//!   exactly `(c, ΣN)` in `{(1, 2), (1, 3), (0, 3)}`;
//! * dead target, with a slack `d`: `ΣN + c - 8d <= 2` and `ΣN - 4d >= 0`,
//!   which exclude exactly those three combinations.

use super::model::{LinearConstraint, LinearConstraints, LinearObjective, ObjectiveSense, Relation, VariableType};
use super::variables::VariableIndexMap;
use crate::config::ObjectivePolicy;
use crate::error::Result;
use crate::game_of_life::Grid;
use tracing::debug;

/// A complete program handed to a solver adapter
#[derive(Debug, Clone)]
pub struct EncodedProblem {
    pub index_map: VariableIndexMap,
    pub variable_type: VariableType,
    pub objective: LinearObjective,
    pub constraints: LinearConstraints,
    pub statistics: EncodingStatistics,
}

impl EncodedProblem {
    pub fn num_variables(&self) -> usize {
        self.index_map.num_variables()
    }
}

/// Size of an encoding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodingStatistics {
    pub cell_variables: usize,
    pub slack_variables: usize,
    pub alive_targets: usize,
    pub dead_targets: usize,
    pub total_constraints: usize,
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Encoding Statistics:")?;
        writeln!(f, "  Cell variables: {}", self.cell_variables)?;
        writeln!(f, "  Slack variables: {}", self.slack_variables)?;
        writeln!(f, "  Alive target cells: {} (3 constraints each)", self.alive_targets)?;
        writeln!(f, "  Dead target cells: {} (2 constraints each)", self.dead_targets)?;
        writeln!(f, "  Total constraints: {}", self.total_constraints)?;
        Ok(())
    }
}

/// Builds the constraint system whose solutions are the predecessors of a target
#[derive(Debug, Clone, Default)]
pub struct ConstraintEncoder {
    objective_policy: ObjectivePolicy,
}

impl ConstraintEncoder {
    pub fn new(objective_policy: ObjectivePolicy) -> Self {
        Self { objective_policy }
    }

    /// Encode `target` into a fresh program
    pub fn encode(&self, target: &Grid) -> Result<EncodedProblem> {
        let index_map = VariableIndexMap::new(target.height(), target.width());
        let mut constraints = LinearConstraints::new();
        let mut objective = LinearObjective::new(index_map.num_variables());
        let mut statistics = EncodingStatistics {
            cell_variables: index_map.num_cells(),
            slack_variables: index_map.num_cells(),
            ..Default::default()
        };

        for row in 0..target.height() {
            for col in 0..target.width() {
                let centre = index_map.cell_variable(row, col)?;
                let slack = index_map.slack_variable(row, col)?;
                let neighbours = target
                    .neighbors(row, col)
                    .iter()
                    .map(|&(r, c)| index_map.cell_variable(r, c))
                    .collect::<Result<Vec<usize>>>()?;

                let alive = target.get(row, col);
                if alive {
                    statistics.alive_targets += 1;
                } else {
                    statistics.dead_targets += 1;
                }

                for constraint in cell_constraints(alive, centre, &neighbours, slack) {
                    constraints.add(constraint);
                }

                match self.objective_policy {
                    ObjectivePolicy::None => {}
                    ObjectivePolicy::MaximizeLive => objective.set_coefficient(centre, -1),
                    ObjectivePolicy::MinimizeLive => objective.set_coefficient(centre, 1),
                }
            }
        }
        objective.set_sense(ObjectiveSense::Minimize);
        statistics.total_constraints = constraints.len();

        debug!(
            height = target.height(),
            width = target.width(),
            variables = index_map.num_variables(),
            constraints = constraints.len(),
            "encoded reverse step"
        );

        Ok(EncodedProblem {
            index_map,
            variable_type: VariableType::Binary,
            objective,
            constraints,
            statistics,
        })
    }
}

/// Constraints tying one cell's predecessor neighbourhood to its target value
pub(crate) fn cell_constraints(
    target_alive: bool,
    centre: usize,
    neighbours: &[usize],
    slack: usize,
) -> Vec<LinearConstraint> {
    let sum = |relation, value| {
        LinearConstraint::new(relation, value).with_unit_terms(neighbours.iter().copied())
    };

    if target_alive {
        vec![
            sum(Relation::LessEqual, 3),
            sum(Relation::GreaterEqual, 0).with_coefficient(centre, -2),
            sum(Relation::GreaterEqual, 3).with_coefficient(centre, 3),
        ]
    } else {
        vec![
            sum(Relation::LessEqual, 2)
                .with_coefficient(centre, 1)
                .with_coefficient(slack, -8),
            sum(Relation::GreaterEqual, 0).with_coefficient(slack, -4),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::GameOfLifeRules;

    /// Variables: 0 = centre, 1..=8 = neighbours, 9 = slack
    fn satisfiable_for(target_alive: bool, centre: bool, live_neighbours: usize) -> bool {
        let neighbours: Vec<usize> = (1..=8).collect();
        let constraints = cell_constraints(target_alive, 0, &neighbours, 9);

        [false, true].iter().any(|&slack| {
            let mut assignment = vec![false; 10];
            assignment[0] = centre;
            for v in assignment.iter_mut().skip(1).take(live_neighbours) {
                *v = true;
            }
            assignment[9] = slack;
            constraints.iter().all(|c| c.is_satisfied_by(&assignment))
        })
    }

    #[test]
    fn test_cell_constraints_match_rule_table() {
        for live in 0..=8 {
            for centre in [false, true] {
                let next = GameOfLifeRules::should_be_alive(centre, live as u8);
                assert!(
                    satisfiable_for(next, centre, live),
                    "target {} must admit centre={} sum={}",
                    next,
                    centre,
                    live
                );
                assert!(
                    !satisfiable_for(!next, centre, live),
                    "target {} must reject centre={} sum={}",
                    !next,
                    centre,
                    live
                );
            }
        }
    }

    #[test]
    fn test_exact_coefficients() {
        let neighbours: Vec<usize> = (1..=8).collect();

        let alive = cell_constraints(true, 0, &neighbours, 9);
        assert_eq!(alive.len(), 3);
        assert_eq!((alive[0].relation(), alive[0].value()), (Relation::LessEqual, 3));
        assert_eq!(alive[0].coefficient(0), 0);
        assert_eq!((alive[1].relation(), alive[1].value(), alive[1].coefficient(0)), (Relation::GreaterEqual, 0, -2));
        assert_eq!((alive[2].relation(), alive[2].value(), alive[2].coefficient(0)), (Relation::GreaterEqual, 3, 3));
        assert!(alive.iter().all(|c| c.coefficient(9) == 0));

        let dead = cell_constraints(false, 0, &neighbours, 9);
        assert_eq!(dead.len(), 2);
        assert_eq!((dead[0].relation(), dead[0].value()), (Relation::LessEqual, 2));
        assert_eq!((dead[0].coefficient(0), dead[0].coefficient(9)), (1, -8));
        assert_eq!((dead[1].relation(), dead[1].value()), (Relation::GreaterEqual, 0));
        assert_eq!((dead[1].coefficient(0), dead[1].coefficient(9)), (0, -4));

        for c in alive.iter().chain(dead.iter()) {
            assert!(neighbours.iter().all(|&n| c.coefficient(n) == 1));
        }
    }

    #[test]
    fn test_encoding_shape() {
        let target = Grid::new(4, 5).unwrap().with_cell(1, 1, true).unwrap();
        let problem = ConstraintEncoder::default().encode(&target).unwrap();

        assert_eq!(problem.num_variables(), 40);
        assert_eq!(problem.statistics.alive_targets, 1);
        assert_eq!(problem.statistics.dead_targets, 19);
        assert_eq!(problem.constraints.len(), 3 + 19 * 2);
        assert!(problem.objective.is_trivial());
        assert!(problem
            .constraints
            .iter()
            .all(|c| c.max_variable().map_or(true, |v| v < 40)));
    }

    #[test]
    fn test_objective_policies() {
        let target = Grid::new(3, 3).unwrap();

        let maximize = ConstraintEncoder::new(ObjectivePolicy::MaximizeLive).encode(&target).unwrap();
        assert_eq!(maximize.objective.coefficients().len(), 9);
        assert!(maximize.objective.coefficients().iter().all(|(&v, &c)| v < 9 && c == -1));

        let minimize = ConstraintEncoder::new(ObjectivePolicy::MinimizeLive).encode(&target).unwrap();
        assert!(minimize.objective.coefficients().values().all(|&c| c == 1));
    }

    #[test]
    fn test_every_true_predecessor_satisfies_encoding() {
        // All 512 states of a 3x3 torus
        for bits in 0u32..512 {
            let predecessor = Grid::from_fn(3, 3, |r, c| (bits >> (r * 3 + c)) & 1 == 1).unwrap();
            let target = GameOfLifeRules::step(&predecessor);
            let problem = ConstraintEncoder::default().encode(&target).unwrap();

            let mut assignment = predecessor.cells().to_vec();
            for k in 0..9 {
                let (r, c) = problem.index_map.coordinates(k);
                assignment.push(predecessor.count_neighbors(r, c) >= 4);
            }
            assert!(
                problem.constraints.is_satisfied_by(&assignment),
                "predecessor {:#011b} rejected",
                bits
            );
        }
    }
}
