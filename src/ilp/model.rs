//! Linear programs over binary variables

use std::collections::BTreeMap;
use std::fmt;

/// Domain of the decision variables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    Binary,
}

/// Relation between the left-hand side and the right-hand side of a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    LessEqual,
    GreaterEqual,
    Equal,
}

impl Relation {
    pub fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Relation::LessEqual => lhs <= rhs,
            Relation::GreaterEqual => lhs >= rhs,
            Relation::Equal => lhs == rhs,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relation::LessEqual => "<=",
            Relation::GreaterEqual => ">=",
            Relation::Equal => "=",
        })
    }
}

/// `Σ coefficient * x  relation  value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    coefficients: BTreeMap<usize, i64>,
    relation: Relation,
    value: i64,
}

impl LinearConstraint {
    pub fn new(relation: Relation, value: i64) -> Self {
        Self {
            coefficients: BTreeMap::new(),
            relation,
            value,
        }
    }

    /// Set the coefficient of `var`, replacing any previous one
    pub fn set_coefficient(&mut self, var: usize, coefficient: i64) -> &mut Self {
        self.coefficients.insert(var, coefficient);
        self
    }

    /// Builder form of [`LinearConstraint::set_coefficient`]
    pub fn with_coefficient(mut self, var: usize, coefficient: i64) -> Self {
        self.set_coefficient(var, coefficient);
        self
    }

    /// Set coefficient 1 on every variable in `vars`
    pub fn with_unit_terms<I: IntoIterator<Item = usize>>(mut self, vars: I) -> Self {
        for var in vars {
            self.set_coefficient(var, 1);
        }
        self
    }

    pub fn coefficients(&self) -> &BTreeMap<usize, i64> {
        &self.coefficients
    }

    pub fn coefficient(&self, var: usize) -> i64 {
        self.coefficients.get(&var).copied().unwrap_or(0)
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Left-hand side evaluated under a 0/1 assignment
    pub fn evaluate(&self, assignment: &[bool]) -> i64 {
        self.coefficients
            .iter()
            .filter(|&(&var, _)| assignment.get(var).copied().unwrap_or(false))
            .map(|(_, &coefficient)| coefficient)
            .sum()
    }

    pub fn is_satisfied_by(&self, assignment: &[bool]) -> bool {
        self.relation.holds(self.evaluate(assignment), self.value)
    }

    /// Highest variable index referenced, if any
    pub fn max_variable(&self) -> Option<usize> {
        self.coefficients.keys().next_back().copied()
    }
}

impl fmt::Display for LinearConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (var, coefficient)) in self.coefficients.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{}*x{}", coefficient, var)?;
        }
        write!(f, " {} {}", self.relation, self.value)
    }
}

/// An unordered collection of constraints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearConstraints {
    constraints: Vec<LinearConstraint>,
}

impl LinearConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LinearConstraint> {
        self.constraints.iter()
    }

    /// Whether every constraint holds under a 0/1 assignment
    pub fn is_satisfied_by(&self, assignment: &[bool]) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied_by(assignment))
    }
}

impl<'a> IntoIterator for &'a LinearConstraints {
    type Item = &'a LinearConstraint;
    type IntoIter = std::slice::Iter<'a, LinearConstraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectiveSense {
    #[default]
    Minimize,
    Maximize,
}

/// Linear objective over the variables of a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearObjective {
    num_variables: usize,
    coefficients: BTreeMap<usize, i64>,
    sense: ObjectiveSense,
}

impl LinearObjective {
    /// Zero objective over `num_variables` variables
    pub fn new(num_variables: usize) -> Self {
        Self {
            num_variables,
            coefficients: BTreeMap::new(),
            sense: ObjectiveSense::Minimize,
        }
    }

    pub fn set_coefficient(&mut self, var: usize, coefficient: i64) {
        if coefficient == 0 {
            self.coefficients.remove(&var);
        } else {
            self.coefficients.insert(var, coefficient);
        }
    }

    pub fn set_sense(&mut self, sense: ObjectiveSense) {
        self.sense = sense;
    }

    pub fn sense(&self) -> ObjectiveSense {
        self.sense
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn coefficients(&self) -> &BTreeMap<usize, i64> {
        &self.coefficients
    }

    /// An objective with no non-zero coefficient only asks for feasibility
    pub fn is_trivial(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn evaluate(&self, assignment: &[bool]) -> i64 {
        self.coefficients
            .iter()
            .filter(|&(&var, _)| assignment.get(var).copied().unwrap_or(false))
            .map(|(_, &coefficient)| coefficient)
            .sum()
    }
}
