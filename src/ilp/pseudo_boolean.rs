//! Translation of linear constraints over binary variables into CNF
//!
//! Constraints are first normalised to `Σ wᵢ·ℓᵢ <= K` with positive weights
//! over literals. Short constraints forbid each minimal overweight subset of
//! literals; long ones use a sequential weight counter.

use super::model::{LinearConstraint, Relation};
use itertools::Itertools;
use std::cmp::Ordering;

/// DIMACS literal: `v + 1` for variable `v`, negated for its complement
pub type Literal = i32;

/// Constraints with at most this many literals are expanded subset by subset.
pub const ENUMERATION_LIMIT: usize = 12;

/// Literal of program variable `var`
#[inline]
pub fn literal(var: usize) -> Literal {
    var as Literal + 1
}

/// Accumulates CNF clauses for a growing set of linear constraints.
///
/// Program variables keep their indices; auxiliary counter variables are
/// numbered after them.
#[derive(Debug, Clone)]
pub struct CnfBuilder {
    next_var: Literal,
    clauses: Vec<Vec<Literal>>,
    contradiction: bool,
}

impl CnfBuilder {
    pub fn new(num_variables: usize) -> Self {
        Self {
            next_var: literal(num_variables),
            clauses: Vec::new(),
            contradiction: false,
        }
    }

    /// Total variables so far, auxiliary ones included
    pub fn num_variables(&self) -> usize {
        (self.next_var - 1) as usize
    }

    /// A constraint normalised to an unsatisfiable bound was added
    pub fn is_contradictory(&self) -> bool {
        self.contradiction
    }

    pub fn pending_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Take the clauses produced since the last drain
    pub fn drain_clauses(&mut self) -> Vec<Vec<Literal>> {
        std::mem::take(&mut self.clauses)
    }

    pub fn add_constraint(&mut self, constraint: &LinearConstraint) {
        let terms = constraint.coefficients().iter().map(|(&v, &a)| (v, a));
        match constraint.relation() {
            Relation::LessEqual => self.add_less_equal(terms, constraint.value()),
            Relation::GreaterEqual => {
                self.add_less_equal(terms.map(|(v, a)| (v, -a)), -constraint.value())
            }
            Relation::Equal => {
                self.add_less_equal(terms.clone(), constraint.value());
                self.add_less_equal(terms.map(|(v, a)| (v, -a)), -constraint.value());
            }
        }
    }

    /// `Σ a·x <= bound` over program variables
    pub fn add_less_equal<I>(&mut self, terms: I, mut bound: i64)
    where
        I: IntoIterator<Item = (usize, i64)>,
    {
        let mut weighted = Vec::new();
        for (var, coefficient) in terms {
            match coefficient.cmp(&0) {
                Ordering::Greater => weighted.push((literal(var), coefficient)),
                // a·x = a + |a|·¬x
                Ordering::Less => {
                    weighted.push((-literal(var), -coefficient));
                    bound -= coefficient;
                }
                Ordering::Equal => {}
            }
        }
        self.add_at_most(weighted, bound);
    }

    /// `Σ w·ℓ <= bound` with positive weights
    fn add_at_most(&mut self, terms: Vec<(Literal, i64)>, bound: i64) {
        if bound < 0 {
            self.contradiction = true;
            return;
        }

        let mut remaining = Vec::with_capacity(terms.len());
        for (lit, weight) in terms {
            if weight > bound {
                self.clauses.push(vec![-lit]);
            } else {
                remaining.push((lit, weight));
            }
        }

        let total: i64 = remaining.iter().map(|&(_, w)| w).sum();
        if total <= bound {
            return;
        }

        if remaining.len() <= ENUMERATION_LIMIT {
            self.forbid_minimal_subsets(&remaining, bound);
        } else {
            self.sequential_weight_counter(&remaining, bound);
        }
    }

    fn forbid_minimal_subsets(&mut self, terms: &[(Literal, i64)], bound: i64) {
        for subset in terms.iter().powerset() {
            let sum: i64 = subset.iter().map(|&&(_, w)| w).sum();
            if sum <= bound {
                continue;
            }
            if subset.iter().all(|&&(_, w)| sum - w <= bound) {
                self.clauses.push(subset.iter().map(|&&(lit, _)| -lit).collect());
            }
        }
    }

    /// Hölldobler, Manthey and Steinke's encoding; every weight is at most `bound`.
    fn sequential_weight_counter(&mut self, terms: &[(Literal, i64)], bound: i64) {
        let n = terms.len();
        let k = bound as usize;

        // partial[i][j - 1]: the first i + 1 literals weigh at least j
        let mut partial: Vec<Vec<Literal>> = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            let row: Vec<Literal> = (0..k).map(|_| self.fresh_variable()).collect();
            let (lit, weight) = terms[i];
            let w = weight as usize;

            for j in 1..=w {
                self.clauses.push(vec![-lit, row[j - 1]]);
            }
            if i > 0 {
                let prev = &partial[i - 1];
                for j in 1..=k {
                    self.clauses.push(vec![-prev[j - 1], row[j - 1]]);
                }
                for j in 1..=k - w {
                    self.clauses.push(vec![-lit, -prev[j - 1], row[j + w - 1]]);
                }
            }
            partial.push(row);
        }

        for i in 1..n {
            let (lit, weight) = terms[i];
            let overflow = k + 1 - weight as usize;
            self.clauses.push(vec![-lit, -partial[i - 1][overflow - 1]]);
        }
    }

    fn fresh_variable(&mut self) -> Literal {
        let var = self.next_var;
        self.next_var += 1;
        var
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Program-variable projections of every model, by brute force
    fn brute_force_models(builder: &CnfBuilder, clauses: &[Vec<Literal>], program_vars: usize) -> Vec<Vec<bool>> {
        let total = builder.num_variables();
        assert!(total <= 20, "too many variables for brute force");
        let mut projected = Vec::new();
        for bits in 0u32..(1 << total) {
            let value = |lit: Literal| {
                let on = bits & (1 << (lit.unsigned_abs() - 1)) != 0;
                if lit > 0 { on } else { !on }
            };
            if clauses.iter().all(|c| c.iter().any(|&l| value(l))) {
                projected.push((0..program_vars).map(|v| bits & (1 << v) != 0).collect::<Vec<bool>>());
            }
        }
        projected.into_iter().unique().collect()
    }

    fn all_assignments(n: usize) -> impl Iterator<Item = Vec<bool>> {
        (0u32..(1 << n)).map(move |bits| (0..n).map(|v| bits & (1 << v) != 0).collect())
    }

    fn assert_equivalent(constraint: &LinearConstraint, n: usize) {
        let mut builder = CnfBuilder::new(n);
        builder.add_constraint(constraint);
        let clauses = builder.drain_clauses();
        let models = brute_force_models(&builder, &clauses, n);

        for assignment in all_assignments(n) {
            assert_eq!(
                models.contains(&assignment),
                constraint.is_satisfied_by(&assignment),
                "{} disagrees on {:?}",
                constraint,
                assignment
            );
        }
    }

    #[test]
    fn test_cell_constraint_shapes() {
        let sum = |rel, value| LinearConstraint::new(rel, value).with_unit_terms(1..=8);
        let cases = vec![
            sum(Relation::LessEqual, 3),
            sum(Relation::GreaterEqual, 0).with_coefficient(0, -2),
            sum(Relation::GreaterEqual, 3).with_coefficient(0, 3),
            sum(Relation::LessEqual, 2).with_coefficient(0, 1).with_coefficient(9, -8),
            sum(Relation::GreaterEqual, 0).with_coefficient(9, -4),
        ];
        for constraint in &cases {
            assert_equivalent(constraint, 10);
        }
    }

    #[test]
    fn test_equality_and_mixed_signs() {
        let eq = LinearConstraint::new(Relation::Equal, 2).with_unit_terms(0..4);
        assert_equivalent(&eq, 4);

        let mixed = LinearConstraint::new(Relation::LessEqual, 1)
            .with_coefficient(0, 2)
            .with_coefficient(1, -3)
            .with_coefficient(2, 1);
        assert_equivalent(&mixed, 3);
    }

    #[test]
    fn test_sequential_counter_matches_semantics() {
        // 14 literals exceed the enumeration limit
        let mut builder = CnfBuilder::new(14);
        builder.add_less_equal((0..14).map(|v| (v, if v % 3 == 0 { 2 } else { 1 })), 3);
        let clauses = builder.drain_clauses();
        assert!(builder.num_variables() > 14);

        let weights: Vec<i64> = (0..14).map(|v| if v % 3 == 0 { 2 } else { 1 }).collect();
        let aux = builder.num_variables() - 14;
        for assignment in [
            vec![0usize; 0],
            vec![0],
            vec![0, 1],
            vec![1, 2, 4],
            vec![0, 3],
            vec![1, 2, 4, 5],
            vec![13],
        ] {
            let weight: i64 = assignment.iter().map(|&v| weights[v]).sum();
            let satisfiable = counter_satisfiable(&clauses, &assignment, 14, aux);
            assert_eq!(satisfiable, weight <= 3, "assignment {:?} weight {}", assignment, weight);
        }
    }

    /// Counter clauses are Horn once the program variables are fixed, so
    /// forward propagation to the least model decides satisfiability.
    fn counter_satisfiable(clauses: &[Vec<Literal>], on: &[usize], program: usize, aux: usize) -> bool {
        let mut value = vec![false; program + aux + 1];
        for &v in on {
            value[literal(v) as usize] = true;
        }
        loop {
            let mut changed = false;
            for clause in clauses {
                let satisfied = clause.iter().any(|&l| {
                    let on = value[l.unsigned_abs() as usize];
                    if l > 0 { on } else { !on }
                });
                if satisfied {
                    continue;
                }
                let forcing = clause.iter().find(|&&l| l > 0 && l.unsigned_abs() as usize > program);
                match forcing {
                    Some(&l) => {
                        value[l as usize] = true;
                        changed = true;
                    }
                    None => return false,
                }
            }
            if !changed {
                return true;
            }
        }
    }

    #[test]
    fn test_trivial_and_contradictory_bounds() {
        let mut builder = CnfBuilder::new(3);
        builder.add_constraint(&LinearConstraint::new(Relation::LessEqual, 5).with_unit_terms(0..3));
        assert_eq!(builder.pending_clauses(), 0);
        assert!(!builder.is_contradictory());

        builder.add_constraint(&LinearConstraint::new(Relation::GreaterEqual, 4).with_unit_terms(0..3));
        assert!(builder.is_contradictory());
    }

    #[test]
    fn test_overweight_literals_are_forced_false() {
        let mut builder = CnfBuilder::new(2);
        builder.add_less_equal([(0, 5), (1, 1)], 2);
        assert_eq!(builder.drain_clauses(), vec![vec![-1]]);
    }
}
