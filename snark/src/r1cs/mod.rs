//! Rank-1 constraint systems.
//!
//! Variable `0` is the constant one; variables `1..=primary_input_size` are
//! the primary (public) inputs and the remaining ones are the auxiliary
//! (private) witness.

use crate::errors::{Result, SnarkError};
use kiln_algebra::prelude::*;

mod examples;
pub use examples::*;

/// Index into the full assignment `1 ‖ primary ‖ auxiliary`.
pub type Variable = usize;

/// A sparse linear combination `Σ coeff·x[index]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearCombination<F> {
    /// The (variable, coefficient) terms, in insertion order.
    pub terms: Vec<(Variable, F)>,
}

impl<F: Scalar> LinearCombination<F> {
    /// Return the empty combination.
    pub fn zero() -> Self {
        Self { terms: vec![] }
    }

    /// Build a combination from its terms.
    pub fn from_terms(terms: Vec<(Variable, F)>) -> Self {
        Self { terms }
    }

    /// Append the term `coeff·x[index]`.
    pub fn add_term(&mut self, index: Variable, coeff: F) {
        self.terms.push((index, coeff));
    }

    /// Return the terms.
    pub fn terms(&self) -> &[(Variable, F)] {
        &self.terms
    }

    /// Return the largest variable index referenced, if any.
    pub fn max_index(&self) -> Option<Variable> {
        self.terms.iter().map(|(i, _)| *i).max()
    }

    /// Evaluate against a full assignment, or `None` if an index is out of range.
    pub fn evaluate(&self, full_assignment: &[F]) -> Option<F> {
        let mut acc = F::zero();
        for (index, coeff) in self.terms.iter() {
            acc += &(*full_assignment.get(*index)? * coeff);
        }
        Some(acc)
    }
}

/// A rank-1 constraint `⟨a, x⟩ · ⟨b, x⟩ = ⟨c, x⟩`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint<F> {
    /// The left factor.
    pub a: LinearCombination<F>,
    /// The right factor.
    pub b: LinearCombination<F>,
    /// The product.
    pub c: LinearCombination<F>,
}

impl<F: Scalar> Constraint<F> {
    /// Create a new constraint.
    pub fn new(a: LinearCombination<F>, b: LinearCombination<F>, c: LinearCombination<F>) -> Self {
        Self { a, b, c }
    }

    /// Check the constraint against a full assignment.
    pub fn is_satisfied_by(&self, full_assignment: &[F]) -> bool {
        match (
            self.a.evaluate(full_assignment),
            self.b.evaluate(full_assignment),
            self.c.evaluate(full_assignment),
        ) {
            (Some(a), Some(b), Some(c)) => a * &b == c,
            _ => false,
        }
    }

    fn max_index(&self) -> Option<Variable> {
        [self.a.max_index(), self.b.max_index(), self.c.max_index()]
            .into_iter()
            .flatten()
            .max()
    }
}

/// A rank-1 constraint system.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSystem<F> {
    /// The number of public inputs.
    pub primary_input_size: usize,
    /// The number of private witness values.
    pub auxiliary_input_size: usize,
    /// The constraints, in order.
    pub constraints: Vec<Constraint<F>>,
}

impl<F: Scalar> ConstraintSystem<F> {
    /// Create an empty system over the given numbers of variables.
    pub fn new(primary_input_size: usize, auxiliary_input_size: usize) -> Self {
        Self {
            primary_input_size,
            auxiliary_input_size,
            constraints: vec![],
        }
    }

    /// Append a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint<F>) {
        self.constraints.push(constraint);
    }

    /// Return the number of constraints.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Return the number of public inputs.
    pub fn num_inputs(&self) -> usize {
        self.primary_input_size
    }

    /// Return the number of variables, not counting the constant one.
    pub fn num_variables(&self) -> usize {
        self.primary_input_size + self.auxiliary_input_size
    }

    /// Check that every referenced variable exists.
    pub fn is_valid(&self) -> bool {
        let num_variables = self.num_variables();
        self.constraints
            .iter()
            .all(|c| c.max_index().map_or(true, |i| i <= num_variables))
    }

    /// Return `1 ‖ primary ‖ auxiliary`, checking the input lengths.
    pub fn full_assignment(&self, primary_input: &[F], auxiliary_input: &[F]) -> Result<Vec<F>> {
        if primary_input.len() != self.primary_input_size {
            return Err(SnarkError::PrimaryInputSizeMismatch(
                self.primary_input_size,
                primary_input.len(),
            ));
        }
        if auxiliary_input.len() != self.auxiliary_input_size {
            return Err(SnarkError::AuxiliaryInputSizeMismatch(
                self.auxiliary_input_size,
                auxiliary_input.len(),
            ));
        }
        let mut full = Vec::with_capacity(self.num_variables() + 1);
        full.push(F::one());
        full.extend_from_slice(primary_input);
        full.extend_from_slice(auxiliary_input);
        Ok(full)
    }

    /// Check whether the inputs satisfy every constraint.
    ///
    /// Wrong input lengths and out-of-range variables make this return `false`.
    pub fn is_satisfied(&self, primary_input: &[F], auxiliary_input: &[F]) -> bool {
        match self.full_assignment(primary_input, auxiliary_input) {
            Ok(full) => self.constraints.iter().all(|c| c.is_satisfied_by(&full)),
            Err(_) => false,
        }
    }

    /// Swap the `a` and `b` sides of every constraint when `b` touches more
    /// distinct variables than `a`.
    ///
    /// The prover pays one G2 exponentiation per variable touched by `b`, so
    /// keeping the denser side in `a` makes proving cheaper.
    pub fn swap_ab_if_beneficial(&mut self) {
        let num_variables = self.num_variables();
        let mut touched_by_a = vec![false; num_variables + 1];
        let mut touched_by_b = vec![false; num_variables + 1];

        for constraint in self.constraints.iter() {
            for (index, _) in constraint.a.terms.iter() {
                if let Some(t) = touched_by_a.get_mut(*index) {
                    *t = true;
                }
            }
            for (index, _) in constraint.b.terms.iter() {
                if let Some(t) = touched_by_b.get_mut(*index) {
                    *t = true;
                }
            }
        }

        let non_zero_a_count = touched_by_a.iter().filter(|t| **t).count();
        let non_zero_b_count = touched_by_b.iter().filter(|t| **t).count();

        if non_zero_b_count > non_zero_a_count {
            for constraint in self.constraints.iter_mut() {
                ark_std::mem::swap(&mut constraint.a, &mut constraint.b);
            }
        }
    }
}
