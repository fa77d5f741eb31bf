/*
 * Copyright (c) 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Minimum Cost Flow algorithms.

pub mod pivot;
pub mod simplex;
mod tree;

pub use self::pivot::PivotRule;
pub use self::simplex::{network_simplex, NetworkSimplex};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SolutionState {
    /// Unknown state, the problem has not been solved, yet
    Unknown,
    /// The problem has been solved to optimality
    Optimal,
    /// The problem is infeasible
    Infeasible,
    /// The problem is unbounded
    Unbounded,
}

impl SolutionState {
    /// Return `true` iff an optimal solution has been found.
    pub fn is_optimal(self) -> bool {
        self == SolutionState::Optimal
    }
}

/// The form of the node balance constraints.
///
/// With supply `b(v)` and net out-flow `f(v)` of a node `v`, the flow
/// must satisfy `f(v) = b(v)`, `f(v) ≥ b(v)` or `f(v) ≤ b(v)` for all
/// nodes depending on the problem form.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProblemForm {
    /// Every node balance must match its supply exactly.
    Eq,
    /// Every node must send at least its supply (carry all supplies).
    Geq,
    /// Every node may send at most its supply (satisfy the demands).
    Leq,
}

impl ProblemForm {
    /// Alias for the `Geq` form.
    pub const CARRY_SUPPLIES: ProblemForm = ProblemForm::Geq;

    /// Alias for the `Leq` form.
    pub const SATISFY_DEMANDS: ProblemForm = ProblemForm::Leq;
}

impl Default for ProblemForm {
    fn default() -> Self {
        ProblemForm::Eq
    }
}
