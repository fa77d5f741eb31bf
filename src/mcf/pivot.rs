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

//! Entering arc selection rules.
//!
//! An arc may enter the basis if its violation is negative, i.e.
//! pushing flow along it (backwards for an arc at its upper bound)
//! reduces the total cost. All rules are admissible: they return an
//! eligible arc whenever one exists. They differ only in how much of
//! the arc set is scanned per pivot, which affects the number of
//! iterations but never the optimality of the final solution.

use super::tree::SpanningTree;
use crate::num::traits::{Bounded, NumAssign, Signed};

const MIN_BLOCK_SIZE: usize = 10;
const MIN_LIST_LENGTH: usize = 10;
const MIN_MINOR_LIMIT: usize = 3;
const MIN_HEAD_LENGTH: usize = 3;

/// The pivot rule used to select the entering arc.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PivotRule {
    /// Scan the arcs from a rotating cursor and select the first
    /// eligible arc.
    FirstEligible,
    /// Scan all arcs and select one with maximum violation.
    BestEligible,
    /// Scan blocks of about `sqrt(m)` arcs round-robin and select the
    /// best arc of the first block containing an eligible arc. This is
    /// the default rule.
    BlockSearch,
    /// Maintain a list of eligible candidate arcs and select the best
    /// of them for several minor iterations before the list is
    /// rebuilt.
    CandidateList,
    /// Like the candidate list, but after each pivot the surviving
    /// candidates are re-sorted by their current violation and only
    /// the best ones are kept.
    AlteringList,
}

impl Default for PivotRule {
    fn default() -> Self {
        PivotRule::BlockSearch
    }
}

/// The state of the entering arc search.
///
/// The cursor and the candidate list persist across pivots.
pub(crate) struct EnteringArcSearch<F> {
    rule: PivotRule,
    next_arc: usize,
    block_size: usize,
    candidates: Vec<usize>,
    cand_cost: Vec<F>,
    curr_length: usize,
    list_length: usize,
    minor_limit: usize,
    minor_count: usize,
    head_length: usize,
}

impl<F> EnteringArcSearch<F>
where
    F: Bounded + NumAssign + Signed + Ord + Copy,
{
    pub fn new(rule: PivotRule, search_arc_num: usize) -> Self {
        let sqrt_num = (search_arc_num as f64).sqrt() as usize;
        let mut search = EnteringArcSearch {
            rule,
            next_arc: 0,
            block_size: 0,
            candidates: Vec::new(),
            cand_cost: Vec::new(),
            curr_length: 0,
            list_length: 0,
            minor_limit: 0,
            minor_count: 0,
            head_length: 0,
        };
        match rule {
            PivotRule::FirstEligible | PivotRule::BestEligible => (),
            PivotRule::BlockSearch => {
                search.block_size = sqrt_num.max(MIN_BLOCK_SIZE);
            }
            PivotRule::CandidateList => {
                search.list_length = (sqrt_num / 4).max(MIN_LIST_LENGTH);
                search.minor_limit = (search.list_length / 10).max(MIN_MINOR_LIMIT);
                search.candidates = vec![0; search.list_length];
            }
            PivotRule::AlteringList => {
                search.block_size = sqrt_num.max(MIN_BLOCK_SIZE);
                search.head_length = (search.block_size / 100).max(MIN_HEAD_LENGTH);
                search.candidates = vec![0; search.head_length + search.block_size];
                search.cand_cost = vec![F::zero(); search_arc_num];
            }
        }
        search
    }

    /// Return the next entering arc or `None` if the current basis is
    /// optimal.
    pub fn find(&mut self, t: &SpanningTree<F>) -> Option<usize> {
        match self.rule {
            PivotRule::FirstEligible => self.first_eligible(t),
            PivotRule::BestEligible => self.best_eligible(t),
            PivotRule::BlockSearch => self.block_search(t),
            PivotRule::CandidateList => self.candidate_list(t),
            PivotRule::AlteringList => self.altering_list(t),
        }
    }

    fn first_eligible(&mut self, t: &SpanningTree<F>) -> Option<usize> {
        let m = t.search_arc_num;
        for e in (self.next_arc..m).chain(0..self.next_arc) {
            if t.red_cost(e) < F::zero() {
                self.next_arc = if e + 1 == m { 0 } else { e + 1 };
                return Some(e);
            }
        }
        None
    }

    fn best_eligible(&mut self, t: &SpanningTree<F>) -> Option<usize> {
        let mut min_cost = F::zero();
        let mut best = None;
        for e in 0..t.search_arc_num {
            let c = t.red_cost(e);
            if c < min_cost {
                min_cost = c;
                best = Some(e);
            }
        }
        best
    }

    fn block_search(&mut self, t: &SpanningTree<F>) -> Option<usize> {
        let m = t.search_arc_num;
        let mut min_cost = F::zero();
        let mut best = None;
        let mut cnt = self.block_size;
        for e in (self.next_arc..m).chain(0..self.next_arc) {
            let c = t.red_cost(e);
            if c < min_cost {
                min_cost = c;
                best = Some(e);
            }
            cnt -= 1;
            if cnt == 0 {
                if best.is_some() {
                    self.next_arc = if e + 1 == m { 0 } else { e + 1 };
                    return best;
                }
                cnt = self.block_size;
            }
        }
        // The final block was incomplete, the cursor stays put.
        best
    }

    fn candidate_list(&mut self, t: &SpanningTree<F>) -> Option<usize> {
        let m = t.search_arc_num;
        let mut min_cost = F::zero();
        let mut best = None;

        if self.curr_length > 0 && self.minor_count < self.minor_limit {
            // Minor iteration: select the best eligible arc from the
            // current candidate list.
            self.minor_count += 1;
            let mut i = 0;
            while i < self.curr_length {
                let e = self.candidates[i];
                let c = t.red_cost(e);
                if c < min_cost {
                    min_cost = c;
                    best = Some(e);
                    i += 1;
                } else if c >= F::zero() {
                    self.curr_length -= 1;
                    self.candidates[i] = self.candidates[self.curr_length];
                } else {
                    i += 1;
                }
            }
            if best.is_some() {
                return best;
            }
        }

        // Major iteration: build a new candidate list.
        min_cost = F::zero();
        best = None;
        self.curr_length = 0;
        for e in (self.next_arc..m).chain(0..self.next_arc) {
            let c = t.red_cost(e);
            if c < F::zero() {
                self.candidates[self.curr_length] = e;
                self.curr_length += 1;
                if c < min_cost {
                    min_cost = c;
                    best = Some(e);
                }
                if self.curr_length == self.list_length {
                    self.next_arc = if e + 1 == m { 0 } else { e + 1 };
                    break;
                }
            }
        }
        if self.curr_length == 0 {
            return None;
        }
        self.minor_count = 1;
        best
    }

    fn altering_list(&mut self, t: &SpanningTree<F>) -> Option<usize> {
        let m = t.search_arc_num;

        // Check the current candidate list.
        let mut i = 0;
        while i < self.curr_length {
            let e = self.candidates[i];
            let c = t.red_cost(e);
            if c < F::zero() {
                self.cand_cost[e] = c;
                i += 1;
            } else {
                self.curr_length -= 1;
                self.candidates[i] = self.candidates[self.curr_length];
            }
        }

        // Extend the list block by block.
        let mut cnt = self.block_size;
        let mut limit = self.head_length;
        for e in (self.next_arc..m).chain(0..self.next_arc) {
            let c = t.red_cost(e);
            if c < F::zero() {
                self.cand_cost[e] = c;
                self.candidates[self.curr_length] = e;
                self.curr_length += 1;
            }
            cnt -= 1;
            if cnt == 0 {
                if self.curr_length > limit {
                    self.next_arc = if e + 1 == m { 0 } else { e + 1 };
                    break;
                }
                limit = 0;
                cnt = self.block_size;
            }
        }
        if self.curr_length == 0 {
            return None;
        }

        // Sort the candidates by their violation and keep only the
        // head of the list.
        let cand_cost = &self.cand_cost;
        self.candidates[..self.curr_length].sort_unstable_by(|&a, &b| cand_cost[a].cmp(&cand_cost[b]));
        let new_length = (self.head_length + 1).min(self.curr_length);
        let in_arc = self.candidates[0];
        self.candidates[0] = self.candidates[new_length - 1];
        self.curr_length = new_length - 1;
        Some(in_arc)
    }
}
