//! SAT encoding of a coloring problem, solved with varisat.
//!
//! An independent oracle for the backtracking engine: one boolean per
//! (variable, color in its initial domain), exactly-one per variable, and a
//! binary exclusion clause per edge and shared color.

use std::collections::BTreeMap;

use varisat::{solver::Solver, ExtendFormula, Lit, Var};

use crate::problem::Problem;
use crate::{Assignment, Value, Variable};

#[derive(Debug, thiserror::Error)]
pub enum SatError {
    #[error("SAT solver error: {0}")]
    Solver(String),
}

/// One-hot literal table: `(variable, domain index) -> Var`.
struct Encoding<V> {
    vars: BTreeMap<V, Vec<Var>>,
}

impl<V: Variable> Encoding<V> {
    fn new<C>(problem: &Problem<V, C>) -> Self
    where
        C: Value,
    {
        let mut next = 0;
        let vars = problem
            .initial_domains()
            .iter()
            .map(|(v, domain)| {
                let row = (0..domain.len())
                    .map(|_| {
                        let var = Var::from_index(next);
                        next += 1;
                        var
                    })
                    .collect();
                (v.clone(), row)
            })
            .collect();
        Self { vars }
    }

    fn clauses<C: Value>(&self, problem: &Problem<V, C>) -> Vec<Vec<Lit>> {
        let mut clauses = Vec::new();
        for row in self.vars.values() {
            clauses.push(row.iter().map(|v| v.positive()).collect());
            for (i, a) in row.iter().enumerate() {
                for b in &row[i + 1..] {
                    clauses.push(vec![a.negative(), b.negative()]);
                }
            }
        }

        for (a, b) in problem.graph().edges() {
            let (domain_a, domain_b) = (problem.initial_domain(&a), problem.initial_domain(&b));
            let (Some(row_a), Some(row_b)) = (self.vars.get(&a), self.vars.get(&b)) else {
                continue;
            };
            for (i, color) in domain_a.iter().enumerate() {
                if let Some(j) = domain_b.iter().position(|c| c == color) {
                    clauses.push(vec![row_a[i].negative(), row_b[j].negative()]);
                }
            }
        }
        clauses
    }

    fn solver<'a, C: Value>(&self, problem: &Problem<V, C>) -> Solver<'a> {
        let mut solver = Solver::new();
        for clause in self.clauses(problem) {
            solver.add_clause(&clause);
        }
        solver
    }

    fn decode<C: Value>(&self, problem: &Problem<V, C>, model: &[Lit]) -> Assignment<V, C> {
        let mut assignment = Assignment::new();
        for (v, row) in &self.vars {
            let domain = problem.initial_domain(v);
            if let Some(i) = row.iter().position(|var| model.contains(&var.positive())) {
                assignment.insert(v.clone(), domain[i].clone());
            }
        }
        assignment
    }

    fn blocking_clause(&self, model: &[Lit]) -> Vec<Lit> {
        self.vars
            .values()
            .flatten()
            .filter(|var| model.contains(&var.positive()))
            .map(|var| var.negative())
            .collect()
    }
}

fn next_model<'a>(solver: &mut Solver<'a>) -> Result<Option<Vec<Lit>>, SatError> {
    match solver.solve() {
        Ok(true) => solver
            .model()
            .map(Some)
            .ok_or_else(|| SatError::Solver("SAT but no model returned".to_string())),
        Ok(false) => Ok(None),
        Err(e) => Err(SatError::Solver(e.to_string())),
    }
}

/// Any proper coloring within the initial domains, or `None` if there is none.
pub fn find_coloring<V: Variable, C: Value>(
    problem: &Problem<V, C>,
) -> Result<Option<Assignment<V, C>>, SatError> {
    let encoding = Encoding::new(problem);
    let mut solver = encoding.solver(problem);
    Ok(next_model(&mut solver)?.map(|model| encoding.decode(problem, &model)))
}

pub fn is_colorable<V: Variable, C: Value>(problem: &Problem<V, C>) -> Result<bool, SatError> {
    Ok(find_coloring(problem)?.is_some())
}

/// Count distinct proper colorings, stopping at `limit` (0 counts all).
pub fn count_colorings<V: Variable, C: Value>(
    problem: &Problem<V, C>,
    limit: usize,
) -> Result<usize, SatError> {
    let encoding = Encoding::new(problem);
    let mut solver = encoding.solver(problem);
    let mut count = 0;
    while limit == 0 || count < limit {
        let Some(model) = next_model(&mut solver)? else {
            break;
        };
        count += 1;
        let blocking = encoding.blocking_clause(&model);
        if blocking.is_empty() {
            break;
        }
        solver.add_clause(&blocking);
    }
    Ok(count)
}
