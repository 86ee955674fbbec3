//! Integer program for county-to-district assignment.
//!
//! Variables: binary `x[i][j]` ("county i is in district j") and a continuous `d[j] >= 0` per district.
//!
//! ```text
//! minimise    Σ_j d[j]
//! subject to  Σ_j x[i][j] = 1                         for every county i
//!             pop_j - d[j] <= ideal,  pop_j + d[j] >= ideal   where pop_j = Σ_i population[i] · x[i][j]
//!             d[j] <= tolerance · ideal               when a tolerance is configured
//!             x[u][j] <= x[v][j],  x[v][j] <= x[u][j]  for every adjacent pair (u, v) and district j
//! ```
//!
//! The last family only forces listed neighbors into the same district. It is necessary but not
//! sufficient for contiguity: nothing requires a district to be one connected piece, and on a
//! connected adjacency graph it forces every county into a single district. Use
//! `Districting::disconnected_districts` to see where the result breaks true contiguity.

use std::time::Duration;

use good_lp::{
    Expression, IntoAffineExpression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable, variable,
    solvers::{SolutionStatus, WithTimeLimit},
};

use crate::graph::CountyGraph;

use super::SolveError;

/// Owned model inputs, so a formulation can be moved to a solver thread.
#[derive(Debug, Clone)]
pub(crate) struct Formulation {
    populations: Vec<f64>,
    edges: Vec<(usize, usize)>,
    num_districts: usize,
    ideal: f64,
    tolerance: Option<f64>,
    time_limit: Option<Duration>,
}

/// Variable values of a solved model.
#[derive(Debug, Clone)]
pub(crate) struct RawSolution {
    /// `assignment[i][j]` is the value of `x[i][j]`.
    pub(crate) assignment: Vec<Vec<f64>>,
    /// Deviation variable per district.
    pub(crate) deviations: Vec<f64>,
}

impl RawSolution {
    /// Objective value: the sum of the deviation variables.
    pub(crate) fn objective(&self) -> f64 { self.deviations.iter().sum() }
}

impl Formulation {
    pub(crate) fn new(graph: &CountyGraph, num_districts: u32, tolerance: Option<f64>) -> Self {
        let populations = (0..graph.node_count()).map(|i| graph.population(i) as f64).collect::<Vec<_>>();
        let total: f64 = populations.iter().sum();

        Self {
            populations,
            edges: graph.undirected_edges().collect(),
            num_districts: num_districts as usize,
            ideal: total / num_districts as f64,
            tolerance,
            time_limit: None,
        }
    }

    /// Stop the solver after `limit` of wall-clock time.
    pub(crate) fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[inline] pub(crate) fn ideal(&self) -> f64 { self.ideal }

    fn timed_out(&self) -> SolveError {
        SolveError::TimedOut { limit: self.time_limit.unwrap_or_default() }
    }

    /// Number of binary assignment variables.
    #[inline] pub(crate) fn binary_count(&self) -> usize { self.populations.len() * self.num_districts }

    /// Number of linear constraints the model will hold.
    pub(crate) fn constraint_count(&self) -> usize {
        let per_district = if self.tolerance.is_some() { 3 } else { 2 };
        self.populations.len() + per_district * self.num_districts + 2 * self.edges.len() * self.num_districts
    }

    /// Build the model and run the solver, within the time limit when one is set.
    pub(crate) fn solve(&self) -> Result<RawSolution, SolveError> {
        let k = self.num_districts;
        let mut vars = ProblemVariables::new();

        let x: Vec<Vec<Variable>> = self.populations.iter()
            .map(|_| (0..k).map(|_| vars.add(variable().binary())).collect())
            .collect();
        let deviation: Vec<Variable> = (0..k).map(|_| vars.add(variable().min(0.0))).collect();

        let mut objective: Expression = 0.into();
        for &d in &deviation {
            objective += d;
        }

        let mut constraints = Vec::with_capacity(self.constraint_count());

        // Exactly one district per county
        for row in &x {
            let mut total: Expression = 0.into();
            for &v in row {
                total += v;
            }
            constraints.push(total.eq(1));
        }

        // |pop_j - ideal| <= d[j]
        for j in 0..k {
            let mut district_population: Expression = 0.into();
            for (row, &population) in x.iter().zip(&self.populations) {
                district_population += row[j] * population;
            }
            constraints.push((district_population.clone() - deviation[j]).leq(self.ideal));
            constraints.push((district_population + deviation[j]).geq(self.ideal));

            if let Some(tolerance) = self.tolerance {
                constraints.push(deviation[j].into_expression().leq(tolerance * self.ideal));
            }
        }

        // Adjacent counties share every district indicator
        for &(u, v) in &self.edges {
            for j in 0..k {
                constraints.push(x[u][j].into_expression().leq(x[v][j]));
                constraints.push(x[v][j].into_expression().leq(x[u][j]));
            }
        }

        let mut model = vars.minimise(objective).using(good_lp::default_solver);
        if let Some(limit) = self.time_limit {
            model = model.with_time_limit(limit.as_secs_f64());
        }
        for c in constraints {
            model.add_constraint(c);
        }

        let solution = model.solve().map_err(|e| match e {
            ResolutionError::Infeasible => SolveError::Infeasible,
            ResolutionError::Unbounded => SolveError::Unbounded,
            other if self.time_limit.is_some() && other.to_string().to_ascii_lowercase().contains("time limit") => self.timed_out(),
            other => SolveError::NotSolved(other.to_string()),
        })?;

        // an incumbent found before the limit is not proven optimal
        match solution.status() {
            SolutionStatus::Optimal => {}
            SolutionStatus::TimeLimit => return Err(self.timed_out()),
            status => return Err(SolveError::NotSolved(format!("solver stopped early: {status:?}"))),
        }

        Ok(RawSolution {
            assignment: x.iter().map(|row| row.iter().map(|&v| solution.value(v)).collect()).collect(),
            deviations: deviation.iter().map(|&d| solution.value(d)).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph() -> CountyGraph {
        CountyGraph::new(&[vec![1], vec![0, 2], vec![1], vec![]], vec![100, 200, 300, 400])
    }

    #[test]
    fn ideal_is_total_over_districts() {
        let formulation = Formulation::new(&path_graph(), 4, None);
        assert_eq!(formulation.ideal(), 250.0);
        assert_eq!(formulation.binary_count(), 16);
    }

    #[test]
    fn counts_constraints_per_family() {
        // 4 assignment rows, 2 balance rows per district, 2 contiguity rows per edge and district
        assert_eq!(Formulation::new(&path_graph(), 2, None).constraint_count(), 4 + 4 + 2 * 2 * 2);
        assert_eq!(Formulation::new(&path_graph(), 2, Some(0.1)).constraint_count(), 4 + 6 + 2 * 2 * 2);
    }

    #[test]
    fn connected_counties_share_a_district() {
        // components {0,1,2} (600) and {3} (400) with 2 districts: best split is 600 / 400
        let solution = Formulation::new(&path_graph(), 2, None).solve().unwrap();
        let district_of = |i: usize| solution.assignment[i].iter().position(|&v| v > 0.5).unwrap();

        assert_eq!(district_of(0), district_of(1));
        assert_eq!(district_of(1), district_of(2));
        assert_ne!(district_of(0), district_of(3));
        assert!((solution.objective() - 200.0).abs() < 1e-6);
    }

    #[test]
    fn expired_limit_stops_the_solver() {
        let populations: Vec<u64> = (0..40).map(|i| 1_000 + 37 * i).collect();
        let graph = CountyGraph::new(&vec![Vec::new(); 40], populations);
        let limit = Duration::from_millis(1);

        let result = Formulation::new(&graph, 12, None).with_time_limit(limit).solve();
        assert!(matches!(result, Err(SolveError::TimedOut { limit: l }) if l == limit));
    }

    #[test]
    fn generous_limit_still_proves_optimality() {
        let solution = Formulation::new(&path_graph(), 2, None)
            .with_time_limit(Duration::from_secs(60))
            .solve()
            .unwrap();
        assert!((solution.objective() - 200.0).abs() < 1e-6);
    }

    #[test]
    fn tolerance_can_make_the_model_infeasible() {
        let result = Formulation::new(&path_graph(), 2, Some(0.1)).solve();
        assert!(matches!(result, Err(SolveError::Infeasible)));
    }
}
