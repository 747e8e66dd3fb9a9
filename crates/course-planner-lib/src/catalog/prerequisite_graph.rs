//! Module for the catalog wide view of prerequisites, used to find problems in the data before any resolve runs.

use std::collections::HashMap;

use petgraph::prelude::*;

use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeData {
	/// The source course requires the target outright.
	Requires,
	/// The target is one option of a group the source requires.
	AnyOf,
}

/// Directed graph from each course to the courses its prerequisites mention.
#[derive(Debug, Clone, Default)]
pub struct PrerequisiteGraph {
	pub graph: StableDiGraph<CourseCode, EdgeData>,
	nodes: HashMap<CourseCode, NodeIndex>,
}

impl PrerequisiteGraph {
	pub fn from_prerequisites<'a>(prerequisites: impl IntoIterator<Item = (&'a CourseCode, &'a PrerequisiteSpec)>) -> Self {
		let mut g = Self::default();
		for (code, spec) in prerequisites {
			let src = g.get_or_add_node_index(code);
			match spec {
				PrerequisiteSpec::None => {},
				PrerequisiteSpec::Single(p) => {
					let dst = g.get_or_add_node_index(p);
					g.graph.add_edge(src, dst, EdgeData::Requires);
				},
				PrerequisiteSpec::OneOf(ps) => g.add_any_of(src, ps),
				PrerequisiteSpec::AllOf(clauses) => {
					for clause in clauses {
						match clause {
							PrerequisiteClause::Single(p) => {
								let dst = g.get_or_add_node_index(p);
								g.graph.add_edge(src, dst, EdgeData::Requires);
							},
							PrerequisiteClause::OneOf(ps) => g.add_any_of(src, ps),
						}
					}
				},
			}
		}
		g
	}

	fn add_any_of(&mut self, src: NodeIndex, options: &[CourseCode]) {
		for p in options {
			let dst = self.get_or_add_node_index(p);
			self.graph.add_edge(src, dst, EdgeData::AnyOf);
		}
	}

	/// Returns the index of the existing node or adds a new one for `code`
	fn get_or_add_node_index(&mut self, code: &CourseCode) -> NodeIndex {
		if let Some(i) = self.nodes.get(code) {
			return *i;
		}
		let i = self.graph.add_node(code.clone());
		self.nodes.insert(code.clone(), i);
		i
	}

	pub fn node_count(&self) -> usize {
		self.graph.node_count()
	}

	/// Groups of courses that (possibly through `AnyOf` options) require each other.
	///
	/// Each group is sorted and the groups are sorted by their first member so the output is stable.
	pub fn cycles(&self) -> Vec<Vec<CourseCode>> {
		let mut cycles: Vec<Vec<CourseCode>> = petgraph::algo::tarjan_scc(&self.graph)
			.into_iter()
			.filter(|scc| scc.len() > 1 || self.graph.find_edge(scc[0], scc[0]).is_some())
			.map(|scc| {
				let mut codes: Vec<CourseCode> = scc.into_iter().map(|i| self.graph[i].clone()).collect();
				codes.sort();
				codes
			})
			.collect();
		cycles.sort();
		cycles
	}
}
