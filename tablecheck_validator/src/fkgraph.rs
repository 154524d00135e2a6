//! Foreign-key graph.
//!
//! Cross-table references are modeled as an explicit directed graph so the
//! structural invariants are enforced once, centrally: every edge's target
//! table and column must exist, and the graph must be acyclic. The graph
//! also yields a deterministic validation order (referenced tables first)
//! and the set of key columns whose value sets must be materialized before
//! the foreign-key phase runs.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use tablecheck_core::{Schema, SchemaError};

/// One directed foreign-key edge: source table.column -> target
/// table.column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyEdge {
    pub source_table: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
}

/// The validated foreign-key graph of a schema.
#[derive(Debug, Clone)]
pub struct ForeignKeyGraph {
    edges: Vec<ForeignKeyEdge>,
    order: Vec<String>,
}

impl ForeignKeyGraph {
    /// Builds and validates the graph.
    ///
    /// Fatal schema errors: a target table that does not exist, a target
    /// column not declared in the target table, or a cycle among foreign
    /// keys (declaration order is not assumed to be dependency order, and
    /// a cycle would leave no valid order at all).
    pub fn build(schema: &Schema) -> Result<ForeignKeyGraph, SchemaError> {
        let mut graph: DiGraph<String, ()> = DiGraph::new();
        let mut nodes: Vec<(String, NodeIndex)> = Vec::with_capacity(schema.len());
        for name in schema.table_names() {
            let idx = graph.add_node(name.to_string());
            nodes.push((name.to_string(), idx));
        }
        let node_of = |name: &str| {
            nodes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, idx)| *idx)
        };

        let mut edges = Vec::new();
        for table in schema.tables() {
            for (column, reference) in &table.foreign_keys {
                let target = match schema.table(&reference.table) {
                    Some(target) => target,
                    None => {
                        return Err(SchemaError::UnknownForeignKeyTable {
                            table: table.name.clone(),
                            column: column.clone(),
                            target_table: reference.table.clone(),
                        });
                    }
                };
                if !target.declares(&reference.column) {
                    return Err(SchemaError::UnknownForeignKeyColumn {
                        table: table.name.clone(),
                        column: column.clone(),
                        target_table: reference.table.clone(),
                        target_column: reference.column.clone(),
                    });
                }

                // Edge direction target -> source puts referenced tables
                // first in the topological order.
                let source_idx = node_of(&table.name).expect("source table is a node");
                let target_idx = node_of(&target.name).expect("target table is a node");
                graph.add_edge(target_idx, source_idx, ());

                edges.push(ForeignKeyEdge {
                    source_table: table.name.clone(),
                    source_column: column.clone(),
                    target_table: reference.table.clone(),
                    target_column: reference.column.clone(),
                });
            }
        }

        let sorted = toposort(&graph, None).map_err(|cycle| SchemaError::ForeignKeyCycle {
            table: graph[cycle.node_id()].clone(),
        })?;
        let order = sorted.into_iter().map(|idx| graph[idx].clone()).collect();

        Ok(ForeignKeyGraph { edges, order })
    }

    /// All foreign-key edges, in schema declaration order.
    pub fn edges(&self) -> &[ForeignKeyEdge] {
        &self.edges
    }

    /// Edges whose source is the given table, in declaration order.
    pub fn edges_from<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'a ForeignKeyEdge> {
        self.edges.iter().filter(move |e| e.source_table == table)
    }

    /// Table validation order with referenced tables first.
    pub fn validation_order(&self) -> &[String] {
        &self.order
    }

    /// Distinct `(table, column)` pairs referenced by some foreign key;
    /// their key sets must be materialized before the foreign-key phase.
    pub fn referenced_columns(&self) -> Vec<(String, String)> {
        let mut seen = Vec::new();
        for edge in &self.edges {
            let pair = (edge.target_table.clone(), edge.target_column.clone());
            if !seen.contains(&pair) {
                seen.push(pair);
            }
        }
        seen
    }
}
