use crate::domain::error::{GraphError, Result};

/// Marks a vertex the leader pass has not reached yet.
pub const UNASSIGNED: usize = usize::MAX;

/// How the loader decides which vertex ids exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VertexUniverse {
    /// Exactly the distinct ids that appear as edge endpoints.
    #[default]
    Observed,
    /// Every id in `1..=n`, whether or not it appears in an edge.
    Declared(u64),
}

/// Compressed-sparse-row adjacency over dense vertex indices `0..n`.
///
/// Neighbors of a vertex keep the order in which their edges were added;
/// duplicates and self-loops are stored as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl Adjacency {
    fn from_edges<I>(node_count: usize, edge_count: usize, edges: I) -> Self
    where
        I: Iterator<Item = (usize, usize)> + Clone,
    {
        let mut offsets = vec![0usize; node_count + 1];
        for (u, _) in edges.clone() {
            offsets[u + 1] += 1;
        }
        for i in 0..node_count {
            offsets[i + 1] += offsets[i];
        }

        let mut cursor = offsets.clone();
        let mut targets = vec![0usize; edge_count];
        for (u, v) in edges {
            targets[cursor[u]] = v;
            cursor[u] += 1;
        }

        Self { offsets, targets }
    }

    pub fn node_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.targets[self.offsets[v]..self.offsets[v + 1]]
    }
}

/// A directed graph stored twice: as given and transposed.
///
/// Both adjacencies are built from the same id table, so a vertex index is
/// valid in one exactly when it is valid in the other.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    ids: Vec<u64>,
    forward: Adjacency,
    reverse: Adjacency,
}

impl Graph {
    /// Builds a graph over `0..node_count` whose external ids are `1..=node_count`.
    ///
    /// Panics if an edge endpoint is not below `node_count`.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Self {
        let ids = (1..=node_count as u64).collect();
        Self::from_parts(ids, edges)
    }

    fn from_parts(ids: Vec<u64>, edges: &[(usize, usize)]) -> Self {
        let n = ids.len();
        let forward = Adjacency::from_edges(n, edges.len(), edges.iter().copied());
        let reverse = Adjacency::from_edges(n, edges.len(), edges.iter().map(|&(u, v)| (v, u)));
        Self {
            ids,
            forward,
            reverse,
        }
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.forward.edge_count()
    }

    pub fn forward(&self) -> &Adjacency {
        &self.forward
    }

    pub fn reverse(&self) -> &Adjacency {
        &self.reverse
    }

    /// External id of the vertex at dense index `v`.
    pub fn vertex_id(&self, v: usize) -> u64 {
        self.ids[v]
    }

    pub fn self_loop_count(&self) -> usize {
        (0..self.node_count())
            .map(|v| self.forward.neighbors(v).iter().filter(|&&w| w == v).count())
            .sum()
    }
}

/// Collects edges between external ids and assigns dense indices on `build`.
///
/// Dense indices follow ascending external id, so the index order is the
/// numeric order the finish-order pass walks its roots in.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    universe: VertexUniverse,
    edges: Vec<(u64, u64)>,
}

impl GraphBuilder {
    pub fn new(universe: VertexUniverse) -> Self {
        Self {
            universe,
            edges: Vec::new(),
        }
    }

    pub fn with_capacity(universe: VertexUniverse, edges: usize) -> Self {
        Self {
            universe,
            edges: Vec::with_capacity(edges),
        }
    }

    pub fn push_edge(&mut self, u: u64, v: u64) -> Result<()> {
        self.check_id(u)?;
        self.check_id(v)?;
        self.edges.push((u, v));
        Ok(())
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn check_id(&self, id: u64) -> Result<()> {
        if id == 0 {
            return Err(GraphError::ZeroVertexId);
        }
        if let VertexUniverse::Declared(vertex_count) = self.universe {
            if id > vertex_count {
                return Err(GraphError::VertexOutOfRange { id, vertex_count });
            }
        }
        Ok(())
    }

    /// Fails when a declared universe is too large to allocate.
    pub fn build(self) -> Result<Graph> {
        match self.universe {
            VertexUniverse::Declared(n) => {
                let too_large = || GraphError::UniverseTooLarge { vertex_count: n };
                let len = usize::try_from(n).map_err(|_| too_large())?;
                let mut ids: Vec<u64> = Vec::new();
                ids.try_reserve_exact(len).map_err(|_| too_large())?;
                ids.extend(1..=n);
                let edges: Vec<(usize, usize)> = self
                    .edges
                    .iter()
                    .map(|&(u, v)| ((u - 1) as usize, (v - 1) as usize))
                    .collect();
                Ok(Graph::from_parts(ids, &edges))
            }
            VertexUniverse::Observed => {
                let mut ids: Vec<u64> = Vec::with_capacity(self.edges.len() * 2);
                for &(u, v) in self.edges.iter() {
                    ids.push(u);
                    ids.push(v);
                }
                ids.sort_unstable();
                ids.dedup();

                // Dense 1..=n input maps straight to id - 1.
                let dense = ids.last().map_or(true, |&max| max == ids.len() as u64);
                let index_of = |id: u64| -> usize {
                    if dense {
                        (id - 1) as usize
                    } else {
                        ids.binary_search(&id).unwrap_or_default()
                    }
                };

                let edges: Vec<(usize, usize)> = self
                    .edges
                    .iter()
                    .map(|&(u, v)| (index_of(u), index_of(v)))
                    .collect();
                Ok(Graph::from_parts(ids, &edges))
            }
        }
    }
}

/// Vertices in the order the finish-order pass completed them; index is rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishOrder {
    order: Vec<usize>,
}

impl FinishOrder {
    pub(crate) fn new(order: Vec<usize>) -> Self {
        Self { order }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Vertex that finished at `rank`.
    pub fn vertex_at(&self, rank: usize) -> usize {
        self.order[rank]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }
}

/// Leader vertex for every vertex, as assigned by the leader pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaders {
    leader: Vec<usize>,
}

impl Leaders {
    pub(crate) fn new(leader: Vec<usize>) -> Self {
        Self { leader }
    }

    pub fn len(&self) -> usize {
        self.leader.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leader.is_empty()
    }

    pub fn leader_of(&self, v: usize) -> Option<usize> {
        match self.leader[v] {
            UNASSIGNED => None,
            l => Some(l),
        }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.leader
    }
}

#[derive(Debug, Clone)]
pub struct SccResult {
    pub leaders: Leaders,
    pub component_count: usize,
}
