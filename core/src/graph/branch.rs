/// Index of a branch within a [`Branches`] arena.
pub(crate) type BranchId = usize;

struct Branch<V> {
    vertex: V,
    reached_from: Option<BranchId>,
}

/// Arena of search branches for a single path query. Each branch wraps a vertex and the
/// branch that reached it; the whole arena is dropped once the path is extracted.
pub(crate) struct Branches<V> {
    branches: Vec<Branch<V>>,
}

impl<V: Clone> Branches<V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self { Self { branches: Vec::with_capacity(capacity) } }

    pub(crate) fn root(&mut self, vertex: V) -> BranchId { self.push(vertex, None) }

    pub(crate) fn extend(&mut self, from: BranchId, vertex: V) -> BranchId { self.push(vertex, Some(from)) }

    pub(crate) fn vertex(&self, id: BranchId) -> &V { &self.branches[id].vertex }

    /// Vertices from `id` back to the root, following `reached_from` links.
    ///
    /// The search runs from the destination, so this order is already the forward path.
    pub(crate) fn trace(&self, id: BranchId) -> Vec<V> {
        let mut path = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let branch = &self.branches[current];
            path.push(branch.vertex.clone());
            cursor = branch.reached_from;
        }
        path
    }

    fn push(&mut self, vertex: V, reached_from: Option<BranchId>) -> BranchId {
        self.branches.push(Branch { vertex, reached_from });
        self.branches.len() - 1
    }
}
