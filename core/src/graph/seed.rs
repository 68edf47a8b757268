//! Seed selection for component discovery.

/// Chooses the vertex a new component grows from.
///
/// The selector removes the vertex it returns from `pool`. `Graph::component` also tolerates
/// a selector that leaves its choice in place and removes it on the selector's behalf, so a
/// read-only strategy such as "peek the highest degree vertex" works unchanged.
pub trait SeedSelector<V> {
    fn select(&mut self, pool: &mut Vec<V>) -> Option<V>;
}

/// Takes the last vertex of the pool. This is the default strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct PopLast;

impl<V> SeedSelector<V> for PopLast {
    fn select(&mut self, pool: &mut Vec<V>) -> Option<V> { pool.pop() }
}

impl<V, F> SeedSelector<V> for F
where F: FnMut(&mut Vec<V>) -> Option<V>
{
    fn select(&mut self, pool: &mut Vec<V>) -> Option<V> { self(pool) }
}
