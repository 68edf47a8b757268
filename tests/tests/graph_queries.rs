mod common;
use std::collections::HashSet;

use anyhow::Result;
use common::*;
use deduce_core::{graph::PopLast, GraphError, Wrap, NO_CONNECTION};

#[test]
fn test_chain_and_isolated_vertex() -> Result<()> {
    let graph = chain_with_isolated(5, 1);
    let (one, five, six) = (find(&graph, &1), find(&graph, &5), find(&graph, &6));

    let mut sizes: Vec<usize> = graph.connected_components(PopLast)?.iter().map(|c| c.len()).collect();
    sizes.sort();
    assert_eq!(sizes, vec![1, 5]);

    assert_eq!(graph.distance(&one, &five)?, 4);
    assert_eq!(Wrap::unwrap_all(&graph.path(&one, &five)?), vec![1, 2, 3, 4, 5]);
    assert_eq!(Wrap::unwrap_all(&graph.path(&five, &one)?), vec![5, 4, 3, 2, 1]);
    assert_eq!(graph.distance(&one, &six)?, NO_CONNECTION);
    assert!(matches!(graph.path(&one, &six), Err(GraphError::NotFound(_))));
    Ok(())
}

/// Claims for two digits scattered over the grid, linked when they see each other.
fn peer_graph() -> deduce_core::Graph<Wrap<Claim>> {
    let cells = [0u8, 4, 10, 20, 31, 40, 44, 53, 60, 70, 80];
    let claims = cells.iter().flat_map(|&cell| [Claim::new(cell, 3), Claim::new(cell, 7)]);
    Wrap::pairwise(claims, Claim::sees)
}

#[test]
fn test_components_partition_the_claims() -> Result<()> {
    let graph = peer_graph();
    let components = graph.connected_components_default()?;

    let mut seen = HashSet::new();
    for component in &components {
        assert_closed(component);
        let digits: HashSet<u8> = component.iter().map(|w| w.payload().digit).collect();
        assert_eq!(digits.len(), 1, "a component never mixes digits");
        for claim in payloads(component) {
            assert!(seen.insert(claim), "{claim:?} is in two components");
        }
    }
    assert_eq!(seen, payloads(&graph).into_iter().collect::<HashSet<_>>());
    Ok(())
}

#[test]
fn test_distance_matches_path_length() -> Result<()> {
    let graph = peer_graph();
    for a in &graph {
        for b in &graph {
            let distance = graph.distance(a, b)?;
            match graph.path(a, b) {
                Ok(path) => {
                    assert_eq!(distance, path.len() as i64 - 1);
                    assert_eq!(path.first(), Some(a));
                    assert_eq!(path.last(), Some(b));
                }
                Err(GraphError::NotFound(_)) => assert_eq!(distance, NO_CONNECTION),
                Err(other) => panic!("unexpected error {other}"),
            }
        }
    }
    Ok(())
}

#[test]
fn test_component_distances_stay_inside() -> Result<()> {
    let graph = peer_graph();
    for component in graph.connected_components_default()? {
        for a in &component {
            for b in &component {
                assert_ne!(component.distance(a, b)?, NO_CONNECTION);
                assert_eq!(component.distance(a, b)?, graph.distance(a, b)?);
            }
        }
    }
    Ok(())
}

#[test]
fn test_edge_list_and_pairwise_agree() -> Result<()> {
    let edges: [[u32; 2]; 4] = [[1, 2], [2, 3], [3, 4], [4, 5]];
    let declared = Wrap::from_edges(edges)?;
    let tested = chain_with_isolated(5, 0);
    assert_eq!(payloads(&declared), payloads(&tested));
    assert_eq!(declared.edge_count(), tested.edge_count());
    assert_eq!(declared.distance(&find(&declared, &1), &find(&declared, &5))?, tested.distance(&find(&tested, &1), &find(&tested, &5))?);
    Ok(())
}

#[test]
fn test_three_payloads_one_edge() -> Result<()> {
    let graph = Wrap::pairwise(['A', 'B', 'C'], |a, b| (*a, *b) == ('A', 'B') || (*a, *b) == ('B', 'A'));
    assert_eq!(graph.edge_count(), 1);
    let c = find(&graph, &'C');
    assert_eq!(c.degree(), 0);
    assert_eq!(graph.distance(&find(&graph, &'A'), &c)?, NO_CONNECTION);
    Ok(())
}
