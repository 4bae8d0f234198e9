//! Portal graph: one-hop in-island distances plus a full all-pairs shortest
//! path table built with Floyd–Warshall (spec §4.4 steps 4-5).

use gw_core::ids::PortalId;

/// All-pairs shortest paths over the portal graph.
///
/// `dist[i][j]` is the minimal cost to go from `portals[i]` to `portals[j]`
/// by hopping through intermediate portals; `path[i][j]` is the sequence of
/// portal indices taken (inclusive of both ends). `dist[i][i] == 0` and
/// `path[i][i] == [i]` always hold.
pub struct PortalGraph {
    n: usize,
    dist: Vec<Vec<Option<u32>>>,
    path: Vec<Vec<Option<Vec<PortalId>>>>,
}

impl PortalGraph {
    /// Build the APSP table from one-hop edge costs. `edge_cost(i, j)` gives
    /// the direct in-island A* cost from `portals[i].to` to `portals[j].from`,
    /// or `None` if no such edge exists (different islands, or unreachable).
    pub fn build(n: usize, mut edge_cost: impl FnMut(usize, usize) -> Option<u32>) -> Self {
        let mut dist = vec![vec![None; n]; n];
        let mut next = vec![vec![None; n]; n];

        for i in 0..n {
            dist[i][i] = Some(0);
            next[i][i] = Some(i);
        }
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                if let Some(c) = edge_cost(i, j) {
                    dist[i][j] = Some(c);
                    next[i][j] = Some(j);
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                let Some(d_ik) = dist[i][k] else { continue };
                for j in 0..n {
                    let Some(d_kj) = dist[k][j] else { continue };
                    let candidate = d_ik + d_kj;
                    let better = dist[i][j].map(|cur| candidate < cur).unwrap_or(true);
                    if better {
                        dist[i][j] = Some(candidate);
                        next[i][j] = next[i][k];
                    }
                }
            }
        }

        let mut path = vec![vec![None; n]; n];
        for i in 0..n {
            for j in 0..n {
                if dist[i][j].is_some() {
                    path[i][j] = reconstruct_path(&next, i, j);
                }
            }
        }

        Self { n, dist, path }
    }

    pub fn portal_count(&self) -> usize {
        self.n
    }

    pub fn cost(&self, from: PortalId, to: PortalId) -> Option<u32> {
        self.dist[from.index()][to.index()]
    }

    pub fn path(&self, from: PortalId, to: PortalId) -> Option<&[PortalId]> {
        self.path[from.index()][to.index()].as_deref()
    }
}

fn reconstruct_path(next: &[Vec<Option<usize>>], i: usize, j: usize) -> Option<Vec<PortalId>> {
    let mut current = i;
    let mut out = vec![PortalId::from(current)];
    while current != j {
        current = next[current][j]?;
        out.push(PortalId::from(current));
    }
    Some(out)
}
