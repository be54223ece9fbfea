use eio_core::FlowEdge;

/// Sort edges by value, largest first, then keep at most `cap`.
///
/// The sort is stable, so equal values keep their encounter order
/// (row-major over the flow matrix).
pub fn rank_edges(mut edges: Vec<FlowEdge>, cap: Option<usize>) -> Vec<FlowEdge> {
    edges.sort_by(|a, b| b.value.total_cmp(&a.value));
    if let Some(cap) = cap {
        edges.truncate(cap);
    }
    edges
}
