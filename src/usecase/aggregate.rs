use crate::domain::graph::{Leaders, UNASSIGNED};

pub const TOP_COMPONENTS: usize = 5;

/// Size of every component, largest first.
pub fn component_sizes(leaders: &Leaders) -> Vec<usize> {
    let mut counts = vec![0usize; leaders.len()];
    for &l in leaders.as_slice() {
        if l != UNASSIGNED {
            counts[l] += 1;
        }
    }

    let mut sizes: Vec<usize> = counts.into_iter().filter(|&c| c > 0).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes
}

/// The `k` largest component sizes, zero-padded to exactly `k` entries.
pub fn largest_component_sizes(leaders: &Leaders, k: usize) -> Vec<usize> {
    let mut sizes = component_sizes(leaders);
    sizes.resize(k, 0);
    sizes
}

pub fn top_components(leaders: &Leaders) -> [usize; TOP_COMPONENTS] {
    let mut top = [0usize; TOP_COMPONENTS];
    top.copy_from_slice(&largest_component_sizes(leaders, TOP_COMPONENTS));
    top
}
