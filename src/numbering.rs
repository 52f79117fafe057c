//! Hierarchical numbering and parent/child linking of detected sections.

use crate::section::{Level, Section};

/// Numbers sections per rank in document order.
///
/// One counter is kept per rank. Visiting a section at rank L increments
/// counter L and zeroes every deeper counter, so numbering restarts under
/// each new ancestor.
pub fn assign_numbers(sections: &mut [Section]) {
    let mut counters = [0usize; Level::ALL.len()];

    for section in sections.iter_mut() {
        let depth = section.level.depth();
        counters[depth] += 1;
        for deeper in &mut counters[depth + 1..] {
            *deeper = 0;
        }
        section.number = counters[depth];
    }
}

/// Fills `parent_index` and `children_indices` from rank order.
///
/// A section's parent is the nearest preceding section of a shallower rank;
/// sections with no such predecessor are roots.
pub fn link_hierarchy(sections: &mut [Section]) {
    let mut stack: Vec<usize> = Vec::new();

    for index in 0..sections.len() {
        let level = sections[index].level;
        while stack
            .last()
            .is_some_and(|&open| sections[open].level >= level)
        {
            stack.pop();
        }

        sections[index].parent_index = stack.last().copied();
        sections[index].children_indices.clear();
        if let Some(&parent) = stack.last() {
            sections[parent].children_indices.push(index);
        }
        stack.push(index);
    }
}

#[cfg(test)]
#[path = "tests/numbering.rs"]
mod tests;
