//! Prerequisite-aware reordering of a selected path.

use crate::types::Course;

/// Stable topological order over prerequisite skills.
///
/// Course `b` must follow course `a` when one of `b`'s prerequisites is a
/// skill that `a` teaches. At every step the earliest remaining course whose
/// dependencies are already placed goes next. When the remaining courses form
/// a cycle, the earliest remaining one is placed to break it.
#[must_use]
pub fn order_by_prerequisites(courses: &[Course]) -> Vec<Course> {
    let n = courses.len();
    let depends_on: Vec<Vec<usize>> = courses
        .iter()
        .enumerate()
        .map(|(j, dependent)| {
            courses
                .iter()
                .enumerate()
                .filter(|(i, provider)| {
                    *i != j
                        && dependent
                            .prerequisites
                            .iter()
                            .any(|skill| provider.teaches(skill))
                })
                .map(|(i, _)| i)
                .collect()
        })
        .collect();

    let mut placed = vec![false; n];
    let mut ordered = Vec::with_capacity(n);
    while ordered.len() < n {
        let ready = (0..n).find(|&j| !placed[j] && depends_on[j].iter().all(|&i| placed[i]));
        let next = match ready {
            Some(j) => j,
            None => {
                let Some(j) = (0..n).find(|&j| !placed[j]) else {
                    break;
                };
                tracing::debug!(
                    target: "skillpath::optimizer",
                    course = %courses[j].id,
                    "prerequisite cycle; keeping insertion order"
                );
                j
            }
        };
        placed[next] = true;
        ordered.push(courses[next].clone());
    }

    ordered
}
