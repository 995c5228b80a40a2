use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use skillpath_engine::{optimize_path, optimize_path_compact, Course, ProficiencyLevel};
use std::collections::HashMap;

fn pool(size: usize) -> (Vec<Course>, HashMap<String, f64>) {
    let courses: Vec<Course> = (0..size)
        .map(|i| Course {
            id: format!("C{i}"),
            title: format!("Course {i}"),
            skills: vec![format!("Skill{}", i % 7)],
            difficulty: ProficiencyLevel::from_ordinal((i % 5) as u8).unwrap_or_default(),
            duration_weeks: 2 + (i % 6) as u32,
            rating: 3.5 + (i % 3) as f64 * 0.5,
            completion_rate: 0.6 + (i % 4) as f64 * 0.1,
            prerequisites: Vec::new(),
        })
        .collect();
    let utilities = courses
        .iter()
        .enumerate()
        .map(|(i, course)| (course.id.clone(), 0.2 + (i % 9) as f64 * 0.08))
        .collect();
    (courses, utilities)
}

fn bench_optimizers(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize_path");
    for size in [4usize, 8, 12] {
        let (courses, utilities) = pool(size);
        group.bench_with_input(BenchmarkId::new("exact", size), &size, |b, _| {
            b.iter(|| optimize_path(black_box(&courses), black_box(&utilities), 24))
        });
        group.bench_with_input(BenchmarkId::new("compact", size), &size, |b, _| {
            b.iter(|| optimize_path_compact(black_box(&courses), black_box(&utilities), 24))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_optimizers);
criterion_main!(benches);
