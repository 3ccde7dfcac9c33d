//! Benchmarks for page index loading and lookups.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use docindex_tree::{Node, Page, PageIndex, Redirect, load_index};

/// Create a tree with specified depth and breadth, plus one redirect per page.
fn create_tree(depth: usize, breadth: usize) -> Vec<Node> {
    fn create_level(prefix: &str, current_depth: usize, max_depth: usize, breadth: usize) -> Vec<Node> {
        if current_depth > max_depth {
            return Vec::new();
        }

        let mut nodes = Vec::with_capacity(breadth * 2);
        for i in 0..breadth {
            let href = format!("section-{i}");
            let path = format!("{prefix}/{href}");
            nodes.push(Node::Page(Page {
                title: format!("Section {i} at depth {current_depth}"),
                href: href.clone(),
                children: create_level(&path, current_depth + 1, max_depth, breadth),
            }));
            nodes.push(Node::HiddenRedirect(Redirect {
                href: format!("old-{href}"),
                to: path,
            }));
        }
        nodes
    }

    create_level("", 0, depth, breadth)
}

fn bench_load_bundled(c: &mut Criterion) {
    c.bench_function("load_bundled", |b| b.iter(|| load_index().unwrap()));
}

fn bench_lookup(c: &mut Criterion) {
    let index = PageIndex::from_nodes(create_tree(3, 5)).unwrap();

    let mut group = c.benchmark_group("lookup");

    group.bench_function("find_hit", |b| {
        b.iter(|| index.find_by_href("/section-0/section-1/section-2"))
    });

    group.bench_function("find_miss", |b| {
        b.iter(|| index.find_by_href("/nonexistent/path"))
    });

    group.bench_function("find_via_redirect", |b| {
        b.iter(|| index.find_by_href("/section-0/section-1/old-section-2"))
    });

    group.finish();
}

fn bench_menu(c: &mut Criterion) {
    let mut group = c.benchmark_group("menu");

    for (depth, breadth) in [(2, 5), (3, 4), (4, 3)] {
        let index = PageIndex::from_nodes(create_tree(depth, breadth)).unwrap();

        group.bench_with_input(
            BenchmarkId::new("flatten", format!("d{depth}_b{breadth}")),
            &index,
            |b, index| b.iter(|| index.flatten_menu().count()),
        );
        group.bench_with_input(
            BenchmarkId::new("navigation", format!("d{depth}_b{breadth}")),
            &index,
            |b, index| b.iter(|| index.navigation()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_load_bundled, bench_lookup, bench_menu);
criterion_main!(benches);
