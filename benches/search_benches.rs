use criterion::{criterion_group, criterion_main, Criterion};
use fsearch::Searcher;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use std::fs::{self, File};
use std::path::Path;
use tempfile::TempDir;

const DIRS_PER_LEVEL: usize = 4;
const FILES_PER_DIR: usize = 8;
const DEPTH: usize = 3;

fn random_name() -> String {
    let mut rng = thread_rng();
    rng.sample_iter(&Alphanumeric).take(12).collect()
}

fn build_tree(dir: &Path, depth: usize) {
    for _ in 0..FILES_PER_DIR {
        File::create(dir.join(format!("{}.dat", random_name()))).unwrap();
    }
    if depth == 0 {
        return;
    }
    for _ in 0..DIRS_PER_LEVEL {
        let child = dir.join(random_name());
        fs::create_dir(&child).unwrap();
        build_tree(&child, depth - 1);
    }
}

// plant the needle in the last populated branch so every search
// has to cover real ground
fn plant_needle(dir: &Path) {
    let mut current = dir.to_path_buf();
    loop {
        let last_child = fs::read_dir(&current)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|entry| entry.path())
            .max();
        match last_child {
            Some(child) => current = child,
            None => break,
        }
    }
    File::create(current.join("needle.txt")).unwrap();
}

fn search_worker_counts(c: &mut Criterion) {
    let threads = [1, 2, 4, 8];
    let mut group = c.benchmark_group("search_worker_counts");

    let dir = TempDir::new().unwrap();
    build_tree(dir.path(), DEPTH);
    plant_needle(dir.path());

    for num_thread in threads.iter() {
        group.bench_with_input(
            format!("thread {}", num_thread),
            num_thread,
            |b, &num_thread| {
                let searcher = Searcher::with_workers(num_thread).unwrap();
                b.iter(|| {
                    let found = searcher.find(dir.path(), "needle.txt").unwrap();
                    assert!(found.is_some());
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, search_worker_counts);
criterion_main!(benches);
