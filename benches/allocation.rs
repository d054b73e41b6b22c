//! Allocation throughput for both sequence strategies over the in-memory store.

use std::{hint::black_box, sync::Arc, time::Duration};

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use docseq::core::{
    AllocatorSettings, AtomicCounter, DocumentService, InMemoryDocumentStore, OptimisticRetry,
    SequenceAllocator, SequenceStrategy, SystemClock,
};
use docseq::domain::{fiscal_year_label, Category, DocumentDraft, DocumentKind};

fn service(strategy: Box<dyn SequenceStrategy>) -> DocumentService {
    let settings = AllocatorSettings {
        backoff: Duration::ZERO,
        ..AllocatorSettings::default()
    };
    let allocator =
        SequenceAllocator::new(Arc::new(InMemoryDocumentStore::new()), strategy, settings)
            .expect("allocator");
    DocumentService::new(allocator, Arc::new(SystemClock))
}

fn benchmark_create(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("create_document");
    let date = NaiveDate::from_ymd_opt(2024, 6, 1).expect("date");

    for name in ["optimistic_retry", "atomic_counter"] {
        group.bench_with_input(BenchmarkId::new("strategy", name), &name, |bencher, &name| {
            let strategy: Box<dyn SequenceStrategy> = match name {
                "atomic_counter" => Box::new(AtomicCounter),
                _ => Box::new(OptimisticRetry),
            };
            let service = service(strategy);
            bencher.iter(|| {
                let document = service
                    .create(DocumentDraft::new(
                        DocumentKind::Transaction(Category::Income),
                        date,
                    ))
                    .expect("create");
                black_box(document.document_number)
            });
        });
    }

    group.finish();
}

fn benchmark_fiscal_year(criterion: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(2025, 3, 31).expect("date");
    criterion.bench_function("fiscal_year_label", |bencher| {
        bencher.iter(|| black_box(fiscal_year_label(black_box(date))));
    });
}

criterion_group!(benches, benchmark_create, benchmark_fiscal_year);
criterion_main!(benches);
