use std::hint::black_box;

use chrono::{NaiveDate, NaiveDateTime};
use criterion::{criterion_group, criterion_main, Criterion};

use strata::dataset::RasterDataset;
use strata::metadata::RasterMetadata;
use strata::persist::{PersistenceMode, Persistor};
use strata::relation::relate;
use strata::spatial::SpatialExtent;
use strata::temporal::AbsoluteTime;

fn date(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2001, 1, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn relation_benchmark(c: &mut Criterion) {
    c.bench_function("relate 400 span pairs", |b| {
        b.iter(|| {
            for start in 0..20 {
                for other in 0..20 {
                    black_box(relate((start, start + 5), black_box((other, other + 3))));
                }
            }
        })
    });

    let a = AbsoluteTime::new(date(1), Some(date(10)), Some(60));
    let b = AbsoluteTime::new(date(10), Some(date(20)), Some(-120));
    c.bench_function("absolute temporal_relation", |bench| {
        bench.iter(|| black_box(&a).temporal_relation(black_box(&b)))
    });
}

fn dataset_benchmark(c: &mut Criterion) {
    let persistor = Persistor::new(PersistenceMode::InMemory).unwrap();
    persistor.create_temporal_database().unwrap();
    let mut counter = 0u64;
    c.bench_function("insert raster dataset", |b| {
        b.iter(|| {
            counter += 1;
            let mut dataset = RasterDataset::new(&format!("map{counter}@bench")).unwrap();
            *dataset.absolute_time = AbsoluteTime::new(date(1), Some(date(2)), None);
            *dataset.spatial_extent = SpatialExtent::new(10.0, 0.0, 10.0, 0.0);
            *dataset.metadata = RasterMetadata::new("FCELL", 10, 10);
            dataset.insert(&persistor).unwrap();
        })
    });

    c.bench_function("load raster dataset", |b| {
        b.iter(|| {
            let mut dataset = RasterDataset::new("map1@bench").unwrap();
            dataset.load(&persistor).unwrap();
            black_box(dataset)
        })
    });
}

criterion_group!(benches, relation_benchmark, dataset_benchmark);
criterion_main!(benches);
