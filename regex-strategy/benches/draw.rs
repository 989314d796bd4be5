//! cargo bench --bench draw
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use regex_strategy::{from_regex, strategy::Drawer};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("compile_email", |b| {
        b.iter(|| from_regex(black_box(r"[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}")).unwrap())
    });

    {
        let strategy = from_regex(r"[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").unwrap();
        let mut drawer = Drawer::seeded(0);
        c.bench_function("draw_email", |b| {
            b.iter(|| drawer.draw(black_box(&strategy)))
        });
    }

    {
        // Builds the whole Nd/L/N class tables once, then only draws
        let strategy = from_regex(r"\w+\s\d{4}").unwrap();
        let mut drawer = Drawer::seeded(0);
        dbg!(drawer.draw(&strategy).unwrap());
        c.bench_function("draw_unicode_categories", |b| {
            b.iter(|| drawer.draw(black_box(&strategy)))
        });
    }

    {
        let strategy = from_regex(r#"([\'"])[a-z]+\1"#).unwrap();
        let mut drawer = Drawer::seeded(0);
        c.bench_function("draw_back_reference", |b| {
            b.iter(|| drawer.draw(black_box(&strategy)))
        });
    }

    {
        // Mostly rejected by the filter
        let strategy = from_regex(r"^(<)?a(?(1)>)$").unwrap();
        let mut drawer = Drawer::seeded(0);
        c.bench_function("find_conditional", |b| {
            b.iter(|| drawer.find(black_box(&strategy), |_| true))
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
