use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fractal_zoo::core::actions::cancellation::NeverCancel;
use fractal_zoo::core::data::parameter_map::ParameterMap;
use fractal_zoo::core::fractals::escape_time::formula::EscapeTimeFormula;
use fractal_zoo::core::fractals::escape_time::render::render_escape_time;
use fractal_zoo::core::palettes::copper::CopperPalette;
use fractal_zoo::{Dimensions, EngineConfig};

fn bench_escape_time(c: &mut Criterion) {
    let config = EngineConfig::default();
    let palette = CopperPalette::default();
    let parameters: ParameterMap = [("centerX", -0.5), ("centerY", 0.0), ("scale", 1.0)]
        .into_iter()
        .collect();

    let mut group = c.benchmark_group("escape_time");
    for (width, height) in [(320, 240), (800, 600)] {
        let dimensions = Dimensions::new(width, height).unwrap();
        for formula in [EscapeTimeFormula::Mandelbrot, EscapeTimeFormula::Julia] {
            group.bench_with_input(
                BenchmarkId::new(formula.display_name(), format!("{width}x{height}")),
                &dimensions,
                |b, &dimensions| {
                    b.iter(|| {
                        render_escape_time(
                            formula,
                            black_box(&parameters),
                            &palette,
                            dimensions,
                            &config,
                            &NeverCancel,
                        )
                        .unwrap()
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_escape_time);
criterion_main!(benches);
