//! Recording overhead benchmarks.
//!
//! Measures the cost the recorder adds to a dispatch, and dump capture on
//! its own.

use std::sync::Arc;

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};

use log_to_panel::bus::{from_fn, HandledStamp, Message, MessageBus};
use log_to_panel::dump::{dump_to_string, Dump, DumpError, DumpLimits, Dumper, Node, RenderTarget};
use log_to_panel::{DebugConfig, ExecutionContext, PanelRecorder};

struct CreateOrder {
    id: u64,
    lines: Vec<String>,
}

impl Dump for CreateOrder {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
        d.object("CreateOrder", |o| {
            o.field("id", &self.id)?;
            o.field("lines", &self.lines)
        })
    }
}

impl Message for CreateOrder {}

fn order(lines: usize) -> CreateOrder {
    CreateOrder {
        id: 42,
        lines: (0..lines).map(|i| format!("sku-{i}")).collect(),
    }
}

fn bus(enabled: Option<bool>, context: ExecutionContext) -> (Arc<PanelRecorder>, MessageBus) {
    let recorder = Arc::new(PanelRecorder::with_config(
        "command.bus",
        enabled,
        DebugConfig::development().with_context(context),
    ));
    let bus = MessageBus::builder("command.bus")
        .middleware(Arc::clone(&recorder))
        .middleware(from_fn(|envelope, next| {
            next.run(envelope.with(HandledStamp::new("order_handler", "created")))
        }))
        .build();
    (recorder, bus)
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    let (_recorder, disabled) = bus(Some(false), ExecutionContext::Panel);
    group.bench_function("disabled", |b| {
        b.iter(|| black_box(disabled.dispatch(order(4)).unwrap()))
    });

    for (name, context) in [
        ("text", ExecutionContext::Console { colors: false }),
        ("ansi", ExecutionContext::Console { colors: true }),
        ("html", ExecutionContext::Panel),
    ] {
        // Fresh recorder per batch so the record list stays small.
        group.bench_function(BenchmarkId::new("recorded", name), |b| {
            b.iter_batched(
                || bus(Some(true), context),
                |(recorder, bus)| {
                    bus.dispatch(order(4)).unwrap();
                    black_box(recorder.len())
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_dump_capture(c: &mut Criterion) {
    let mut group = c.benchmark_group("dump_capture");

    for lines in [1usize, 100, 1_000] {
        let message = order(lines);
        group.throughput(Throughput::Elements(lines as u64));
        group.bench_function(BenchmarkId::new("text", lines), |b| {
            b.iter(|| {
                dump_to_string(black_box(&message), DumpLimits::default(), RenderTarget::Text)
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_dump_capture);
criterion_main!(benches);
