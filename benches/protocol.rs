//! Protocol encoding benchmark suite.
//!
//! Benchmarks the per-frame work done on the connection task:
//! - Request id generation
//! - Outbound envelope encoding at different payload sizes
//! - Inbound parsing and typed views
//!
//! Run with: cargo bench --bench protocol
//! Results saved to: target/criterion/

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use master_console::protocol::InboundMessage;
use master_console::{RequestIdGenerator, transport::Session};
use serde_json::{Value, json};

// ============================================================================
// Benchmark Parameters
// ============================================================================

const PAYLOAD_ENTRIES: &[usize] = &[0, 16, 256];

fn payload(entries: usize) -> Value {
    let config: serde_json::Map<String, Value> = (0..entries)
        .map(|i| (format!("key.{i}"), Value::String(format!("value {i}"))))
        .collect();
    json!({ "id": "42", "config": config })
}

fn open_session() -> Session {
    let mut session = Session::new();
    session.open();
    session
}

// ============================================================================
// Benchmark: Request Ids
// ============================================================================

fn bench_request_ids(c: &mut Criterion) {
    c.bench_function("request_id_next", |b| {
        let mut ids = RequestIdGenerator::new();
        b.iter(|| black_box(ids.next()));
    });
}

// ============================================================================
// Benchmark: Outbound Encoding
// ============================================================================

fn bench_encode_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_request");

    for &entries in PAYLOAD_ENTRIES {
        let data = payload(entries);
        group.bench_with_input(BenchmarkId::from_parameter(entries), &data, |b, data| {
            let mut session = open_session();
            b.iter(|| {
                session
                    .encode_request("/liveactivity/configuration/set", black_box(data.clone()))
                    .map(|(_, frame)| frame.len())
            });
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Inbound Parsing
// ============================================================================

fn bench_decode(c: &mut Criterion) {
    let response = json!({
        "type": "commandResponse",
        "result": "success",
        "requestId": "1f",
        "data": payload(16),
    })
    .to_string();

    let status = json!({
        "type": "statusUpdate",
        "data": {
            "type": "liveactivity",
            "uuid": "a6b0c1c4-1f7e-4d5a-9a3e-5c1d2e3f4a5b",
            "id": "42",
            "runtimeState": "RUNNING",
            "runtimeStateDescription": "space.activity.state.running",
            "statusTime": 1_700_000_000_000_u64,
        },
    })
    .to_string();

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes(response.len() as u64));

    group.bench_function("command_response", |b| {
        b.iter(|| {
            InboundMessage::parse(black_box(&response))
                .and_then(|message| message.to_command_response())
                .map(|response| response.is_success())
        });
    });

    group.bench_function("status_update", |b| {
        b.iter(|| {
            InboundMessage::parse(black_box(&status))
                .ok()
                .and_then(|message| message.to_status_update())
                .map(|update| update.data.is_live_activity())
        });
    });

    group.bench_function("malformed", |b| {
        b.iter(|| InboundMessage::parse(black_box("{not json")).is_err());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_request_ids,
    bench_encode_request,
    bench_decode
);
criterion_main!(benches);
