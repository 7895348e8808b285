//! Upstream response translation benchmarks

use axum::body::Bytes;
use callproxy::middleware::validation::decode_body;
use callproxy::models::*;
use callproxy::services::translator;
use callproxy::services::UpstreamResponse;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

fn response(body: String) -> UpstreamResponse {
    UpstreamResponse {
        status: 200,
        body: Bytes::from(body),
    }
}

/// Build a pathway graph with `count` nodes chained by edges
fn create_pathway_body(count: usize) -> String {
    let nodes: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "id": i.to_string(),
                "type": "Default",
                "position": {"x": i * 40, "y": i * 80},
                "data": {
                    "name": format!("Node {}", i),
                    "prompt": "Ask the caller how we can help",
                    "isStart": i == 0,
                    "modelOptions": {"modelType": "smart", "temperature": 0.2}
                }
            })
        })
        .collect();
    let edges: Vec<_> = (1..count)
        .map(|i| {
            json!({
                "id": format!("e{}", i),
                "source": (i - 1).to_string(),
                "target": i.to_string(),
                "label": "next"
            })
        })
        .collect();

    json!({"name": "Support", "nodes": nodes, "edges": edges}).to_string()
}

fn bench_pathway_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathway_decoding");

    for count in [1, 10, 100] {
        let upstream = response(create_pathway_body(count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &upstream, |b, upstream| {
            b.iter(|| {
                let pathway: PathwayGetResponse = translator::decode(black_box(upstream)).unwrap();
                black_box(pathway)
            })
        });
    }

    group.finish();
}

fn bench_envelope_unwrap(c: &mut Criterion) {
    let upstream = response(
        json!({
            "data": {
                "chat_id": "ch1",
                "assistant_response": "Hello! How can I help?",
                "current_node_id": "2",
                "current_node_name": "Greeting",
                "chat_history": [
                    {"role": "user", "content": "Hi"},
                    {"role": "assistant", "content": "Hello! How can I help?"}
                ],
                "pathway_id": "p1",
                "variables": {"name": "Ada"}
            },
            "errors": null
        })
        .to_string(),
    );

    c.bench_function("envelope_unwrap", |b| {
        b.iter(|| {
            let data: SendMessageData = translator::decode_envelope(black_box(&upstream)).unwrap();
            black_box(data)
        })
    });
}

fn bench_request_validation(c: &mut Criterion) {
    let body = br#"{"goal":"qualify","questions":[["Was the caller interested?","boolean"],["Budget?","string"]]}"#;

    c.bench_function("request_validation", |b| {
        b.iter(|| {
            let request: AnalyzeRequest = decode_body(black_box(body)).unwrap();
            black_box(request)
        })
    });
}

criterion_group!(
    benches,
    bench_pathway_decoding,
    bench_envelope_unwrap,
    bench_request_validation
);

criterion_main!(benches);
