//! Benchmark for PV topology translation
//!
//! Covers the single-zone and multi-term collapse paths of CSI to in-tree
//! translation, plus allowed topology rewriting.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use csi_topology_translation::{InTreePlugin, TopologyTranslator};
use k8s_openapi::api::core::v1::{
    NodeSelector, NodeSelectorRequirement, NodeSelectorTerm, PersistentVolume,
    PersistentVolumeSpec, TopologySelectorLabelRequirement, TopologySelectorTerm,
    VolumeNodeAffinity,
};

fn csi_pv(key: &str, zones: &[&str]) -> PersistentVolume {
    let terms = zones
        .iter()
        .map(|zone| NodeSelectorTerm {
            match_expressions: Some(vec![NodeSelectorRequirement {
                key: key.to_string(),
                operator: "In".to_string(),
                values: Some(vec![zone.to_string()]),
            }]),
            match_fields: None,
        })
        .collect();

    PersistentVolume {
        spec: Some(PersistentVolumeSpec {
            node_affinity: Some(VolumeNodeAffinity {
                required: Some(NodeSelector {
                    node_selector_terms: terms,
                }),
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn bench_csi_to_in_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("csi_to_in_tree");
    group.throughput(Throughput::Elements(1));

    let translator = TopologyTranslator::new(InTreePlugin::GcePersistentDisk);
    let single = csi_pv(translator.topology_key(), &["us-east1-a"]);
    let multi = csi_pv(
        translator.topology_key(),
        &["us-east1-d", "us-east1-a", "us-east1-c", "us-east1-b"],
    );

    group.bench_function("single_zone", |b| {
        b.iter_batched(
            || single.clone(),
            |mut pv| {
                let _ = translator.translate_csi_to_in_tree(black_box(&mut pv));
                pv
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("multi_term_collapse", |b| {
        b.iter_batched(
            || multi.clone(),
            |mut pv| {
                let _ = translator.translate_csi_to_in_tree(black_box(&mut pv));
                pv
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_allowed_topologies(c: &mut Criterion) {
    let mut group = c.benchmark_group("allowed_topologies");
    group.throughput(Throughput::Elements(1));

    let translator = TopologyTranslator::new(InTreePlugin::GcePersistentDisk);
    let terms = vec![TopologySelectorTerm {
        match_label_expressions: Some(vec![TopologySelectorLabelRequirement {
            key: csi_topology_translation::LABEL_TOPOLOGY_ZONE.to_string(),
            values: vec!["us-east1-a".to_string(), "us-east1-b".to_string()],
        }]),
    }];

    group.bench_function("translate_zone_key", |b| {
        b.iter(|| {
            let _ = translator.translate_allowed_topologies(black_box(&terms));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_csi_to_in_tree, bench_allowed_topologies);
criterion_main!(benches);
