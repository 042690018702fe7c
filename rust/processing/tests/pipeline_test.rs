// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Sequential and parallel decoding must produce the same model
use qdf_lite_core::{parse_qdf, Geometry};
use qdf_lite_processing::{process_qdf, ModelSummary, ProcessingConfig};

/// A few thousand lines mixing every kind, rejects and noise
fn generated_assembly() -> String {
    let mut text = String::from("0,QDF generated;\n");
    for i in 0..600 {
        text.push_str(&format!(
            "material3,{i},\"mat {i}\",0,0.{d},0.5,0.25,0,0,0,0,0,0,0,0,0,1;\n",
            d = i % 10
        ));
        text.push_str(&format!(
            "connector3,{},{{0.5,0,0,0.5,{},0,0}},{},0,{},0,0,0;\n",
            10_000 + i,
            i * 10,
            i,
            i % 64
        ));
        text.push_str(&format!(
            "tube2,{},{{1,0,0,0,0,{},0}},{},{},25,25;\n",
            20_000 + i,
            i,
            i,
            100 + i
        ));
        if i % 7 == 0 {
            text.push_str(&format!("clamp2,{},{{1,0,0,0,0,0,0}},1,0,99;\n", 30_000 + i));
        }
        if i % 11 == 0 {
            text.push_str("// spacer\n\n");
        }
        text.push_str(&format!("slide-new2,{},{{1,0,0,0,0,0,{}}},2,1;\n", 40_000 + i, i));
    }
    text
}

#[test]
fn test_parallel_matches_sequential() {
    let text = generated_assembly();
    let sequential = process_qdf(&text, &ProcessingConfig::defaults().sequential()).unwrap();
    let parallel = process_qdf(&text, &ProcessingConfig::defaults().parallel()).unwrap();

    assert_eq!(sequential.model, parallel.model);
    assert_eq!(sequential.diagnostics, parallel.diagnostics);
}

#[test]
fn test_pipeline_matches_core_parse() {
    let text = generated_assembly();
    let processed = process_qdf(&text, &ProcessingConfig::defaults().parallel()).unwrap();
    assert_eq!(processed.model, parse_qdf(&text));
}

#[test]
fn test_parallel_preserves_order() {
    let text = generated_assembly();
    let processed = process_qdf(&text, &ProcessingConfig::defaults().parallel()).unwrap();

    let tube_ids: Vec<i64> = processed.model.tubes().map(|t| t.id).collect();
    let expected: Vec<i64> = (0..600).map(|i| 20_000 + i).collect();
    assert_eq!(tube_ids, expected);

    let flat: Vec<i64> = processed.model.geometries().iter().map(Geometry::id).collect();
    assert_eq!(flat[0], 10_000);
    assert_eq!(flat[1], 20_000);
    assert_eq!(flat[2], 40_000);
}

#[test]
fn test_generated_diagnostics() {
    let text = generated_assembly();
    let processed = process_qdf(&text, &ProcessingConfig::defaults()).unwrap();
    let d = &processed.diagnostics;

    assert_eq!(d.accepted["material3"], 600);
    assert_eq!(d.accepted["connector3"], 600);
    assert_eq!(d.accepted["tube2"], 600);
    assert_eq!(d.accepted["slide-new2"], 600);
    // Every clamp carries a visibility range
    assert_eq!(d.rejected_total(), 86);
    assert!(!d.accepted.contains_key("clamp2"));
    assert_eq!(d.rejections.len(), 50);
}

#[test]
fn test_summary_of_generated() {
    let text = generated_assembly();
    let processed = process_qdf(&text, &ProcessingConfig::defaults()).unwrap();
    let summary = ModelSummary::from_model(&processed.model);

    assert_eq!(summary.geometry_count, 1800);
    assert_eq!(summary.material_count, 600);
    assert_eq!(summary.per_kind["slide2"], 600);
    assert_eq!(summary.dangling_material_refs, 0);
    assert_eq!(summary.connector_topologies.values().sum::<usize>(), 600);
}
