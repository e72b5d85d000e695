// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

mod common;

use crate::common::utils::{self, FakePredictor};

use proteinscape::{
    errors::ProteinScapeError,
    pipeline::run_single,
    render::{
        barchart::{buffer_text, chart_buffer, chart_svg, SKY_BLUE},
        RenderStyle,
    },
    DEFAULT_SEQUENCE,
};

#[test]
fn single_prediction_renders_page() {
    let mut session = utils::session_with(FakePredictor::new());
    let rendered = run_single(&mut session, DEFAULT_SEQUENCE, RenderStyle::Stick).expect("render");
    let svg = chart_svg(&rendered.composition, SKY_BLUE);
    let html = rendered
        .viewer
        .to_html(&rendered.title(), Some(&svg))
        .expect("html");

    assert!(html.contains("Predicted Protein Structure"));
    assert!(html.contains("{\"stick\":{\"color\":\"spectrum\"}}"));
    assert!(html.contains("ATOM      6  CA  LYS A   2"));
    assert!(html.contains("<svg xmlns"));
    assert!(session.last_structure().is_some());
}

#[test]
fn repeated_single_prediction_is_cached() {
    let mut session = utils::session_with(FakePredictor::new());
    let a = run_single(&mut session, "mktayiak", RenderStyle::Cartoon).expect("first");
    let b = run_single(&mut session, "mktayiak", RenderStyle::Stick).expect("second");
    assert_eq!(a.structure, b.structure);
    assert_eq!(session.predictor().request_count(), 1);
}

#[test]
fn failed_single_prediction_leaves_session_usable() {
    let mut session = utils::session_with(FakePredictor::failing_on(&["MKT"]));
    assert!(matches!(
        run_single(&mut session, "MKT", RenderStyle::Cartoon),
        Err(ProteinScapeError::PredictionRequest(_))
    ));
    assert!(session.last_structure().is_none());
    assert!(run_single(&mut session, "MKTA", RenderStyle::Cartoon).is_ok());
}

#[test]
fn composition_chart_renders_without_panic() {
    let mut session = utils::session_with(FakePredictor::new());
    let rendered = run_single(&mut session, DEFAULT_SEQUENCE, RenderStyle::Cartoon).expect("render");
    let screen = buffer_text(&chart_buffer(&rendered.composition, SKY_BLUE));
    assert!(!screen.trim().is_empty());
    assert!(screen.contains("Amino Acid Distribution"));
}
