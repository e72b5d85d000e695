// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use serde::Serialize;

use crate::errors::ProteinScapeError;
use crate::predict::{StructurePredictor, StructureText};
use crate::render::{describe_composition, render, Composition, RenderStyle, Viewer};
use crate::seq::record::SeqRecord;
use crate::seq::validate::{check_batch_entry, check_sequence};
use crate::session::Session;

/// One sequence that made it all the way through: predicted and rendered.
#[derive(Debug, Clone)]
pub struct RenderedStructure {
    /// Index in the batch (0-based); `None` for a single submission.
    pub position: Option<usize>,
    pub header: Option<String>,
    pub sequence: String,
    pub structure: StructureText,
    pub viewer: Viewer,
    pub composition: Composition,
}

impl RenderedStructure {
    pub fn title(&self) -> String {
        match self.position {
            None => String::from("Predicted Protein Structure"),
            Some(idx) => format!("Predicted Structure for Sequence {}", idx + 1),
        }
    }
}

/// What `run_batch()` reports while it works, in order, for each sequence: at most one of
/// `Skipped`, `Failed` or `Rendered`, then `Progress`.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    Skipped {
        position: usize,
        reason: &'a ProteinScapeError,
    },
    Failed {
        position: usize,
        error: &'a ProteinScapeError,
    },
    Rendered(&'a RenderedStructure),
    Progress {
        done: usize,
        total: usize,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub cancelled: bool,
}

impl BatchSummary {
    pub fn unprocessed(&self) -> usize {
        self.total - self.succeeded - self.skipped - self.failed
    }
}

fn predict_and_render<P: StructurePredictor>(
    session: &mut Session<P>,
    position: Option<usize>,
    header: Option<&str>,
    sequence: &str,
    style: RenderStyle,
) -> Result<RenderedStructure, ProteinScapeError> {
    let structure = session.predict(sequence)?;
    render_structure(position, header, sequence, structure, style)
}

fn render_structure(
    position: Option<usize>,
    header: Option<&str>,
    sequence: &str,
    structure: StructureText,
    style: RenderStyle,
) -> Result<RenderedStructure, ProteinScapeError> {
    let viewer = render(&structure, style)?;
    Ok(RenderedStructure {
        position,
        header: header.map(String::from),
        sequence: String::from(sequence),
        structure,
        viewer,
        composition: describe_composition(sequence),
    })
}

/// Single submission: any error is returned as-is, and nothing is rendered.
pub fn run_single<P: StructurePredictor>(
    session: &mut Session<P>,
    sequence: &str,
    style: RenderStyle,
) -> Result<RenderedStructure, ProteinScapeError> {
    check_sequence(sequence)?;
    info!(
        "predicting single sequence ({} residues)",
        sequence.chars().count()
    );
    let structure = session.predict(sequence)?;
    session.set_last_structure(structure.clone());
    render_structure(None, None, sequence, structure, style)
}

/// Processes `records` one after the other. A sequence that is rejected or fails is reported and
/// skipped; the others go on. If `on_event` fails for a `Rendered` event, that sequence counts as
/// failed. `cancel` is checked before each sequence.
pub fn run_batch<P, F>(
    session: &mut Session<P>,
    records: &[SeqRecord],
    style: RenderStyle,
    cancel: Option<&AtomicBool>,
    mut on_event: F,
) -> BatchSummary
where
    P: StructurePredictor,
    F: FnMut(BatchEvent<'_>) -> Result<(), ProteinScapeError>,
{
    let total = records.len();
    let mut summary = BatchSummary {
        total,
        ..Default::default()
    };
    session.reset_position();

    for (idx, record) in records.iter().enumerate() {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            warn!("batch cancelled after {} of {} sequences", idx, total);
            summary.cancelled = true;
            break;
        }

        match check_batch_entry(&record.sequence) {
            Err(reason) => {
                debug!("sequence {} rejected: {}", idx + 1, reason);
                summary.skipped += 1;
                notify(
                    &mut on_event,
                    BatchEvent::Skipped {
                        position: idx,
                        reason: &reason,
                    },
                );
            }
            Ok(()) => {
                let outcome = predict_and_render(
                    session,
                    Some(idx),
                    Some(&record.header),
                    &record.sequence,
                    style,
                )
                .and_then(|rendered| on_event(BatchEvent::Rendered(&rendered)));
                match outcome {
                    Ok(()) => summary.succeeded += 1,
                    Err(error) => {
                        debug!("sequence {} failed: {}", idx + 1, error);
                        summary.failed += 1;
                        notify(
                            &mut on_event,
                            BatchEvent::Failed {
                                position: idx,
                                error: &error,
                            },
                        );
                    }
                }
            }
        }

        let done = session.advance();
        notify(&mut on_event, BatchEvent::Progress { done, total });
    }

    info!(
        "batch done: {} of {} succeeded ({} skipped, {} failed)",
        summary.succeeded, total, summary.skipped, summary.failed
    );
    summary
}

// Errors from the handler only matter for `Rendered` events.
fn notify<F>(on_event: &mut F, event: BatchEvent<'_>)
where
    F: FnMut(BatchEvent<'_>) -> Result<(), ProteinScapeError>,
{
    if let Err(e) = on_event(event) {
        warn!("event handler: {}", e);
    }
}
