use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use burnscar_core::error::BurnScarError;
use burnscar_core::pipeline::worker::{run_units, WorkUnit};
use burnscar_core::pipeline::{NoOpReporter, PipelineStage, ProgressReporter};

#[derive(Default)]
struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        self.events
            .lock()
            .unwrap()
            .push(format!("begin {stage} {total_items:?}"));
    }

    fn advance(&self, items_done: usize) {
        self.events.lock().unwrap().push(format!("advance {items_done}"));
    }

    fn finish_stage(&self) {
        self.events.lock().unwrap().push("finish".into());
    }
}

fn units(n: usize) -> Vec<WorkUnit<usize>> {
    (0..n).map(|i| WorkUnit::new(format!("unit-{i}"), i)).collect()
}

#[test]
fn test_results_are_returned_in_unit_order() {
    let results = run_units(PipelineStage::Thresholding, units(20), 4, &NoOpReporter, |unit| {
        Ok(unit.task * 10)
    })
    .unwrap();
    assert_eq!(results, (0..20).map(|i| i * 10).collect::<Vec<_>>());
}

#[test]
fn test_every_unit_runs_exactly_once() {
    let runs = AtomicUsize::new(0);
    run_units(PipelineStage::Aggregating, units(50), 8, &NoOpReporter, |_| {
        runs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
    .unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 50);
}

#[test]
fn test_failure_names_stage_and_unit() {
    let result = run_units(PipelineStage::Thresholding, units(5), 2, &NoOpReporter, |unit| {
        if unit.task == 3 {
            Err(BurnScarError::Config("corrupt scene".into()))
        } else {
            Ok(unit.task)
        }
    });
    match result {
        Err(BurnScarError::UnitFailed {
            stage,
            unit,
            message,
        }) => {
            assert_eq!(stage, "Thresholding scenes");
            assert_eq!(unit, "unit-3");
            assert!(message.contains("corrupt scene"));
        }
        other => panic!("expected unit failure, got {other:?}"),
    }
}

#[test]
fn test_failure_cancels_queued_units() {
    let runs = AtomicUsize::new(0);
    let result = run_units(PipelineStage::Aggregating, units(10), 1, &NoOpReporter, |unit| {
        runs.fetch_add(1, Ordering::SeqCst);
        if unit.task == 0 {
            Err(BurnScarError::Config("first year failed".into()))
        } else {
            Ok(())
        }
    });
    assert!(matches!(result, Err(BurnScarError::UnitFailed { .. })));
    // A single worker sees the failure before dequeuing anything else.
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_no_units_is_not_an_error() {
    let results: Vec<()> =
        run_units(PipelineStage::Compositing, Vec::<WorkUnit<()>>::new(), 4, &NoOpReporter, |_| {
            Ok(())
        })
        .unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_progress_is_reported_per_unit() {
    let reporter = RecordingReporter::default();
    run_units(PipelineStage::Thresholding, units(3), 1, &reporter, |_| Ok(())).unwrap();
    let events = reporter.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            "begin Thresholding scenes Some(3)".to_string(),
            "advance 1".into(),
            "advance 2".into(),
            "advance 3".into(),
            "finish".into(),
        ]
    );
}
