use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use tracing::{debug, warn};

use crate::error::{BurnScarError, Result};

use super::types::{PipelineStage, ProgressReporter};

/// One independent unit of work: a scene or a year.
#[derive(Clone, Debug)]
pub struct WorkUnit<T> {
    /// Human-readable identity used in logs and failure messages.
    pub name: String,
    pub task: T,
}

impl<T> WorkUnit<T> {
    pub fn new(name: impl Into<String>, task: T) -> Self {
        Self {
            name: name.into(),
            task,
        }
    }
}

type Queued<T> = (usize, WorkUnit<T>);
type Finished<R> = (usize, String, Result<R>);

/// Run `units` on a pool of `workers` threads and collect one result per
/// unit, in unit order.
///
/// Workers pull from a shared task queue and exit once it is empty. The
/// first failure raises a shared cancellation flag; units dequeued after
/// that are reported as cancelled without running, while units already
/// running finish normally. The error returned names the stage and the
/// first unit that actually failed.
pub fn run_units<T, R, F>(
    stage: PipelineStage,
    units: Vec<WorkUnit<T>>,
    workers: usize,
    reporter: &dyn ProgressReporter,
    work: F,
) -> Result<Vec<R>>
where
    T: Send,
    R: Send,
    F: Fn(&WorkUnit<T>) -> Result<R> + Sync,
{
    let total = units.len();
    reporter.begin_stage(stage, Some(total));
    if total == 0 {
        reporter.finish_stage();
        return Ok(Vec::new());
    }

    let (task_tx, task_rx) = mpsc::channel::<Queued<T>>();
    for queued in units.into_iter().enumerate() {
        // The receiver is alive until this function returns.
        let _ = task_tx.send(queued);
    }
    drop(task_tx);

    let task_rx = Arc::new(Mutex::new(task_rx));
    let cancel = Arc::new(AtomicBool::new(false));
    let (result_tx, result_rx) = mpsc::channel::<Finished<R>>();
    let pool_size = workers.clamp(1, total);
    debug!(%stage, units = total, workers = pool_size, "Dispatching work units");

    let mut slots: Vec<Option<Result<R>>> = (0..total).map(|_| None).collect();
    let mut names: Vec<String> = vec![String::new(); total];

    thread::scope(|scope| -> Result<()> {
        for id in 0..pool_size {
            let task_rx = Arc::clone(&task_rx);
            let cancel = Arc::clone(&cancel);
            let result_tx = result_tx.clone();
            let work = &work;
            thread::Builder::new()
                .name(format!("burnscar-worker-{id}"))
                .spawn_scoped(scope, move || {
                    worker_loop(&task_rx, &cancel, &result_tx, work);
                })?;
        }
        drop(result_tx);

        let mut done = 0usize;
        while done < total {
            let Ok((index, name, result)) = result_rx.recv() else {
                break;
            };
            done += 1;
            reporter.advance(done);
            slots[index] = Some(result);
            names[index] = name;
        }
        Ok(())
    })?;
    reporter.finish_stage();

    collect_results(stage, slots, names)
}

fn worker_loop<T, R, F>(
    task_rx: &Mutex<mpsc::Receiver<Queued<T>>>,
    cancel: &AtomicBool,
    result_tx: &mpsc::Sender<Finished<R>>,
    work: &F,
) where
    F: Fn(&WorkUnit<T>) -> Result<R>,
{
    loop {
        let next = match task_rx.lock() {
            Ok(rx) => rx.try_recv().ok(),
            Err(_) => None,
        };
        let Some((index, unit)) = next else {
            break;
        };

        let result = if cancel.load(Ordering::SeqCst) {
            Err(BurnScarError::Cancelled)
        } else {
            let result = work(&unit);
            if let Err(e) = &result {
                warn!(unit = %unit.name, error = %e, "Work unit failed");
                cancel.store(true, Ordering::SeqCst);
            }
            result
        };

        if result_tx.send((index, unit.name, result)).is_err() {
            break;
        }
    }
}

fn collect_results<R>(
    stage: PipelineStage,
    slots: Vec<Option<Result<R>>>,
    names: Vec<String>,
) -> Result<Vec<R>> {
    let mut results = Vec::with_capacity(slots.len());
    let mut cancelled = false;
    for (index, (slot, name)) in slots.into_iter().zip(names).enumerate() {
        match slot {
            Some(Ok(value)) => results.push(value),
            Some(Err(BurnScarError::Cancelled)) => cancelled = true,
            Some(Err(e)) => {
                return Err(BurnScarError::UnitFailed {
                    stage: stage.to_string(),
                    unit: name,
                    message: e.to_string(),
                })
            }
            None => {
                return Err(BurnScarError::UnitFailed {
                    stage: stage.to_string(),
                    unit: format!("unit {index}"),
                    message: "worker exited without reporting a result".into(),
                })
            }
        }
    }
    if cancelled {
        return Err(BurnScarError::Cancelled);
    }
    Ok(results)
}
