#![allow(clippy::cast_precision_loss)]

use std::future::Future;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use log::debug;
use rand::Rng;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval, sleep};

use crate::domain::weather::ForecastBundle;

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickFrame,
    TickRefresh,
    Input(Event),
    FetchStarted,
    FetchSucceeded(ForecastBundle),
    FetchFailed(String),
    Quit,
}

/// Owner of a repeating background task. Stopping or dropping the handle
/// aborts the task, so a loop never outlives whoever started it.
#[derive(Debug)]
pub struct TaskHandle {
    name: &'static str,
    handle: Option<JoinHandle<()>>,
}

impl TaskHandle {
    fn spawn<F>(name: &'static str, task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            name,
            handle: Some(tokio::spawn(task)),
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("stopped {} task", self.name);
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

pub fn start_frame_task(tx: Sender<AppEvent>, fps: u8) -> TaskHandle {
    let period = Duration::from_millis(1000_u64 / u64::from(fps.max(1)));
    TaskHandle::spawn("frame", async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::TickFrame).await.is_err() {
                break;
            }
        }
    })
}

pub fn start_refresh_task(tx: Sender<AppEvent>, refresh_secs: u64) -> TaskHandle {
    TaskHandle::spawn("refresh", async move {
        let base = refresh_secs.max(10);
        loop {
            let wait_secs = {
                let mut rng = rand::rng();
                let jitter = rng.random_range(-0.1f32..0.1f32);
                ((base as f32) * (1.0 + jitter)).max(1.0)
            };
            sleep(Duration::from_secs_f32(wait_secs)).await;
            if tx.send(AppEvent::TickRefresh).await.is_err() {
                break;
            }
        }
    })
}

pub fn schedule_retry(tx: Sender<AppEvent>, delay: Duration) -> TaskHandle {
    TaskHandle::spawn("retry", async move {
        sleep(delay.max(Duration::from_secs(1))).await;
        let _ = tx.send(AppEvent::TickRefresh).await;
    })
}
