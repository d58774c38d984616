use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Result;
use chrono::{Local, NaiveTime, Timelike, Utc};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{info, warn};
use tokio::sync::mpsc;

use crate::{
    app::{
        events::{AppEvent, TaskHandle, schedule_retry, start_frame_task, start_refresh_task},
        settings::{MotionSetting, RuntimeSettings, load_runtime_settings, save_runtime_settings},
    },
    cli::Cli,
    data::forecast::{FORECAST_URL, ForecastClient},
    domain::weather::{ForecastBundle, Location, RefreshMetadata, SkyCategory},
    resilience::backoff::Backoff,
    sky::SkyState,
    ui::surface::{CELL_HEIGHT_PX, CELL_WIDTH_PX},
};

/// Without animation the clock still needs to tick.
const STILL_FPS: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Loading,
    Ready,
    Error,
    Quit,
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub running: bool,
    pub last_error: Option<String>,
    pub weather: Option<ForecastBundle>,
    pub refresh_meta: RefreshMetadata,
    pub settings: RuntimeSettings,
    pub settings_path: Option<PathBuf>,
    pub sky: SkyState,
    pub backoff: Backoff,
    pub fetch_in_flight: bool,
    pub last_frame_at: Instant,
    pub frame_tick: u64,
    forecast_url: String,
    tasks: Vec<TaskHandle>,
    retry: Option<TaskHandle>,
}

impl AppState {
    pub fn new(cli: &Cli) -> Self {
        let (settings, settings_path) = load_runtime_settings(cli);
        let sky = cli.seed.map_or_else(SkyState::new, SkyState::seeded);

        Self {
            mode: AppMode::Loading,
            running: true,
            last_error: None,
            weather: None,
            refresh_meta: RefreshMetadata::default(),
            settings,
            settings_path,
            sky,
            backoff: Backoff::default(),
            fetch_in_flight: false,
            last_frame_at: Instant::now(),
            frame_tick: 0,
            forecast_url: cli
                .forecast_url
                .clone()
                .unwrap_or_else(|| FORECAST_URL.to_string()),
            tasks: Vec::new(),
            retry: None,
        }
    }

    #[must_use]
    pub fn animate(&self) -> bool {
        self.settings.motion == MotionSetting::Full
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.settings.location
    }

    #[must_use]
    pub fn sky_category(&self) -> Option<SkyCategory> {
        self.sky.active_category()
    }

    /// Number of background loops currently owned by the app.
    #[must_use]
    pub fn running_tasks(&self) -> usize {
        self.tasks
            .iter()
            .chain(self.retry.as_ref())
            .filter(|task| task.is_running())
            .count()
    }

    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => {
                cli.validate()?;
                info!(
                    "starting for {} ({}, {}), refresh every {}s",
                    self.settings.location.name,
                    self.settings.location.latitude,
                    self.settings.location.longitude,
                    self.settings.refresh_interval_secs
                );
                let fps = if self.animate() { cli.fps } else { STILL_FPS };
                self.tasks.push(start_frame_task(tx.clone(), fps));
                self.tasks.push(start_refresh_task(
                    tx.clone(),
                    self.settings.refresh_interval_secs,
                ));
                self.start_fetch(tx).await?;
            }
            AppEvent::TickFrame => {
                self.frame_tick = self.frame_tick.saturating_add(1);
                self.refresh_meta.refresh_state(Utc::now());
            }
            AppEvent::TickRefresh => self.start_fetch(tx).await?,
            AppEvent::Input(event) => self.handle_input(event, tx).await?,
            AppEvent::FetchStarted => {
                self.fetch_in_flight = true;
                if self.weather.is_none() {
                    self.mode = AppMode::Loading;
                }
                self.refresh_meta.last_attempt = Some(Utc::now());
            }
            AppEvent::FetchSucceeded(bundle) => self.apply_forecast(bundle),
            AppEvent::FetchFailed(err) => {
                warn!("forecast fetch failed: {err}");
                self.fetch_in_flight = false;
                self.last_error = Some(err);
                self.mode = AppMode::Error;
                self.refresh_meta.mark_failure();
                let delay = self.backoff.next_delay();
                info!("retrying forecast in {}s", delay.as_secs());
                self.retry = Some(schedule_retry(tx.clone(), delay));
            }
            AppEvent::Quit => self.shutdown(),
        }

        Ok(())
    }

    fn apply_forecast(&mut self, bundle: ForecastBundle) {
        let code = bundle.current_weather_code();
        info!(
            "forecast for {}: code {code}, {:.1}°C",
            bundle.location.name, bundle.current.temperature_2m_c
        );
        self.sky.on_weather_update(code);
        self.fetch_in_flight = false;
        self.weather = Some(bundle);
        self.mode = AppMode::Ready;
        self.last_error = None;
        self.refresh_meta.mark_success();
        self.backoff.reset();
        if let Some(mut retry) = self.retry.take() {
            retry.stop();
        }
    }

    async fn handle_input(&mut self, event: Event, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if is_quit_key(key) {
                    tx.send(AppEvent::Quit).await?;
                    return Ok(());
                }
                match key.code {
                    KeyCode::Char('t') => self.toggle_clock_format(),
                    KeyCode::Char('r') => self.start_fetch(tx).await?,
                    _ => {}
                }
            }
            Event::Resize(cols, rows) => self.resize(cols, rows, &Local::now().time()),
            _ => {}
        }

        Ok(())
    }

    /// Terminal cells to sky pixels. The body is repositioned immediately.
    pub fn resize<T: Timelike>(&mut self, cols: u16, rows: u16, now: &T) {
        self.sky.on_viewport_resize(
            f32::from(cols) * CELL_WIDTH_PX,
            f32::from(rows) * CELL_HEIGHT_PX,
            now,
        );
    }

    /// Only resizes when the drawable area actually changed.
    pub fn sync_viewport(&mut self, cols: u16, rows: u16, now: &NaiveTime) {
        let width = f32::from(cols) * CELL_WIDTH_PX;
        let height = f32::from(rows) * CELL_HEIGHT_PX;
        let viewport = self.sky.viewport();
        if (viewport.width - width).abs() > f32::EPSILON
            || (viewport.height - height).abs() > f32::EPSILON
        {
            self.resize(cols, rows, now);
        }
    }

    /// Time elapsed since the previous drawn frame; zero when motion is off.
    pub fn take_frame_delta(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_at);
        self.last_frame_at = now;
        if self.animate() {
            delta
        } else {
            Duration::ZERO
        }
    }

    pub fn toggle_clock_format(&mut self) {
        self.settings.clock_format = self.settings.clock_format.toggle();
        self.persist_settings();
    }

    fn persist_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(err) = save_runtime_settings(path, &self.settings) {
            warn!("could not save settings: {err:#}");
        }
    }

    fn shutdown(&mut self) {
        info!("shutting down");
        self.mode = AppMode::Quit;
        for task in &mut self.tasks {
            task.stop();
        }
        self.tasks.clear();
        if let Some(mut retry) = self.retry.take() {
            retry.stop();
        }
    }

    async fn start_fetch(&mut self, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        if self.fetch_in_flight || self.mode == AppMode::Quit {
            return Ok(());
        }
        tx.send(AppEvent::FetchStarted).await?;
        self.fetch_in_flight = true;

        let location = self.settings.location.clone();
        let base_url = self.forecast_url.clone();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let result = match ForecastClient::with_base_url(base_url) {
                Ok(client) => client.fetch(location).await,
                Err(err) => Err(err),
            };
            let event = match result {
                Ok(bundle) => AppEvent::FetchSucceeded(bundle),
                Err(err) => AppEvent::FetchFailed(err.to_string()),
            };
            let _ = tx2.send(event).await;
        });
        Ok(())
    }
}

fn is_quit_key(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Char('q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
