use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{Context, Vec2};
use tracing::{error, info};

use crate::cluster::Canvas;
use crate::dataset::load_records;
use crate::encoding::Attribute;
use crate::engine::Engine;
use crate::physics::SimulationConfig;
use crate::record::{Record, RecordId};
use crate::search::TweetSearch;

mod canvas;
mod clock;
mod render_utils;
mod ui;

use clock::TickClock;

/// Start-up choices coming from the command line.
#[derive(Clone, Debug, Default)]
pub struct AppOptions {
    pub data: Option<PathBuf>,
    pub attribute: Attribute,
    pub simulation: SimulationConfig,
}

pub struct TweetscapeApp {
    view: ViewModel,
    load: LoadState,
}

enum LoadState {
    Idle,
    Loading {
        path: PathBuf,
        rx: Receiver<Result<Vec<Record>, String>>,
    },
    Failed(String),
}

struct ViewModel {
    engine: Engine,
    dataset: Option<Arc<[Record]>>,
    dataset_path: String,
    pan: Vec2,
    zoom: f32,
    clock: TickClock,
    search: TweetSearch,
    hovered: Option<RecordId>,
}

impl TweetscapeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, options: AppOptions) -> Self {
        let engine = Engine::new(Canvas::default(), options.simulation, options.attribute);
        let dataset_path = options
            .data
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        let load = match options.data {
            Some(path) => Self::start_load(path),
            None => LoadState::Idle,
        };

        Self {
            view: ViewModel::new(engine, dataset_path),
            load,
        }
    }

    fn spawn_load(path: PathBuf) -> Receiver<Result<Vec<Record>, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_records(&path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(path: PathBuf) -> LoadState {
        info!(path = %path.display(), "loading dataset");
        LoadState::Loading {
            rx: Self::spawn_load(path.clone()),
            path,
        }
    }
}

impl eframe::App for TweetscapeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        if let LoadState::Loading { rx, path } = &self.load {
            match rx.try_recv() {
                Ok(Ok(records)) if records.is_empty() => {
                    transition = Some(LoadState::Failed(format!(
                        "{} contains no records",
                        path.display()
                    )));
                }
                Ok(Ok(records)) => {
                    self.view.replace_dataset(records);
                    transition = Some(LoadState::Idle);
                }
                Ok(Err(message)) => {
                    error!(path = %path.display(), %message, "dataset load failed");
                    transition = Some(LoadState::Failed(message));
                }
                Err(TryRecvError::Empty) => ctx.request_repaint(),
                Err(TryRecvError::Disconnected) => {
                    transition = Some(LoadState::Failed(
                        "Background load worker disconnected".to_owned(),
                    ));
                }
            }
        }

        let is_loading = matches!(self.load, LoadState::Loading { .. });
        let failure = match &self.load {
            LoadState::Failed(message) => Some(message.as_str()),
            _ => None,
        };

        let mut open_requested = false;
        self.view
            .show(ctx, is_loading, failure, &mut open_requested);

        if open_requested && !is_loading {
            let path = PathBuf::from(self.view.dataset_path.trim());
            transition = Some(Self::start_load(path));
        }

        if let Some(next_state) = transition {
            self.load = next_state;
        }
    }
}

impl ViewModel {
    fn new(engine: Engine, dataset_path: String) -> Self {
        Self {
            engine,
            dataset: None,
            dataset_path,
            pan: Vec2::ZERO,
            zoom: 1.0,
            clock: TickClock::default(),
            search: TweetSearch::default(),
            hovered: None,
        }
    }

    fn replace_dataset(&mut self, records: Vec<Record>) {
        self.dataset = Some(records.into());
        self.hovered = None;
        self.clock = TickClock::default();
    }
}
