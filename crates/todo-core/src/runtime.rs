use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::CoreConfig;
use crate::error::FetchError;
use crate::fetch::{HttpPageSource, PageSource};
use crate::models::Todo;
use crate::session::{Action, Effect};
use crate::store::{FetchRequest, Ticket};

pub enum FetchCommand {
    Fetch(FetchRequest),
    Shutdown,
}

/// Messages from the fetch worker back to the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum DataChange {
    PageFetched {
        page: u32,
        ticket: Ticket,
        result: Result<Vec<Todo>, FetchError>,
    },
    /// Derived from the outcome of the last request
    Connectivity { offline: bool },
}

impl From<DataChange> for Action {
    fn from(change: DataChange) -> Self {
        match change {
            DataChange::PageFetched {
                page,
                ticket,
                result,
            } => Action::PageFetched {
                page,
                ticket,
                result,
            },
            DataChange::Connectivity { offline } => Action::Connectivity { offline },
        }
    }
}

#[derive(Clone)]
pub struct CoreHandle {
    command_tx: Sender<FetchCommand>,
}

impl CoreHandle {
    pub fn send(&self, command: FetchCommand) -> Result<(), mpsc::SendError<FetchCommand>> {
        self.command_tx.send(command)
    }

    /// Hand the reducer's effects to the worker.
    pub fn dispatch(&self, effects: Vec<Effect>) -> Result<(), mpsc::SendError<FetchCommand>> {
        for effect in effects {
            match effect {
                Effect::Fetch(request) => self.send(FetchCommand::Fetch(request))?,
            }
        }
        Ok(())
    }
}

/// Owns the background fetch thread and its tokio runtime.
pub struct CoreRuntime {
    handle: CoreHandle,
    data_rx: Option<Receiver<DataChange>>,
    worker_handle: Option<JoinHandle<()>>,
}

impl CoreRuntime {
    pub fn new(config: CoreConfig) -> Result<Self> {
        let source = HttpPageSource::new(&config)?;
        Self::with_source(source)
    }

    pub fn with_source<S: PageSource>(source: S) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("todo-fetch")
            .enable_all()
            .build()
            .context("Failed to create fetch runtime")?;

        let (command_tx, command_rx) = mpsc::channel::<FetchCommand>();
        let (data_tx, data_rx) = mpsc::channel::<DataChange>();

        let worker = FetchWorker {
            source: Arc::new(source),
            command_rx,
            data_tx,
        };
        let worker_handle = std::thread::Builder::new()
            .name("todo-worker".to_string())
            .spawn(move || worker.run(rt))
            .context("Failed to spawn fetch worker")?;

        Ok(Self {
            handle: CoreHandle { command_tx },
            data_rx: Some(data_rx),
            worker_handle: Some(worker_handle),
        })
    }

    pub fn handle(&self) -> CoreHandle {
        self.handle.clone()
    }

    pub fn take_data_rx(&mut self) -> Option<Receiver<DataChange>> {
        self.data_rx.take()
    }

    pub fn shutdown(&mut self) {
        let _ = self.handle.send(FetchCommand::Shutdown);
        if let Some(worker) = self.worker_handle.take() {
            if worker.join().is_err() {
                tracing::error!("fetch worker panicked");
            }
        }
    }
}

impl Drop for CoreRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct FetchWorker<S> {
    source: Arc<S>,
    command_rx: Receiver<FetchCommand>,
    data_tx: Sender<DataChange>,
}

impl<S: PageSource> FetchWorker<S> {
    fn run(self, rt: tokio::runtime::Runtime) {
        tracing::info!("fetch worker started");

        while let Ok(command) = self.command_rx.recv() {
            match command {
                FetchCommand::Fetch(request) => {
                    let source = self.source.clone();
                    let data_tx = self.data_tx.clone();
                    rt.spawn(async move {
                        tracing::debug!(page = request.page, ticket = request.ticket, "fetching page");
                        let result = source.fetch_page(request.page).await;
                        let offline = matches!(&result, Err(err) if err.is_offline());
                        // Receiver gone means the UI is shutting down
                        let _ = data_tx.send(DataChange::Connectivity { offline });
                        let _ = data_tx.send(DataChange::PageFetched {
                            page: request.page,
                            ticket: request.ticket,
                            result,
                        });
                    });
                }
                FetchCommand::Shutdown => break,
            }
        }

        rt.shutdown_timeout(Duration::from_secs(1));
        tracing::info!("fetch worker stopped");
    }
}
