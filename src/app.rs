use std::time::Instant;

use tokio::sync::mpsc;

use crate::config::BoardTarget;
use crate::event::KeyAction;
use crate::model::record::{FlatRecord, ProjectDetails, ProjectSnapshot};
use crate::providers;

#[derive(Debug, Clone)]
pub enum Action {
    Key(KeyAction),
    Tick,
    /// Fetch the board again; queued so a loading frame is drawn first.
    Reload,
    ProjectLoaded(ProjectSnapshot),
    FetchError(String),
    Quit,
}

pub struct App {
    pub details: Option<ProjectDetails>,
    pub items: Vec<FlatRecord>,
    pub selected_item: usize,
    pub loading: bool,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub action_tx: mpsc::UnboundedSender<Action>,
    target: BoardTarget,
}

impl App {
    pub fn new(target: BoardTarget, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            details: None,
            items: Vec::new(),
            selected_item: 0,
            loading: true,
            flash_message: None,
            should_quit: false,
            action_tx,
            target,
        }
    }

    pub fn selected(&self) -> Option<&FlatRecord> {
        self.items.get(self.selected_item)
    }

    pub async fn update(&mut self, action: Action) {
        // Clear flash message after 3 seconds
        if let Some((_, t)) = &self.flash_message {
            if t.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }

        match action {
            Action::Key(key) => self.handle_key(key).await,
            Action::Tick => {}
            Action::Reload => self.refresh_items().await,
            Action::ProjectLoaded(snapshot) => {
                self.details = Some(snapshot.details);
                self.items = snapshot.items;
                self.loading = false;
                if self.selected_item >= self.items.len() {
                    self.selected_item = self.items.len().saturating_sub(1);
                }
            }
            Action::FetchError(msg) => {
                self.loading = false;
                self.flash_message = Some((format!("Fetch error: {msg}"), Instant::now()));
            }
            Action::Quit => {
                self.should_quit = true;
            }
        }
    }

    async fn handle_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Up => {
                if self.selected_item > 0 {
                    self.selected_item -= 1;
                }
            }
            KeyAction::Down => {
                if !self.items.is_empty() && self.selected_item < self.items.len() - 1 {
                    self.selected_item += 1;
                }
            }
            KeyAction::Top => self.selected_item = 0,
            KeyAction::Bottom => self.selected_item = self.items.len().saturating_sub(1),
            KeyAction::Refresh => {
                if !self.loading {
                    self.loading = true;
                    let _ = self.action_tx.send(Action::Reload);
                }
            }
        }
    }

    pub async fn refresh_items(&mut self) {
        self.loading = true;
        let tx = self.action_tx.clone();

        match providers::fetch_project_snapshot(&self.target).await {
            Ok(snapshot) => {
                let _ = tx.send(Action::ProjectLoaded(snapshot));
            }
            Err(e) => {
                log::warn!("Refreshing {} failed: {e}", self.target.username);
                let _ = tx.send(Action::FetchError(e.to_string()));
            }
        }
    }
}
