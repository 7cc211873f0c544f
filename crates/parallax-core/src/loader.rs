//! Image (re)load bookkeeping.
//!
//! Decoding happens elsewhere (browser image element, native decode
//! thread). This module hands out numbered tickets, resolves file paths and
//! decides which completions may replace the visible surface.

use crate::error::{ParallaxError, Result};
use crate::image::{ImageDetails, ImagePair};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// How a logical image key maps to its color and depth files.
#[derive(Clone, Debug, PartialEq)]
pub enum PathConvention {
    /// `<dir>/<key>.<ext>` plus `<dir>/<key>_depth.<ext>`.
    Suffixed { dir: String, extension: String },
    /// `<dir>/<key>.<ext>` plus one depth map shared by every key.
    SharedDepth {
        dir: String,
        extension: String,
        depth_path: String,
    },
}

impl Default for PathConvention {
    fn default() -> Self {
        Self::SharedDepth {
            dir: "img/h".into(),
            extension: "png".into(),
            depth_path: "img/1.jpg".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImagePaths {
    pub color: String,
    pub depth: String,
}

impl PathConvention {
    pub fn resolve(&self, key: &str) -> Result<ImagePaths> {
        let key = key.trim();
        if key.is_empty() || key.contains("..") || key.contains('/') || key.contains('\\') {
            return Err(ParallaxError::UnknownImageKey(key.to_string()));
        }
        Ok(match self {
            Self::Suffixed { dir, extension } => ImagePaths {
                color: join(dir, &format!("{key}.{extension}")),
                depth: join(dir, &format!("{key}_depth.{extension}")),
            },
            Self::SharedDepth {
                dir,
                extension,
                depth_path,
            } => ImagePaths {
                color: join(dir, &format!("{key}.{extension}")),
                depth: depth_path.clone(),
            },
        })
    }
}

fn join(dir: &str, file: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        file.to_string()
    } else {
        format!("{dir}/{file}")
    }
}

/// One issued load request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub key: String,
    pub paths: ImagePaths,
}

#[derive(Debug)]
pub enum LoadOutcome {
    Ready { ticket: LoadTicket, pair: ImagePair },
    Failed { ticket: LoadTicket, reason: String },
}

impl LoadOutcome {
    pub fn ticket(&self) -> &LoadTicket {
        match self {
            Self::Ready { ticket, .. } | Self::Failed { ticket, .. } => ticket,
        }
    }
}

/// What the caller should do with a completion.
#[derive(Debug)]
pub enum Accepted {
    /// Build a surface from `pair`; `details` describe its color image.
    /// Call [`ReloadCoordinator::mark_applied`] once it is attached.
    Apply {
        ticket: LoadTicket,
        pair: ImagePair,
        details: ImageDetails,
    },
    /// Superseded by a newer applied load; drop it.
    Stale { generation: u64 },
    /// Keep the current surface and report the error.
    Failed(ParallaxError),
}

#[derive(Debug, Default)]
pub struct ReloadCoordinator {
    convention: PathConvention,
    next_generation: u64,
    newest_applied: Option<u64>,
    in_flight: usize,
}

impl ReloadCoordinator {
    pub fn new(convention: PathConvention) -> Self {
        Self {
            convention,
            ..Default::default()
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn newest_applied(&self) -> Option<u64> {
        self.newest_applied
    }

    /// Issue a ticket for `key`. Safe to call while earlier tickets are
    /// still loading.
    pub fn request(&mut self, key: &str) -> Result<LoadTicket> {
        let paths = self.convention.resolve(key)?;
        self.next_generation += 1;
        self.in_flight += 1;
        let ticket = LoadTicket {
            generation: self.next_generation,
            key: key.trim().to_string(),
            paths,
        };
        log::info!(
            "[load] #{} '{}' color={} depth={}",
            ticket.generation,
            ticket.key,
            ticket.paths.color,
            ticket.paths.depth
        );
        Ok(ticket)
    }

    /// Record that `generation` is now the visible image. Older completions
    /// arriving later are stale.
    pub fn mark_applied(&mut self, generation: u64) {
        self.newest_applied = Some(self.newest_applied.map_or(generation, |g| g.max(generation)));
    }

    /// Classify a completion. Only `Apply` should touch the scene.
    pub fn accept(&mut self, outcome: LoadOutcome) -> Accepted {
        self.in_flight = self.in_flight.saturating_sub(1);
        let generation = outcome.ticket().generation;
        if self.newest_applied.is_some_and(|g| generation < g) {
            log::debug!("[load] #{} arrived after a newer image, dropped", generation);
            return Accepted::Stale { generation };
        }
        match outcome {
            LoadOutcome::Ready { ticket, pair } => match pair.color.details() {
                Ok(details) => Accepted::Apply {
                    ticket,
                    pair,
                    details,
                },
                Err(e) => Accepted::Failed(ParallaxError::ImageLoadFailed {
                    key: ticket.key,
                    reason: e.to_string(),
                }),
            },
            LoadOutcome::Failed { ticket, reason } => {
                Accepted::Failed(ParallaxError::ImageLoadFailed {
                    key: ticket.key,
                    reason,
                })
            }
        }
    }
}

/// Queue that asynchronous completions are pushed into and the frame loop
/// drains once per tick.
#[derive(Debug)]
pub struct Inbox<T>(Rc<RefCell<VecDeque<T>>>);

impl<T> Clone for Inbox<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Default for Inbox<T> {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(VecDeque::new())))
    }
}

impl<T> Inbox<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, item: T) {
        self.0.borrow_mut().push_back(item);
    }

    pub fn drain(&self) -> Vec<T> {
        self.0.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}
