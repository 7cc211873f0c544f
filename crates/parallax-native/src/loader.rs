//! Decode thread: tickets in, decoded pairs out.

use anyhow::Context;
use crossbeam_channel::{Receiver, Sender};
use parallax_core::{DecodedImage, ImagePair, LoadOutcome, LoadTicket};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

/// Run the loader until the ticket channel closes or nobody listens for
/// results any more. Paths are resolved against `root`.
pub fn spawn_loader(
    root: PathBuf,
    tickets: Receiver<LoadTicket>,
    results: Sender<LoadOutcome>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("image-loader".into())
        .spawn(move || {
            for ticket in tickets.iter() {
                let outcome = match load_pair(&root, &ticket) {
                    Ok(pair) => LoadOutcome::Ready { ticket, pair },
                    Err(e) => LoadOutcome::Failed {
                        ticket,
                        reason: format!("{:#}", e),
                    },
                };
                if results.send(outcome).is_err() {
                    break;
                }
            }
            log::debug!("[load] loader thread exiting");
        })
}

fn load_pair(root: &Path, ticket: &LoadTicket) -> anyhow::Result<ImagePair> {
    let color = decode(&root.join(&ticket.paths.color))?;
    let depth = decode(&root.join(&ticket.paths.depth))?;
    Ok(ImagePair { color, depth })
}

fn decode(path: &Path) -> anyhow::Result<DecodedImage> {
    let img = image::ImageReader::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .with_guessed_format()?
        .decode()
        .with_context(|| format!("decoding {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    log::debug!("[load] decoded {} ({}x{})", path.display(), width, height);
    Ok(DecodedImage::new(width, height, img.into_raw())?)
}
