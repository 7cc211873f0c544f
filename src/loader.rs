//! Browser texture provider: fetch through an image element, read the
//! pixels back through a 2D canvas, hand the pair to the frame loop.

use crate::dom::js_error;
use parallax_core::{DecodedImage, ImagePair, ImagePaths, Inbox, LoadOutcome, LoadTicket};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Start loading `ticket` in the background. The outcome lands in `inbox`
/// whether or not the load succeeds.
pub fn load_pair(ticket: LoadTicket, inbox: Inbox<LoadOutcome>) {
    spawn_local(async move {
        let outcome = match fetch_pair(&ticket.paths).await {
            Ok(pair) => LoadOutcome::Ready { ticket, pair },
            Err(e) => LoadOutcome::Failed {
                ticket,
                reason: format!("{:#}", e),
            },
        };
        inbox.push(outcome);
    });
}

async fn fetch_pair(paths: &ImagePaths) -> anyhow::Result<ImagePair> {
    let color = decode(&paths.color).await?;
    let depth = decode(&paths.depth).await?;
    Ok(ImagePair { color, depth })
}

async fn decode(url: &str) -> anyhow::Result<DecodedImage> {
    let img = web::HtmlImageElement::new().map_err(js_error)?;
    img.set_cross_origin(Some("anonymous"));
    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        img.set_onload(Some(&resolve));
        img.set_onerror(Some(&reject));
    });
    img.set_src(url);
    JsFuture::from(loaded)
        .await
        .map_err(|_| anyhow::anyhow!("could not fetch {}", url))?;
    img.set_onload(None);
    img.set_onerror(None);

    let (width, height) = (img.natural_width(), img.natural_height());
    let document = crate::dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("canvas element has the wrong type"))?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(js_error)?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("2d context has the wrong type"))?;
    ctx.draw_image_with_html_image_element(&img, 0.0, 0.0)
        .map_err(js_error)?;
    let data = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(js_error)?;
    log::debug!("[load] decoded {} ({}x{})", url, width, height);
    Ok(DecodedImage::new(width, height, data.data().0)?)
}
