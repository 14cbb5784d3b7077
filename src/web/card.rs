// Paints the share layout onto an offscreen canvas and exports it.
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement, window};

use crate::engine::Summary;
use crate::share::{self, CARD_GRADIENT, CARD_SIZE};

pub fn render(summary: &Summary) -> Result<HtmlCanvasElement, JsValue> {
    let doc = window().and_then(|w| w.document()).ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
    canvas.set_width(CARD_SIZE);
    canvas.set_height(CARD_SIZE);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let size = CARD_SIZE as f64;
    let gradient = ctx.create_linear_gradient(0.0, 0.0, size, size);
    for (offset, color) in CARD_GRADIENT {
        gradient.add_color_stop(offset as f32, color)?;
    }
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, size, size);

    ctx.set_text_align("center");
    for line in share::card_layout(summary) {
        ctx.set_font(line.font);
        ctx.set_fill_style_str(line.color);
        ctx.fill_text(&line.text, size / 2.0, line.y)?;
    }
    Ok(canvas)
}

pub fn download(summary: &Summary) -> Result<(), JsValue> {
    let canvas = render(summary)?;
    let data_url = canvas.to_data_url_with_type("image/png")?;
    let doc = window().and_then(|w| w.document()).ok_or_else(|| JsValue::from_str("no document"))?;
    let link: HtmlAnchorElement = doc.create_element("a")?.dyn_into()?;
    link.set_download(&share::download_filename(summary));
    link.set_href(&data_url);
    link.click();
    Ok(())
}

pub fn open_intent(summary: &Summary) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    win.open_with_url_and_target(&share::intent_url(summary), "_blank")?;
    Ok(())
}
