//! Cairo rendering of swatches and the format menu.
//!
//! Both functions draw in surface-local coordinates; the backend decides
//! where the result lands on screen.

use super::color::{self, BLACK, Color, MENU_CURRENT, MENU_HOVER, WHITE};
use super::text::{show_at_baseline, text_layout};
use crate::config::DockConfig;
use crate::dock::Swatch;
use crate::menu::{ItemHighlight, MenuView};
use crate::util::Rect;

/// Extra room around a swatch label, split between both sides.
const LABEL_PADDING: i32 = 5;
/// Label text inset from the left edge of its box.
const LABEL_INSET: f64 = 2.0;

fn fill_rect(ctx: &cairo::Context, rect: Rect, color: Color) -> Result<(), cairo::Error> {
    color.apply(ctx);
    ctx.rectangle(
        rect.x as f64,
        rect.y as f64,
        rect.width as f64,
        rect.height as f64,
    );
    ctx.fill()
}

/// Renders one swatch in dock-local coordinates.
///
/// The whole square is cleared to the dock background first, so a swatch
/// going from pressed to released leaves no border behind. Pressed swatches
/// fill the smaller [`Swatch::fill_bounds`]. With labels enabled, a black box
/// holding the palette label sits in the bottom-left corner of the fill.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `swatch` - Swatch to draw, including its pressed state
/// * `box_size` - Edge length shared by all swatches
/// * `config` - Label font and visibility
pub fn render_swatch(
    ctx: &cairo::Context,
    swatch: &Swatch,
    box_size: u32,
    config: &DockConfig,
) -> Result<(), cairo::Error> {
    ctx.save()?;

    fill_rect(ctx, swatch.bounds(box_size), BLACK)?;
    let fill = swatch.fill_bounds(box_size);
    fill_rect(ctx, fill, Color::from_packed(swatch.color))?;

    if config.show_labels {
        render_label(ctx, swatch.label, fill, &config.label_font)?;
    }

    ctx.restore()
}

fn render_label(
    ctx: &cairo::Context,
    label: &str,
    fill: Rect,
    font: &str,
) -> Result<(), cairo::Error> {
    let layout = text_layout(ctx, font, label);
    let (text_width, text_height) = layout.pixel_size();

    let width = text_width + LABEL_PADDING;
    let mut height = text_height + LABEL_PADDING;
    let mut y = fill.bottom() - height;
    if y < fill.y {
        y = fill.y;
        height = fill.height;
    }

    // labels wider than a tiny swatch must not spill onto the padding
    ctx.save()?;
    ctx.rectangle(
        fill.x as f64,
        fill.y as f64,
        fill.width as f64,
        fill.height as f64,
    );
    ctx.clip();

    fill_rect(
        ctx,
        Rect::new(fill.x, y, width, height),
        BLACK,
    )?;

    color::label_text().apply(ctx);
    let top = y as f64 + (height - text_height) as f64 / 2.0;
    ctx.move_to(fill.x as f64 + LABEL_INSET, top);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore()
}

/// Renders the format menu filling the whole surface.
///
/// Rows are `item_height` tall, top to bottom in format order. The hovered
/// row is light grey with black text, the row of the format in use dark grey
/// with white text, and every other row white text on black.
pub fn render_menu(ctx: &cairo::Context, view: &MenuView<'_>) -> Result<(), cairo::Error> {
    ctx.save()?;

    let style = view.style;
    let row_height = style.item_height as i32;
    let width = view.size.width as i32;

    BLACK.apply(ctx);
    ctx.paint()?;

    for (index, label, highlight) in view.rows() {
        let row_y = index as i32 * row_height;
        let row = Rect::new(0, row_y, width, row_height);

        let text_color = match highlight {
            ItemHighlight::Hover => {
                fill_rect(ctx, row, MENU_HOVER)?;
                BLACK
            }
            ItemHighlight::Current => {
                fill_rect(ctx, row, MENU_CURRENT)?;
                WHITE
            }
            ItemHighlight::Plain => WHITE,
        };

        let layout = text_layout(ctx, &style.font, label);
        text_color.apply(ctx);
        show_at_baseline(
            ctx,
            &layout,
            style.item_padding as f64,
            (row_y + row_height - style.item_padding as i32) as f64,
        );
    }

    ctx.restore()
}
