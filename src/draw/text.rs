//! Pango text layout helpers.

/// Creates a layout for `text` in the given Pango font description
/// (e.g. "Monospace 8").
pub fn text_layout(ctx: &cairo::Context, font: &str, text: &str) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = pango::FontDescription::from_string(font);
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);
    layout
}

/// Logical width and height of `text` in pixels.
pub fn text_size(ctx: &cairo::Context, font: &str, text: &str) -> (i32, i32) {
    text_layout(ctx, font, text).pixel_size()
}

/// Draws `layout` with its first baseline at `(x, baseline_y)`.
pub fn show_at_baseline(ctx: &cairo::Context, layout: &pango::Layout, x: f64, baseline_y: f64) {
    // Pango positions from the top-left of the logical rect
    let baseline = layout.baseline() as f64 / pango::SCALE as f64;
    ctx.move_to(x, baseline_y - baseline);
    pangocairo::functions::show_layout(ctx, layout);
}
