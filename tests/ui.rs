use arctic_dock::config::{DockConfig, MenuConfig};
use arctic_dock::dock::{Swatch, layout};
use arctic_dock::draw::{render_menu, render_swatch, text_size};
use arctic_dock::format::ColorFormat;
use arctic_dock::menu::MenuView;
use arctic_dock::palette::{NORD8, PALETTE};
use arctic_dock::util::Size;
use cairo::{Context, ImageSurface};

const BLACK: u32 = 0xFF000000;

fn surface_with_context(width: i32, height: i32) -> (ImageSurface, Context) {
    let surface = ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
    let ctx = Context::new(&surface).unwrap();
    (surface, ctx)
}

/// Reads one pixel as `0xAARRGGBB`.
fn pixel(surface: &mut ImageSurface, x: usize, y: usize) -> u32 {
    let stride = surface.stride() as usize;
    let data = surface.data().unwrap();
    let offset = y * stride + x * 4;
    u32::from_ne_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn opaque(color: u32) -> u32 {
    0xFF000000 | color
}

fn swatch(pressed: bool) -> Swatch {
    let mut swatch = layout(40, 5, &PALETTE)[8];
    swatch.pressed = pressed;
    swatch.position = arctic_dock::util::Point::new(5, 5);
    swatch
}

fn no_labels() -> DockConfig {
    DockConfig {
        show_labels: false,
        ..DockConfig::default()
    }
}

#[test]
fn released_swatch_fills_its_whole_square() {
    let (mut surface, ctx) = surface_with_context(50, 50);
    render_swatch(&ctx, &swatch(false), 40, &no_labels()).unwrap();
    drop(ctx);

    assert_eq!(pixel(&mut surface, 5, 5), opaque(NORD8));
    assert_eq!(pixel(&mut surface, 25, 25), opaque(NORD8));
    assert_eq!(pixel(&mut surface, 44, 44), opaque(NORD8));
    // padding around the swatch is left alone
    assert_eq!(pixel(&mut surface, 2, 2), 0);
    assert_eq!(pixel(&mut surface, 46, 46), 0);
}

#[test]
fn pressed_swatch_shrinks_inside_a_cleared_border() {
    let (mut surface, ctx) = surface_with_context(50, 50);
    render_swatch(&ctx, &swatch(false), 40, &no_labels()).unwrap();
    render_swatch(&ctx, &swatch(true), 40, &no_labels()).unwrap();
    drop(ctx);

    // fill moves to (7, 7) and is 35px wide
    assert_eq!(pixel(&mut surface, 5, 5), BLACK);
    assert_eq!(pixel(&mut surface, 6, 20), BLACK);
    assert_eq!(pixel(&mut surface, 7, 7), opaque(NORD8));
    assert_eq!(pixel(&mut surface, 41, 41), opaque(NORD8));
    assert_eq!(pixel(&mut surface, 42, 42), BLACK);
    assert_eq!(pixel(&mut surface, 44, 44), BLACK);
}

#[test]
fn label_box_sits_in_bottom_left_corner() {
    let (mut surface, ctx) = surface_with_context(50, 50);
    render_swatch(&ctx, &swatch(false), 40, &DockConfig::default()).unwrap();
    drop(ctx);

    assert_eq!(pixel(&mut surface, 6, 44), BLACK);
    assert_eq!(pixel(&mut surface, 43, 6), opaque(NORD8));
}

#[test]
fn menu_rows_use_hover_and_current_backgrounds() {
    let style = MenuConfig::default();
    let view = MenuView {
        size: Size::new(80, 160),
        hover: Some(1),
        current: ColorFormat::CssRgb,
        style: &style,
    };
    let (mut surface, ctx) = surface_with_context(80, 160);
    render_menu(&ctx, &view).unwrap();
    drop(ctx);

    // sample the right edge, clear of the row labels
    assert_eq!(pixel(&mut surface, 78, 10), BLACK);
    assert_eq!(pixel(&mut surface, 78, 20), 0xFFCCCCCC);
    assert_eq!(pixel(&mut surface, 78, 39), 0xFFCCCCCC);
    assert_eq!(pixel(&mut surface, 78, 40), 0xFF555555);
    assert_eq!(pixel(&mut surface, 78, 59), 0xFF555555);
    assert_eq!(pixel(&mut surface, 78, 60), BLACK);
    assert_eq!(pixel(&mut surface, 78, 159), BLACK);
}

#[test]
fn hover_on_current_row_shows_hover_color() {
    let style = MenuConfig::default();
    let view = MenuView {
        size: Size::new(80, 160),
        hover: Some(4),
        current: ColorFormat::Hsl,
        style: &style,
    };
    let (mut surface, ctx) = surface_with_context(80, 160);
    render_menu(&ctx, &view).unwrap();
    drop(ctx);

    assert_eq!(pixel(&mut surface, 78, 85), 0xFFCCCCCC);
}

#[test]
fn text_size_grows_with_text() {
    let (_surface, ctx) = surface_with_context(10, 10);
    let (empty, _) = text_size(&ctx, "Monospace 9", "");
    let (short, _) = text_size(&ctx, "Monospace 9", "Vec3");
    let (long, _) = text_size(&ctx, "Monospace 9", "Vec3 Vec3 Vec3");
    assert_eq!(empty, 0);
    assert!(long >= short);
}
