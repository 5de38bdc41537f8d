//! # Trellis Host
//!
//! Headless driver for the UI toolkit. Builds a demo scene, replays a short
//! scripted input sequence and reports what a renderer would have drawn.
//!
//! ```bash
//! # Default configuration
//! trellis
//!
//! # Configuration from a file, with toolkit debug logs
//! RUST_LOG=trellis_ui=debug trellis ui.toml
//! ```

use std::process::ExitCode;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use trellis_ui::widgets::{Button, Frame, Image, Label, ListBox, ListBoxOptions, Padding};
use trellis_ui::{
    Alignment, Color, ComponentId, ContentCache, InputState, Insets, MemoryTextureSource, MouseButton, Rect,
    Renderer, TextureId, UiConfig, UiContext, UiMessage, UiResult, Vec2,
};

const VIEWPORT: Vec2 = Vec2::new(640.0, 480.0);
const LOGO: &str = "ui/logo.png";
const ROWS: usize = 40;

/// Renderer stand-in that only counts what it is asked to draw.
#[derive(Debug, Default)]
struct CountingRenderer {
    quads: usize,
    textures: usize,
    texts: usize,
    scissors: usize,
}

impl Renderer for CountingRenderer {
    fn set_scissor(&mut self, _clip: Option<Rect>) {
        self.scissors += 1;
    }

    fn draw_quad(&mut self, _bounds: Rect, _rotation: f32, _tint: Color, _depth: u32) {
        self.quads += 1;
    }

    fn draw_texture(&mut self, _texture: TextureId, _bounds: Rect, _uv: [f32; 4], _rotation: f32, _tint: Color, _depth: u32) {
        self.textures += 1;
    }

    fn draw_text(&mut self, _text: &str, _origin: Vec2, _font_size: f32, _tint: Color, _depth: u32) {
        self.texts += 1;
    }
}

/// One scripted input event, applied at the start of a frame.
#[derive(Debug, Clone, Copy)]
enum Step {
    Idle,
    Move(f32, f32),
    Press,
    Release,
    Wheel(f32),
    Resize(f32, f32),
}

/// Components the script refers back to.
struct Demo {
    list: ComponentId,
    apply: ComponentId,
}

fn build_demo(ui: &mut UiContext, config: &UiConfig) -> UiResult<Demo> {
    let content = ui.content().clone();
    let base = ui.base();
    let tree = ui.tree_mut();

    let frame = Frame::create(tree, base, 2.0)?;
    let inner = tree.expect_widget_mut::<Frame>(frame)?.content();
    let padding = Padding::create(tree, inner, Insets::uniform(0.02))?;
    let area = tree.expect_widget_mut::<Padding>(padding)?.content();

    let title = Label::create(tree, area, "Inventory")?;
    tree.transform_mut(title)?.set_relative_size(Vec2::new(0.5, 0.1))?;

    let logo = Image::create(tree, area, &content, LOGO, true)?;
    {
        let transform = tree.transform_mut(logo)?;
        transform.set_relative_size(Vec2::new(0.3, 0.1))?;
        transform.set_alignment(Alignment::TopRight);
    }

    let list = ListBox::create(tree, area, ListBoxOptions::from_config(config))?;
    {
        let transform = tree.transform_mut(list)?;
        transform.set_relative_size(Vec2::new(1.0, 0.75))?;
        transform.set_alignment(Alignment::Center);
    }
    let rows = tree.expect_widget_mut::<ListBox>(list)?.content();
    for i in 0..ROWS {
        let row = Button::create_with_label(tree, rows, &format!("Row {i}"))?;
        tree.transform_mut(row)?.set_max_size(Vec2::new(f32::INFINITY, 24.0))?;
    }

    let apply = Button::create_with_label(tree, area, "Apply")?;
    {
        let transform = tree.transform_mut(apply)?;
        transform.set_relative_size(Vec2::new(0.25, 0.08))?;
        transform.set_alignment(Alignment::BottomRight);
    }
    if config.style("accent").is_some() {
        ui.apply_style(apply, "accent")?;
    }

    Ok(Demo { list, apply })
}

fn script(ui: &mut UiContext, demo: &Demo) -> Vec<Step> {
    let list = ui.tree_mut().resolve(demo.list);
    let apply = ui.tree_mut().resolve(demo.apply);
    let (lx, ly) = (list.x + 20.0, list.y + 20.0);
    let (ax, ay) = (apply.x + apply.width / 2.0, apply.y + apply.height / 2.0);

    vec![
        Step::Idle,
        Step::Move(lx, ly),
        Step::Wheel(-120.0),
        Step::Wheel(-120.0),
        Step::Press,
        Step::Release,
        Step::Move(ax, ay),
        Step::Press,
        Step::Release,
        Step::Wheel(10_000.0),
        Step::Resize(800.0, 600.0),
        Step::Idle,
    ]
}

fn apply_step(ui: &mut UiContext, input: &mut InputState, step: Step) -> UiResult<()> {
    match step {
        Step::Idle => {}
        Step::Move(x, y) => input.set_pointer(x, y),
        Step::Press => input.press(MouseButton::Left),
        Step::Release => input.release(MouseButton::Left),
        Step::Wheel(dy) => input.scroll(0.0, dy),
        Step::Resize(width, height) => ui.set_viewport_size(Vec2::new(width, height))?,
    }
    Ok(())
}

fn run(config: UiConfig) -> UiResult<CountingRenderer> {
    let content = ContentCache::new(MemoryTextureSource::new().with_texture(LOGO, 128, 64));
    let mut ui = UiContext::new(config.clone(), content, VIEWPORT)?;
    let demo = build_demo(&mut ui, &config)?;

    let mut input = InputState::new();
    let mut renderer = CountingRenderer::default();
    ui.update(&input)?;

    for (frame, step) in script(&mut ui, &demo).into_iter().enumerate() {
        input.begin_frame();
        apply_step(&mut ui, &mut input, step)?;

        for message in ui.update(&input)? {
            match message {
                UiMessage::Clicked(id) if id == demo.apply => info!(frame, "apply clicked"),
                other => info!(frame, message = ?other, "ui message"),
            }
        }
        ui.draw().replay(&mut renderer);
    }

    if ui.tree().pending_notifications() > 0 {
        warn!(pending = ui.tree().pending_notifications(), "notifications left undrained");
    }
    info!(components = ui.tree().len(), textures = ui.content().loaded(), "script finished");
    Ok(renderer)
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match UiConfig::load(&path) {
            Ok(config) => {
                info!(%path, "configuration loaded");
                config
            }
            Err(e) => {
                eprintln!("✗ FATAL: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => UiConfig::default(),
    };

    match run(config) {
        Ok(renderer) => {
            println!("═══════════════════════════════════════════");
            println!("  quads:     {}", renderer.quads);
            println!("  textures:  {}", renderer.textures);
            println!("  text runs: {}", renderer.texts);
            println!("  scissors:  {}", renderer.scissors);
            println!("═══════════════════════════════════════════");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ FATAL: {e}");
            ExitCode::FAILURE
        }
    }
}
