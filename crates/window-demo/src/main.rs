// File: crates/window-demo/src/main.rs
// Summary: Windowed player for the usage chart: renders frames on the CPU and blits them with winit + softbuffer.
// Input: pointer hover drives marker tooltips and legend highlight, a click on Replay or the R key
// restarts the animation, Esc closes the window.

use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use usage_chart_core::{ChartConfig, ChartController, Dataset, Millis, RenderOptions};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

#[derive(Parser, Debug)]
#[command(name = "usage-chart-window", about = "Play the usage chart animation in a window")]
struct Args {
    #[arg(default_value = "data/social-media-uk.csv")]
    input: PathBuf,

    #[arg(long, env = "USAGE_CHART_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ChartConfig::from_json_file(path)?,
        None => ChartConfig::default(),
    };
    let dataset = Dataset::from_path(&args.input)
        .with_context(|| format!("failed to load usage data '{}'", args.input.display()))?;

    let opts = RenderOptions::for_config(&config);
    let (canvas_w, canvas_h) = (opts.width.max(1) as u32, opts.height.max(1) as u32);

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Social Media Usage by Age Group")
        .with_inner_size(PhysicalSize::new(canvas_w, canvas_h))
        .with_resizable(false)
        .build(&event_loop)
        .context("build window")?;

    let context = unsafe { softbuffer::Context::new(&window) }
        .map_err(|e| anyhow!("softbuffer context: {e}"))?;
    let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }
        .map_err(|e| anyhow!("softbuffer surface: {e}"))?;

    let clock = Instant::now();
    let now = move || -> Millis { clock.elapsed().as_secs_f64() * 1000.0 };
    let mut controller = ChartController::new(Arc::new(dataset), config, now());
    let mut size = window.inner_size();
    let mut dirty = true;

    event_loop.run(move |event, _, control_flow| {
        let t = now();
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => control_flow.set_exit(),
                WindowEvent::Resized(new_size) => {
                    size = new_size;
                    dirty = true;
                }
                WindowEvent::CursorMoved { position, .. } => {
                    controller.pointer_move(position.x, position.y, t);
                    dirty = true;
                }
                WindowEvent::CursorLeft { .. } => {
                    controller.pointer_leave(t);
                    dirty = true;
                }
                WindowEvent::MouseInput { state: ElementState::Pressed, button: MouseButton::Left, .. } => {
                    if let Some(p) = controller.pointer() {
                        dirty |= controller.click(p.x, p.y, t);
                    }
                }
                WindowEvent::KeyboardInput {
                    input: KeyboardInput { state: ElementState::Pressed, virtual_keycode: Some(key), .. },
                    ..
                } => match key {
                    VirtualKeyCode::R => {
                        controller.replay(t);
                        dirty = true;
                    }
                    VirtualKeyCode::Escape => control_flow.set_exit(),
                    _ => {}
                },
                _ => {}
            },
            Event::MainEventsCleared => {
                if dirty || controller.is_animating(t) {
                    window.request_redraw();
                }
            }
            Event::RedrawRequested(_) => {
                if let Err(e) = present(&mut surface, &controller, &opts, size, t) {
                    log::error!("frame failed: {e:#}");
                    control_flow.set_exit();
                    return;
                }
                dirty = false;
            }
            _ => {}
        }

        if !matches!(*control_flow, ControlFlow::ExitWithCode(_)) {
            if controller.is_animating(t) {
                control_flow.set_poll();
            } else {
                control_flow.set_wait();
            }
        }
    });
}

/// Render the current frame and copy it into the window buffer as 0RGB pixels,
/// clipped to the window size.
fn present(
    surface: &mut softbuffer::Surface,
    controller: &ChartController,
    opts: &RenderOptions,
    size: PhysicalSize<u32>,
    now: Millis,
) -> Result<()> {
    let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
        return Ok(());
    };
    surface.resize(w, h).map_err(|e| anyhow!("resize surface: {e}"))?;

    let frame = controller.frame(now);
    let (rgba, fw, fh, stride) = controller.state().render_to_rgba8(&frame, opts)?;

    let mut buffer = surface.buffer_mut().map_err(|e| anyhow!("surface buffer: {e}"))?;
    let (ww, wh) = (w.get() as usize, h.get() as usize);
    log::trace!("blit {fw}x{fh} into {ww}x{wh}");
    buffer.fill(0);
    for y in 0..wh.min(fh as usize) {
        let row = &rgba[y * stride..y * stride + fw as usize * 4];
        for (x, px) in row.chunks_exact(4).take(ww).enumerate() {
            let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
            buffer[y * ww + x] = (r << 16) | (g << 8) | b;
        }
    }
    buffer.present().map_err(|e| anyhow!("present: {e}"))?;
    Ok(())
}
