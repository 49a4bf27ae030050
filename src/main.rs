mod args;
mod audio;
mod constants;
mod display;
mod frame;
mod input;
mod render;
mod ribbon;
mod surface;

use std::cell::RefCell;
use std::rc::Rc;

use clap::Parser;
use shortwave_core::{
    GameConfig, LevelStateMachine, OscillatorConfig, SamplerConfig, WaveSampler,
};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::WindowBuilder;

use crate::args::Args;
use crate::constants::{WINDOW_SIZE, WINDOW_TITLE};
use crate::display::{ProgressLog, ScreenState, SessionOutcome, WindowDisplay};
use crate::frame::FrameContext;
use crate::render::GpuState;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let level = Args::parse().level;
    log::info!("[main] tuning day {level}");

    // Audio is optional: without a device the level plays silently.
    let audio = audio::start_feedback_audio(OscillatorConfig::default());

    let screen = Rc::new(RefCell::new(ScreenState::default()));
    let outcome = Rc::new(RefCell::new(SessionOutcome::default()));
    let mut machine = LevelStateMachine::new(
        GameConfig::default(),
        Box::new(level),
        Box::new(ProgressLog::new(Rc::clone(&outcome))),
    )
    .with_display(Box::new(WindowDisplay::new(Rc::clone(&screen))))
    .with_traces(
        WaveSampler::new(SamplerConfig::default())?,
        WaveSampler::new(SamplerConfig::default())?,
    );
    if let Some(output) = &audio {
        machine = machine.with_feedback(Box::new(output.bank.clone()));
    }
    machine.setup();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(LogicalSize::new(WINDOW_SIZE[0], WINDOW_SIZE[1]))
        .build(&event_loop)?;

    let mut gpu = pollster::block_on(GpuState::new(&window))?;
    let mut frame = FrameContext::new(machine, screen, outcome);

    event_loop.run(move |event, elwt| {
        // keep the output stream alive for the whole loop
        let _audio = &audio;
        match event {
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => gpu.resize(size),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => frame.request_exit(),
            Event::WindowEvent {
                event:
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(code),
                                state: ElementState::Pressed,
                                ..
                            },
                        ..
                    },
                ..
            } => frame.on_key(code),
            Event::AboutToWait => {
                match frame.frame(&mut gpu) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("[gpu] out of memory");
                        elwt.exit();
                        return;
                    }
                    Err(_) => {}
                }
                if frame.should_close() {
                    match frame.outcome().won_level {
                        Some(level) => log::info!("[main] day {level} complete, closing"),
                        None => log::info!("[main] left without a lock, closing"),
                    }
                    elwt.exit();
                } else {
                    gpu.window.request_redraw();
                }
            }
            _ => {}
        }
    })?;
    Ok(())
}
