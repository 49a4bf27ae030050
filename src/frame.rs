use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use glam::Vec2;
use shortwave_core::{LevelStateMachine, SliderRange, WaveDescriptor, WaveSampler};
use smallvec::SmallVec;
use winit::keyboard::KeyCode;

use crate::constants::{PLAYER_COLOR, PLAYER_Y, TEMPLATE_COLOR, TEMPLATE_Y, WINDOW_TITLE};
use crate::display::{ScreenState, SessionOutcome};
use crate::input::{control_event_for_key, nudged, ControlEvent};
use crate::render::GpuState;
use crate::ribbon::{push_ribbon, stroke_color, RibbonVertex};

/// Per-window game loop state: queued control events, the level, and the
/// scratch buffers reused every frame.
pub struct FrameContext {
    machine: LevelStateMachine,
    screen: Rc<RefCell<ScreenState>>,
    outcome: Rc<RefCell<SessionOutcome>>,
    pending: SmallVec<[ControlEvent; 8]>,
    started: Instant,
    last_frame: Instant,
    points: Vec<Vec2>,
    vertices: Vec<RibbonVertex>,
    title: String,
}

impl FrameContext {
    pub fn new(
        machine: LevelStateMachine,
        screen: Rc<RefCell<ScreenState>>,
        outcome: Rc<RefCell<SessionOutcome>>,
    ) -> Self {
        let now = Instant::now();
        Self {
            machine,
            screen,
            outcome,
            pending: SmallVec::new(),
            started: now,
            last_frame: now,
            points: Vec::new(),
            vertices: Vec::new(),
            title: String::new(),
        }
    }

    pub fn on_key(&mut self, key: KeyCode) {
        let selectable = self.screen.borrow().kind_selectable();
        if let Some(event) = control_event_for_key(key, selectable) {
            self.pending.push(event);
        }
    }

    pub fn request_exit(&mut self) {
        self.pending.push(ControlEvent::Exit);
    }

    pub fn should_close(&self) -> bool {
        self.outcome.borrow().return_requested
    }

    pub fn outcome(&self) -> SessionOutcome {
        *self.outcome.borrow()
    }

    /// Apply queued input, advance the level by the wall-clock delta, then
    /// draw both traces.
    pub fn frame(&mut self, gpu: &mut GpuState) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;

        for event in self.pending.drain(..) {
            match event {
                // resolved against the player as it stands after earlier events
                ControlEvent::NudgeFrequency(delta) => {
                    let current = self.machine.player().frequency;
                    self.machine
                        .on_frequency_changed(nudged(current, delta, SliderRange::FREQUENCY));
                }
                ControlEvent::NudgeAmplitude(delta) => {
                    let current = self.machine.player().amplitude;
                    self.machine
                        .on_amplitude_changed(nudged(current, delta, SliderRange::AMPLITUDE));
                }
                ControlEvent::Kind(kind) => self.machine.on_wave_kind_changed(kind),
                ControlEvent::Exit => self.machine.on_exit_requested(),
            }
        }
        self.machine.tick(dt);

        let player_rgb = self.screen.borrow().band_color(PLAYER_COLOR);
        let time = self.started.elapsed().as_secs_f32();
        self.vertices.clear();
        let traces = [
            (
                self.machine.template_trace(),
                self.machine.template(),
                TEMPLATE_Y,
                TEMPLATE_COLOR,
            ),
            (
                self.machine.player_trace(),
                self.machine.player(),
                PLAYER_Y,
                player_rgb,
            ),
        ];
        for (sampler, wave, y, rgb) in traces {
            if let Some(sampler) = sampler {
                append_trace(sampler, &wave, time, y, rgb, &mut self.points, &mut self.vertices);
            }
        }

        self.update_title(gpu.window);
        gpu.render(&self.vertices)
    }

    fn update_title(&mut self, window: &winit::window::Window) {
        let status = self.screen.borrow().title();
        let title = if status.is_empty() {
            WINDOW_TITLE.to_owned()
        } else {
            format!("{WINDOW_TITLE}  |  {status}")
        };
        if title != self.title {
            window.set_title(&title);
            self.title = title;
        }
    }
}

fn append_trace(
    sampler: &WaveSampler,
    wave: &WaveDescriptor,
    time: f32,
    y: f32,
    rgb: [f32; 3],
    points: &mut Vec<Vec2>,
    out: &mut Vec<RibbonVertex>,
) {
    sampler.render_into(wave, time, points);
    let stroke = sampler.stroke();
    push_ribbon(points, y, stroke.width, stroke_color(rgb, stroke.alpha), out);
}
