mod audio;
mod resource_strings;

use audio::Audio;
use chip8vm::{FramebufferSnapshot, MachineError, Options, Processor, Quirks, Scheduler};
use core::fmt;
use eframe::egui;
use egui::*;
use egui_modal::*;
use resource_strings::*;
use rfd::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const INITIAL_WIDTH: f32 = 960.;
const INITIAL_HEIGHT: f32 = 540.;
const MIN_SPEED: u64 = 100;
const MAX_SPEED: u64 = 10000;
const COLOUR_TITLE: Color32 = Color32::LIGHT_GRAY;
const COLOUR_HEADING: Color32 = Color32::LIGHT_GRAY;
const COLOUR_LABEL: Color32 = Color32::LIGHT_GRAY;
const COLOUR_BUTTON: Color32 = Color32::LIGHT_GRAY;
const COLOUR_CHECKBOX: Color32 = Color32::LIGHT_GRAY;
const COLOUR_ERROR: Color32 = Color32::RED;
const COLOUR_DEFAULT_FOREGROUND: Color32 = egui::Color32::from_rgb(0, 220, 255);
const COLOUR_DEFAULT_BACKGROUND: Color32 = egui::Color32::from_rgb(9, 73, 146);
const UI_SPACER_TOP: f32 = 4.;
const UI_SPACER_BOTTOM: f32 = 2.;
const UI_SPACER_TEXT: f32 = 8.;
const UI_SPACER_HORIZONTAL: f32 = 100.;
const DRAGVALUE_QUANTUM: f64 = 10.;
/// How long the worker thread sleeps between polling for UI messages and
/// advancing the scheduler. Short enough to keep the displayed frame rate and
/// reported cycles/s responsive, long enough not to peg a core spinning on
/// accumulators that have nothing due yet.
const WORKER_POLL_INTERVAL: Duration = Duration::from_millis(1);

fn main() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        initial_window_size: Some(Vec2::from((INITIAL_WIDTH, INITIAL_HEIGHT))),
        ..Default::default()
    };

    eframe::run_native(
        &format!("{} (v{})", TITLE_APP_WINDOW, VERSION),
        options,
        Box::new(|_cc| Box::new(ChipolataApp::default())),
    )
}

#[derive(PartialEq, Debug)]
enum ExecutionState {
    Stopped,
    Running,
    Paused,
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

enum MessageToChipolata {
    ReadyForUpdate,
    KeyPressEvent { key: u8, pressed: bool },
    SetProcessorSpeed { new_speed: u64 },
    Pause,
    Resume,
    Terminate,
}

/// Everything the UI needs to refresh itself for one frame.
struct FrameReport {
    framebuffer: FramebufferSnapshot,
    sound_active: bool,
    cycles: u64,
    halted: bool,
}

enum MessageFromChipolata {
    Frame(FrameReport),
    ErrorReport { error: MachineError },
}

struct ChipolataApp {
    message_to_chipolata_tx: Option<mpsc::Sender<MessageToChipolata>>,
    message_from_chipolata_rx: Option<mpsc::Receiver<MessageFromChipolata>>,
    audio_stream: Option<Audio>,
    program_file_path: String,
    processor_speed: u64,
    execution_state: ExecutionState,
    options: Options,
    new_options: Options,
    foreground_colour: egui::Color32,
    background_colour: egui::Color32,
    roms_path: PathBuf,
    options_path: PathBuf,
    last_error_string: String,
    last_frame: Option<FrameReport>,
    cycles_completed: u64,
    cycle_timer: Instant,
    cycles_per_second: u64,
}

impl eframe::App for ChipolataApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.render_header(ctx);
        self.render_footer(ctx);
        if self.execution_state != ExecutionState::Stopped {
            self.request_chipolata_update();
            self.process_chipolata_update();
            if let Some(frame) = &self.last_frame {
                if frame.halted && self.execution_state == ExecutionState::Running {
                    self.execution_state = ExecutionState::Paused;
                }
            }
            let width = self
                .last_frame
                .as_ref()
                .map(|frame| frame.framebuffer.width)
                .unwrap_or_default();
            let height = self
                .last_frame
                .as_ref()
                .map(|frame| frame.framebuffer.height)
                .unwrap_or_default();
            if width > 0 && height > 0 {
                self.render_chipolata_ui(ctx);
            }
        } else {
            self.render_welcome_screen(ctx);
        }
        ctx.request_repaint();
    }
}

impl Default for ChipolataApp {
    fn default() -> Self {
        ChipolataApp {
            message_to_chipolata_tx: None,
            message_from_chipolata_rx: None,
            audio_stream: None,
            program_file_path: String::default(),
            processor_speed: 0,
            execution_state: ExecutionState::Stopped,
            options: Options::default(),
            new_options: Options::default(),
            foreground_colour: COLOUR_DEFAULT_FOREGROUND,
            background_colour: COLOUR_DEFAULT_BACKGROUND,
            roms_path: std::env::current_dir()
                .unwrap()
                .join(PATH_RESOURCE_DIRECTORY_NAME)
                .join(PATH_ROMS_DIRECTORY_NAME),
            options_path: std::env::current_dir()
                .unwrap()
                .join(PATH_RESOURCE_DIRECTORY_NAME)
                .join(PATH_OPTIONS_DIRECTORY_NAME),
            last_error_string: String::default(),
            last_frame: None,
            cycles_completed: 0,
            cycle_timer: Instant::now(),
            cycles_per_second: 0,
        }
    }
}

impl ChipolataApp {
    fn instantiate_chipolata(&mut self, rom: Vec<u8>, options: Options) {
        if self.execution_state != ExecutionState::Stopped {
            self.stop_chipolata();
        }
        let mut processor = Processor::new(options.quirks);
        if let Err(error) = processor.load_rom(rom) {
            self.last_error_string = error.to_string();
            return;
        }
        let (message_to_chipolata_tx, message_to_chipolata_rx) = mpsc::channel();
        let (message_from_chipolata_tx, message_from_chipolata_rx) = mpsc::channel();
        self.message_to_chipolata_tx = Some(message_to_chipolata_tx);
        self.message_from_chipolata_rx = Some(message_from_chipolata_rx);
        self.audio_stream = Some(Audio::new());
        self.processor_speed = options.processor_speed_hertz;
        self.cycles_completed = 0;
        self.cycle_timer = Instant::now();
        self.cycles_per_second = 0;
        self.last_error_string = String::default();
        self.last_frame = None;
        // Host the processor and its scheduler on a worker thread so the CPU-bound
        // interpreter loop never blocks the UI's own event loop.
        thread::spawn(move || {
            let mut scheduler = Scheduler::new(options.processor_speed_hertz);
            let mut fault_reported = false;
            'outer: loop {
                let mut ready_for_update = false;
                for message in message_to_chipolata_rx.try_iter() {
                    match message {
                        MessageToChipolata::KeyPressEvent { key, pressed } => {
                            let _ = if pressed {
                                processor.press(key)
                            } else {
                                processor.release(key)
                            };
                        }
                        MessageToChipolata::ReadyForUpdate => ready_for_update = true,
                        MessageToChipolata::SetProcessorSpeed { new_speed } => {
                            scheduler.set_processor_speed_hertz(new_speed)
                        }
                        MessageToChipolata::Pause => scheduler.pause(),
                        MessageToChipolata::Resume => scheduler.resume(),
                        MessageToChipolata::Terminate => break 'outer,
                    }
                }
                scheduler.advance(&mut processor);
                if !fault_reported {
                    if let Some(error) = processor.last_fault() {
                        fault_reported = true;
                        if message_from_chipolata_tx
                            .send(MessageFromChipolata::ErrorReport { error })
                            .is_err()
                        {
                            break 'outer;
                        }
                    }
                }
                if ready_for_update {
                    let frame = FrameReport {
                        framebuffer: processor.framebuffer_snapshot(),
                        sound_active: processor.sound_active(),
                        cycles: processor.cycle_count(),
                        halted: processor.is_halted(),
                    };
                    if message_from_chipolata_tx
                        .send(MessageFromChipolata::Frame(frame))
                        .is_err()
                    {
                        break 'outer;
                    }
                }
                thread::sleep(WORKER_POLL_INTERVAL);
            }
        });
        self.execution_state = ExecutionState::Running;
    }

    fn stop_chipolata(&mut self) {
        self.execution_state = ExecutionState::Stopped;
        self.audio_stream = None;
        if let Some(message_to_chipolata_tx) = &self.message_to_chipolata_tx {
            let _ = message_to_chipolata_tx.send(MessageToChipolata::Terminate);
        }
        self.message_from_chipolata_rx = None;
        self.message_to_chipolata_tx = None;
        self.processor_speed = 0;
        self.cycles_per_second = 0;
        self.last_frame = None;
    }

    fn pause_chipolata(&mut self) {
        self.execution_state = ExecutionState::Paused;
        if let Some(message_to_chipolata_tx) = &self.message_to_chipolata_tx {
            let _ = message_to_chipolata_tx.send(MessageToChipolata::Pause);
        }
    }

    fn resume_chipolata(&mut self) {
        self.execution_state = ExecutionState::Running;
        if let Some(message_to_chipolata_tx) = &self.message_to_chipolata_tx {
            let _ = message_to_chipolata_tx.send(MessageToChipolata::Resume);
        }
    }

    fn set_chipolata_speed(&self, new_speed: u64) {
        if let Some(message_to_chipolata_tx) = &self.message_to_chipolata_tx {
            let _ =
                message_to_chipolata_tx.send(MessageToChipolata::SetProcessorSpeed { new_speed });
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        ctx.input(|i| {
            let key_events: Vec<(&Key, &bool)> = i
                .events
                .iter()
                .filter_map(|e| match e {
                    Event::Key { key, pressed, .. } => Some((key, pressed)),
                    _ => None,
                })
                .collect();
            for (key, state) in key_events {
                match key {
                    Key::Num1 => self.send_key_press_event(0x1, *state),
                    Key::Num2 => self.send_key_press_event(0x2, *state),
                    Key::Num3 => self.send_key_press_event(0x3, *state),
                    Key::Num4 => self.send_key_press_event(0xC, *state),
                    Key::Q => self.send_key_press_event(0x4, *state),
                    Key::W => self.send_key_press_event(0x5, *state),
                    Key::E => self.send_key_press_event(0x6, *state),
                    Key::R => self.send_key_press_event(0xD, *state),
                    Key::A => self.send_key_press_event(0x7, *state),
                    Key::S => self.send_key_press_event(0x8, *state),
                    Key::D => self.send_key_press_event(0x9, *state),
                    Key::F => self.send_key_press_event(0xE, *state),
                    Key::Z => self.send_key_press_event(0xA, *state),
                    Key::X => self.send_key_press_event(0x0, *state),
                    Key::C => self.send_key_press_event(0xB, *state),
                    Key::V => self.send_key_press_event(0xF, *state),
                    _ => (),
                }
            }
        });
    }

    fn send_key_press_event(&self, key: u8, pressed: bool) {
        if let Some(message_to_chipolata_tx) = &self.message_to_chipolata_tx {
            let _ =
                message_to_chipolata_tx.send(MessageToChipolata::KeyPressEvent { key, pressed });
        }
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        let modal: Modal = self.render_modal_options(ctx);
        TopBottomPanel::top(ID_TOP_PANEL).show(ctx, |ui| {
            ui.add_space(UI_SPACER_TOP);
            ui.horizontal(|ui| {
                if ui
                    .button(RichText::new(CAPTION_BUTTON_LOAD_PROGRAM).color(COLOUR_BUTTON))
                    .on_hover_text(TOOLTIP_BUTTON_LOAD_PROGRAM)
                    .clicked()
                {
                    if let Some(file) = FileDialog::new()
                        .set_title(TITLE_LOAD_PROGRAM_WINDOW)
                        .add_filter(FILTER_CHIP8, &["ch8"])
                        .add_filter(FILTER_ALL, &["*"])
                        .set_directory(&self.roms_path)
                        .pick_file()
                    {
                        self.program_file_path = file.display().to_string();
                        self.new_options = self.options;
                        modal.open();
                    }
                }
                if ui
                    .add_enabled(
                        self.program_file_path != String::default(),
                        Button::new(RichText::new(CAPTION_BUTTON_OPTIONS).color(COLOUR_BUTTON)),
                    )
                    .on_hover_text(TOOLTIP_BUTTON_OPTIONS)
                    .on_disabled_hover_text(TOOLTIP_BUTTON_OPTIONS_DISABLED)
                    .clicked()
                {
                    self.new_options = self.options;
                    modal.open();
                }
                ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                    ui.color_edit_button_srgba(&mut self.background_colour)
                        .on_hover_text(TOOLTIP_COLOUR_PICKER_BACKGROUND);
                    ui.label(RichText::new(CAPTION_LABEL_BACKGROUND_COLOUR).color(COLOUR_LABEL));
                    ui.color_edit_button_srgba(&mut self.foreground_colour)
                        .on_hover_text(TOOLTIP_COLOUR_PICKER_FOREGROUND);
                    ui.label(RichText::new(CAPTION_LABEL_FOREGROUND_COLOUR).color(COLOUR_LABEL));
                });
            });
            ui.add_space(UI_SPACER_BOTTOM);
        });
    }

    fn render_footer(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom(ID_BOTTOM_PANEL).show(ctx, |ui| {
            ui.add_space(UI_SPACER_TOP);
            if self.last_error_string != String::default() {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(CAPTION_LABEL_ERROR).color(COLOUR_ERROR));
                    ui.label(
                        RichText::new(&self.last_error_string)
                            .color(COLOUR_ERROR)
                            .monospace(),
                    );
                });
                ui.separator();
            }
            ui.horizontal(|ui| {
                match self.execution_state {
                    ExecutionState::Paused => {
                        if ui
                            .button(RichText::new(CAPTION_BUTTON_RUN).color(COLOUR_BUTTON))
                            .on_hover_text(TOOLTIP_BUTTON_RUN)
                            .clicked()
                        {
                            self.resume_chipolata();
                        }
                    }
                    ExecutionState::Running => {
                        if ui
                            .button(RichText::new(CAPTION_BUTTON_PAUSE).color(COLOUR_BUTTON))
                            .on_hover_text(TOOLTIP_BUTTON_PAUSE)
                            .clicked()
                        {
                            self.pause_chipolata();
                        }
                    }
                    ExecutionState::Stopped => {
                        ui.add_enabled(
                            false,
                            Button::new(RichText::new(CAPTION_BUTTON_RUN).color(COLOUR_BUTTON)),
                        )
                        .on_disabled_hover_text(TOOLTIP_BUTTON_RUN_DISABLED);
                    }
                }
                let can_restart: bool = match self.execution_state {
                    ExecutionState::Stopped => self.program_file_path != String::default(),
                    ExecutionState::Paused | ExecutionState::Running => true,
                };
                if ui
                    .add_enabled(
                        can_restart,
                        Button::new(RichText::new(CAPTION_BUTTON_RESTART).color(COLOUR_BUTTON)),
                    )
                    .on_hover_text(TOOLTIP_BUTTON_RESTART)
                    .on_disabled_hover_text(TOOLTIP_BUTTON_RESTART_DISABLED)
                    .clicked()
                {
                    self.restart_chipolata();
                };
                match self.execution_state {
                    ExecutionState::Paused | ExecutionState::Running => {
                        if ui
                            .button(RichText::new(CAPTION_BUTTON_STOP).color(COLOUR_BUTTON))
                            .on_hover_text(TOOLTIP_BUTTON_STOP)
                            .clicked()
                        {
                            self.stop_chipolata();
                            self.program_file_path = String::default();
                        };
                    }
                    ExecutionState::Stopped => {
                        ui.add_enabled(
                            false,
                            Button::new(RichText::new(CAPTION_BUTTON_STOP).color(COLOUR_BUTTON)),
                        )
                        .on_disabled_hover_text(TOOLTIP_BUTTON_STOP_DISABLED);
                    }
                }

                let old_speed: u64 = self.processor_speed;
                ui.label(RichText::new(CAPTION_LABEL_PROCESSOR_SPEED).color(COLOUR_LABEL));
                ui.add(
                    Slider::new(&mut self.processor_speed, MIN_SPEED..=MAX_SPEED)
                        .text(CAPTION_PROCESSOR_SPEED_SUFFIX),
                )
                .on_hover_text(TOOLTIP_SLIDER_PROCESSOR_SPEED);
                if self.processor_speed != old_speed {
                    self.set_chipolata_speed(self.processor_speed);
                }
                ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                    let state_colour: Color32 = match self.execution_state {
                        ExecutionState::Stopped => Color32::RED,
                        ExecutionState::Paused => Color32::YELLOW,
                        ExecutionState::Running => Color32::GREEN,
                    };
                    ui.label(RichText::new(&self.execution_state.to_string()).color(state_colour));
                    ui.label(RichText::new(CAPTION_LABEL_EXECUTION_STATUS).color(COLOUR_LABEL));
                    ui.label(RichText::new(
                        self.cycles_per_second.to_string() + " " + CAPTION_PROCESSOR_SPEED_SUFFIX,
                    ));
                    ui.label(RichText::new(CAPTION_LABEL_CYCLES_PER_SECOND).color(COLOUR_LABEL));
                });
            });
            ui.add_space(UI_SPACER_BOTTOM);
        });
    }

    fn render_modal_options(&mut self, ctx: &egui::Context) -> Modal {
        let modal_style: ModalStyle = ModalStyle {
            default_width: Some(0.), // forces the window to adjust to a sensible width
            ..Default::default()
        };
        let modal = Modal::new(ctx, ID_OPTIONS_MODAL).with_style(&modal_style);
        let (is_cosmac, is_chip48, is_superchip, is_xochip) = self.check_quirks_preset();
        modal.show(|ui| {
            modal.title(ui, RichText::new(TITLE_OPTIONS_WINDOW).color(COLOUR_TITLE));
            ui.heading(RichText::new(CAPTION_HEADING_OPTIONS_COMMON).color(COLOUR_HEADING));
            egui::Grid::new(ID_OPTIONS_MODAL_GRID).show(ui, |ui| {
                ui.label(RichText::new(CAPTION_LABEL_PROCESSOR_SPEED).color(COLOUR_LABEL));
                ui.add(
                    egui::DragValue::new(&mut self.new_options.processor_speed_hertz)
                        .clamp_range(MIN_SPEED..=MAX_SPEED)
                        .fixed_decimals(0)
                        .speed(DRAGVALUE_QUANTUM),
                )
                .on_hover_text(TOOLTIP_SLIDER_PROCESSOR_SPEED);
                ui.label(RichText::new(CAPTION_PROCESSOR_SPEED_SUFFIX));
                ui.end_row();
                ui.label(RichText::new(CAPTION_LABEL_PROGRAM_ADDRESS).color(COLOUR_LABEL));
                ui.add(
                    egui::DragValue::new(&mut self.new_options.program_start_address)
                        .clamp_range(0x0..=0xFFFF)
                        .hexadecimal(1, false, true),
                )
                .on_hover_text(TOOLTIP_SLIDER_PROGRAM_ADDRESS);
                ui.end_row();
            });
            ui.separator();
            ui.heading(RichText::new(CAPTION_HEADING_EMULATION_MODE).color(COLOUR_HEADING));
            ui.horizontal(|ui| {
                if ui
                    .add(egui::SelectableLabel::new(is_cosmac, CAPTION_RADIO_COSMAC))
                    .on_hover_text(TOOLTIP_SELECTABLE_COSMAC)
                    .clicked()
                {
                    self.new_options.quirks = Quirks::cosmac();
                }
                if ui
                    .add(egui::SelectableLabel::new(is_chip48, CAPTION_RADIO_CHIP48))
                    .on_hover_text(TOOLTIP_SELECTABLE_CHIP48)
                    .clicked()
                {
                    self.new_options.quirks = Quirks::chip48();
                }
                if ui
                    .add(egui::SelectableLabel::new(is_superchip, CAPTION_RADIO_SCHIP))
                    .on_hover_text(TOOLTIP_SELECTABLE_SUPERCHIP)
                    .clicked()
                {
                    self.new_options.quirks = Quirks::super_chip_11();
                }
                if ui
                    .add(egui::SelectableLabel::new(is_xochip, CAPTION_RADIO_XOCHIP))
                    .on_hover_text(TOOLTIP_SELECTABLE_XOCHIP)
                    .clicked()
                {
                    self.new_options.quirks = Quirks::xo_chip_subset();
                }
            });
            ui.label(RichText::new(CAPTION_LABEL_MODE_SPECIFIC_OPTIONS).color(COLOUR_LABEL));
            ui.heading(RichText::new(CAPTION_HEADING_QUIRKS).color(COLOUR_HEADING));
            ui.group(|ui| {
                let quirks = &mut self.new_options.quirks;
                ui.checkbox(
                    &mut quirks.vf_reset,
                    RichText::new(CAPTION_CHECKBOX_VF_RESET).color(COLOUR_CHECKBOX),
                )
                .on_hover_text(TOOLTIP_CHECKBOX_VF_RESET);
                ui.checkbox(
                    &mut quirks.memory_increment,
                    RichText::new(CAPTION_CHECKBOX_MEMORY_INCREMENT).color(COLOUR_CHECKBOX),
                )
                .on_hover_text(TOOLTIP_CHECKBOX_MEMORY_INCREMENT);
                ui.checkbox(
                    &mut quirks.display_wait,
                    RichText::new(CAPTION_CHECKBOX_DISPLAY_WAIT).color(COLOUR_CHECKBOX),
                )
                .on_hover_text(TOOLTIP_CHECKBOX_DISPLAY_WAIT);
                ui.checkbox(
                    &mut quirks.clipping,
                    RichText::new(CAPTION_CHECKBOX_CLIPPING).color(COLOUR_CHECKBOX),
                )
                .on_hover_text(TOOLTIP_CHECKBOX_CLIPPING);
                ui.checkbox(
                    &mut quirks.shifting,
                    RichText::new(CAPTION_CHECKBOX_SHIFTING).color(COLOUR_CHECKBOX),
                )
                .on_hover_text(TOOLTIP_CHECKBOX_SHIFTING);
                ui.checkbox(
                    &mut quirks.jumping,
                    RichText::new(CAPTION_CHECKBOX_JUMPING).color(COLOUR_CHECKBOX),
                )
                .on_hover_text(TOOLTIP_CHECKBOX_JUMPING);
            });
            ui.separator();
            ui.heading(RichText::new(CAPTION_HEADING_OPTIONS_LOAD_SAVE).color(COLOUR_HEADING));
            ui.horizontal(|ui| {
                if ui
                    .button(RichText::new(CAPTION_BUTTON_LOAD_OPTIONS).color(COLOUR_BUTTON))
                    .on_hover_text(TOOLTIP_BUTTON_LOAD_OPTIONS)
                    .clicked()
                {
                    if let Some(file) = FileDialog::new()
                        .set_title(TITLE_LOAD_OPTIONS_WINDOW)
                        .add_filter(FILTER_JSON, &["json"])
                        .add_filter(FILTER_ALL, &["*"])
                        .set_directory(&self.options_path)
                        .pick_file()
                    {
                        if let Ok(options) =
                            Options::load_from_file(Path::new(&file.display().to_string()))
                        {
                            self.new_options = options;
                        } else {
                            MessageDialog::new()
                                .set_level(MessageLevel::Error)
                                .set_title(TITLE_LOAD_OPTIONS_ERROR_WINDOW)
                                .set_description(ERROR_LOAD_OPTIONS)
                                .set_buttons(MessageButtons::Ok)
                                .show();
                        }
                    }
                }
                if ui
                    .button(RichText::new(CAPTION_BUTTON_SAVE_OPTIONS).color(COLOUR_BUTTON))
                    .on_hover_text(TOOLTIP_BUTTON_SAVE_OPTIONS)
                    .clicked()
                {
                    if let Some(file) = FileDialog::new()
                        .set_title(TITLE_SAVE_OPTIONS_WINDOW)
                        .add_filter(FILTER_JSON, &["json"])
                        .add_filter(FILTER_ALL, &["*"])
                        .set_directory(&self.options_path)
                        .save_file()
                    {
                        if self
                            .new_options
                            .save_to_file(Path::new(&file.display().to_string()))
                            .is_err()
                        {
                            MessageDialog::new()
                                .set_level(MessageLevel::Error)
                                .set_title(TITLE_SAVE_OPTIONS_ERROR_WINDOW)
                                .set_description(ERROR_SAVE_OPTIONS)
                                .set_buttons(MessageButtons::Ok)
                                .show();
                        }
                    }
                }
            });
            modal.buttons(ui, |ui| {
                if self.execution_state != ExecutionState::Stopped
                    || self.last_error_string != String::default()
                {
                    if modal
                        .button(ui, CAPTION_BUTTON_CANCEL)
                        .on_hover_text(TOOLTIP_BUTTON_OPTIONS_CANCEL)
                        .clicked()
                    {
                        // nothing further to undo; new_options is discarded on next open
                    };
                }
                if modal
                    .button(ui, CAPTION_BUTTON_OK)
                    .on_hover_text(TOOLTIP_BUTTON_OPTIONS_OK)
                    .clicked()
                {
                    self.options = self.new_options;
                    self.restart_chipolata();
                };
            });
        });
        modal
    }

    fn check_quirks_preset(&self) -> (bool, bool, bool, bool) {
        let quirks = self.new_options.quirks;
        (
            quirks == Quirks::cosmac(),
            quirks == Quirks::chip48(),
            quirks == Quirks::super_chip_11(),
            quirks == Quirks::xo_chip_subset(),
        )
    }

    /// Reads the currently selected ROM file and (re)instantiates the
    /// processor with it, reporting any I/O failure in the footer.
    fn restart_chipolata(&mut self) {
        match std::fs::read(&self.program_file_path) {
            Ok(rom) => self.instantiate_chipolata(rom, self.options),
            Err(_) => self.last_error_string = ERROR_LOAD_PROGRAM.to_string(),
        }
    }

    fn request_chipolata_update(&self) {
        if let Some(message_to_chipolata_tx) = &self.message_to_chipolata_tx {
            let _ = message_to_chipolata_tx.send(MessageToChipolata::ReadyForUpdate);
        }
    }

    fn process_chipolata_update(&mut self) {
        let Some(message_from_chipolata_rx) = &self.message_from_chipolata_rx else {
            return;
        };
        let Ok(message) = message_from_chipolata_rx.recv() else {
            return;
        };
        match message {
            MessageFromChipolata::Frame(frame) => {
                if let Some(audio_stream) = &self.audio_stream {
                    match (frame.sound_active, audio_stream.is_paused()) {
                        (true, true) => audio_stream.play(),
                        (false, false) => audio_stream.pause(),
                        _ => (),
                    }
                }
                let millis_elapsed: u128 = self.cycle_timer.elapsed().as_millis();
                if millis_elapsed >= 1000 {
                    self.cycles_per_second =
                        (frame.cycles - self.cycles_completed) * 1000 / millis_elapsed as u64;
                    self.cycles_completed = frame.cycles;
                    self.cycle_timer = Instant::now();
                }
                self.last_frame = Some(frame);
            }
            MessageFromChipolata::ErrorReport { error } => {
                self.last_error_string = error.to_string();
                self.stop_chipolata();
            }
        }
    }

    fn render_chipolata_ui(&self, ctx: &egui::Context) {
        let Some(frame) = &self.last_frame else {
            return;
        };
        let snapshot = &frame.framebuffer;
        egui::CentralPanel::default().show(ctx, |ui| {
            let painter = ui.painter();
            let pixel_width: f32 = ui.available_width() / snapshot.width as f32;
            let pixel_height: f32 = ui.available_height() / snapshot.height as f32;
            let min_x: f32 = ui.min_rect().min[0];
            let min_y: f32 = ui.min_rect().min[1];
            for row in 0..snapshot.height {
                for col in 0..snapshot.width {
                    let colour: egui::Color32 = if snapshot.bits[row * snapshot.width + col] != 0 {
                        self.foreground_colour
                    } else {
                        self.background_colour
                    };
                    let stroke: egui::Stroke = Stroke::new(1., colour);
                    painter.rect(
                        egui::Rect::from_two_pos(
                            Pos2::from((
                                min_x + col as f32 * pixel_width,
                                min_y + row as f32 * pixel_height,
                            )),
                            Pos2::from((
                                min_x + (col + 1) as f32 * pixel_width,
                                min_y + (row + 1) as f32 * pixel_height,
                            )),
                        ),
                        egui::Rounding::none(),
                        colour,
                        stroke,
                    );
                }
            }
        });
    }

    fn render_welcome_screen(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.group(|ui| {
                    ui.vertical(|ui| {
                        ui.heading(CAPTION_HEADING_GETTING_STARTED);
                        ui.add_space(UI_SPACER_TEXT);
                        ui.label(CAPTION_LABEL_GETTING_STARTED_1);
                        ui.add_space(UI_SPACER_TEXT);
                        ui.label(CAPTION_LABEL_GETTING_STARTED_2);
                        ui.add_space(UI_SPACER_TEXT);
                        ui.label(CAPTION_LABEL_GETTING_STARTED_3);
                        ui.add_space(UI_SPACER_TEXT);
                        ui.label(CAPTION_LABEL_GETTING_STARTED_4);
                        ui.add_space(UI_SPACER_TEXT);
                        ui.label(CAPTION_LABEL_GETTING_STARTED_5);
                        ui.add_space(UI_SPACER_TEXT);
                        ui.label(CAPTION_LABEL_GETTING_STARTED_6);
                    });
                });
                ui.vertical(|ui| {
                    ui.group(|ui| {
                        ui.vertical(|ui| {
                            ui.heading(CAPTION_HEADING_KEYBOARD_CONTROLS);
                            ui.add_space(UI_SPACER_TEXT);
                            ui.label(CAPTION_LABEL_KEYBOARD_CONTROLS_1);
                            ui.add_space(UI_SPACER_TEXT);
                            ui.add_space(UI_SPACER_TEXT);
                            ui.horizontal(|ui| {
                                ui.add_space(UI_SPACER_HORIZONTAL);
                                egui::Grid::new(ID_KEYBOARD_CONTROLS_GRID_1)
                                    .striped(true)
                                    .show(ui, |ui| {
                                        ui.label("1");
                                        ui.label("2");
                                        ui.label("3");
                                        ui.label("C");
                                        ui.end_row();
                                        ui.label("4");
                                        ui.label("5");
                                        ui.label("6");
                                        ui.label("D");
                                        ui.end_row();
                                        ui.label("7");
                                        ui.label("8");
                                        ui.label("9");
                                        ui.label("E");
                                        ui.end_row();
                                        ui.label("A");
                                        ui.label("0");
                                        ui.label("B");
                                        ui.label("F");
                                        ui.end_row();
                                    });
                            });
                            ui.add_space(UI_SPACER_TEXT);
                            ui.add_space(UI_SPACER_TEXT);
                            ui.label(CAPTION_LABEL_KEYBOARD_CONTROLS_2);
                            ui.add_space(UI_SPACER_TEXT);
                            ui.add_space(UI_SPACER_TEXT);
                            ui.horizontal(|ui| {
                                ui.add_space(UI_SPACER_HORIZONTAL);
                                egui::Grid::new(ID_KEYBOARD_CONTROLS_GRID_2)
                                    .striped(true)
                                    .show(ui, |ui| {
                                        ui.label("1");
                                        ui.label("2");
                                        ui.label("3");
                                        ui.label("4");
                                        ui.end_row();
                                        ui.label("Q");
                                        ui.label("W");
                                        ui.label("E");
                                        ui.label("R");
                                        ui.end_row();
                                        ui.label("A");
                                        ui.label("S");
                                        ui.label("D");
                                        ui.label("F");
                                        ui.end_row();
                                        ui.label("Z");
                                        ui.label("X");
                                        ui.label("C");
                                        ui.label("V");
                                        ui.end_row();
                                    });
                            });
                        });
                    });
                    ui.group(|ui| {
                        ui.vertical(|ui| {
                            ui.heading(CAPTION_HEADING_ABOUT);
                            ui.add_space(UI_SPACER_TEXT);
                            ui.horizontal(|ui| {
                                ui.label(CAPTION_LABEL_ABOUT_1);
                                ui.label(
                                    RichText::new(&format!("v{}", VERSION)).color(COLOUR_LABEL),
                                );
                            });
                            ui.label(CAPTION_LABEL_ABOUT_2);
                            ui.add_space(UI_SPACER_TEXT);
                            ui.add(egui::Hyperlink::new(LINK_GITHUB));
                        });
                    });
                });
            });
        });
    }
}
