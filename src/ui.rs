use std::sync::mpsc::{self, Receiver};
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::Local;
use egui::*;

use crate::clock::{self, ClockText, ClockTicker};
use crate::config::{self, Config};
use crate::model::{self, AppEntry, Exec};
use crate::shortcuts::Shortcuts;

const CLOCK_PERIOD: Duration = Duration::from_secs(60);

pub fn run_ui(config: Config, catalog_thread: JoinHandle<Vec<AppEntry>>) {
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_app_id(env!("CARGO_PKG_NAME"))
            .with_inner_size(vec2(360.0, 720.0))
            .with_resizable(false),
        ..Default::default()
    };

    if let Err(err) = eframe::run_native(
        env!("CARGO_PKG_NAME"),
        options,
        Box::new(|cc| Box::new(HomeScreen::new(cc, config, catalog_thread))),
    ) {
        log::error!("UI error: {err}");
    }
}

/// Owns all home-screen state: the shortcut list, the installed catalog, the
/// clock ticker. Constructed once at startup, torn down once on exit.
struct HomeScreen {
    /// Application discovery thread, joined on the first frame
    catalog_thread: Option<JoinHandle<Vec<AppEntry>>>,

    /// Installed-application catalog, sorted by name
    catalog: Vec<AppEntry>,

    /// The user's home-screen shortcuts
    shortcuts: Shortcuts,

    /// Latest formatted clock state
    clock: ClockText,

    /// Ticks arrive here from the ticker thread, in firing order
    clock_rx: Receiver<ClockText>,

    ticker: ClockTicker,

    /// Whether the all-apps picker is shown
    picker_open: bool,

    dialer: Exec,
    camera: Exec,
}

impl HomeScreen {
    fn new(
        cc: &eframe::CreationContext<'_>,
        config: Config,
        catalog_thread: JoinHandle<Vec<AppEntry>>,
    ) -> Self {
        let mut shortcuts = Shortcuts::new();
        shortcuts.seed(&config.shortcuts);

        let (tx, clock_rx) = mpsc::channel();
        let egui_ctx = cc.egui_ctx.clone();

        let mut ticker = ClockTicker::new();
        let started = ticker.start(CLOCK_PERIOD, move || {
            // runs on the ticker thread: format, hand over, wake the UI.
            // display state is only touched by the receiver side
            let _ = tx.send(clock::format(&Local::now().naive_local()));
            egui_ctx.request_repaint();
        });

        if let Err(err) = started {
            log::error!("failed to start clock ticker: {err}");
        }

        Self {
            catalog_thread: Some(catalog_thread),
            catalog: vec![],
            shortcuts,
            clock: ClockText::default(),
            clock_rx,
            ticker,
            picker_open: false,
            dialer: config.dialer,
            camera: config.camera,
        }
    }

    fn ensure_init(&mut self) {
        let Some(catalog_thread) = self.catalog_thread.take() else {
            return;
        };

        self.catalog = match catalog_thread.join() {
            Ok(apps) => apps,
            Err(_) => {
                log::error!("application discovery thread panicked");
                vec![]
            }
        };
    }

    fn launch(&self, id: &str) {
        match model::resolve_launch(&self.catalog, id) {
            Some(exec) => {
                if let Err(err) = exec.spawn() {
                    log::warn!("failed to launch {id}: {err}");
                }
            }
            None => log::warn!("nothing launchable behind {id}"),
        }
    }

    fn clock_header(&self, ui: &mut Ui) {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&self.clock.time).size(64.0).strong());
            ui.label(RichText::new(&self.clock.date).text_style(TextStyle::Heading));
        });
        ui.add_space(16.0);
        ui.separator();
    }

    fn shortcut_list(&mut self, ui: &mut Ui) {
        let mut tapped = None;

        ScrollArea::vertical().show(ui, |ui| {
            // justify rows for better tap targets
            let list_layout = Layout::top_down(Align::Min).with_cross_justify(true);

            ui.with_layout(list_layout, |ui| {
                for entry in self.shortcuts.entries() {
                    let label = Label::new(
                        RichText::new(&entry.name).text_style(TextStyle::Heading),
                    )
                    .sense(Sense::click());

                    let response =
                        ui.add_sized(vec2(ui.available_width(), config::ROW_HEIGHT), label);

                    if response.clicked() {
                        tapped = Some(entry.id.clone());
                    }
                }
            });
        });

        if let Some(id) = tapped {
            self.launch(&id);
        }
    }

    fn action_bar(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if ui.button("Phone").clicked() {
                fire(&self.dialer, "dialer");
            }

            if ui.button("Camera").clicked() {
                fire(&self.camera, "camera");
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("+ Add app").clicked() {
                    self.picker_open = true;
                }
            });
        });
    }

    fn picker_window(&mut self, ctx: &egui::Context) {
        if !self.picker_open {
            return;
        }

        let mut open = true;
        let mut picked = None;

        egui::Window::new("All apps")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ScrollArea::vertical().max_height(480.0).show(ui, |ui| {
                    let list_layout = Layout::top_down(Align::Min).with_cross_justify(true);

                    ui.with_layout(list_layout, |ui| {
                        for entry in &self.catalog {
                            let label = Label::new(RichText::new(&entry.name))
                                .sense(Sense::click());

                            let response = label.ui(ui).on_hover_text(&entry.id);

                            if response.clicked() {
                                picked = Some(entry.clone());
                            }
                        }
                    });
                });
            });

        if let Some(entry) = picked {
            // the only de-duplication gate; a repeated pick changes nothing
            if !self.shortcuts.add_if_absent(entry) {
                log::debug!("picked app is already on the home screen");
            }
            open = false;
        }

        self.picker_open = open;
    }
}

impl eframe::App for HomeScreen {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        config::BACKGROUND_COLOR.to_normalized_gamma_f32()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_init();

        // drain pending ticks; the last one wins
        while let Ok(text) = self.clock_rx.try_recv() {
            self.clock = text;
        }

        TopBottomPanel::bottom("actions")
            .frame(Frame::none().inner_margin(Margin::same(12.0)))
            .show(ctx, |ui| {
                self.action_bar(ui);
            });

        CentralPanel::default()
            .frame(Frame::none().inner_margin(Margin::same(8.0)))
            .show(ctx, |ui| {
                self.clock_header(ui);
                self.shortcut_list(ui);
            });

        self.picker_window(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.ticker.stop();
    }
}

fn fire(exec: &Exec, what: &str) {
    if let Err(err) = exec.spawn() {
        log::warn!("failed to start {what}: {err}");
    }
}
