use crate::config::{self, Config};
use crate::events::{AppEvent, SearchFailure, WorkerCommand};
use crate::gui::list;
use crate::gui::state::{Alert, AppState, Redraw};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel::{self, WHEEL_SIZE, WheelState};
use gtk::prelude::*;
use gtk4 as gtk;
use placepick::PlaceId;
use placepick::search::{MAX_RADIUS, MIN_RADIUS, SearchOutcome};
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

const RADIUS_STEP: f64 = 100.0;

pub struct AppModel {
    pub state: AppState,
    pub wheel: Rc<RefCell<WheelState>>,
    pub config: Config,
    pub commands: async_channel::Sender<WorkerCommand>,
    pub list_box: gtk::ListBox,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    KeywordChanged(String),
    RadiusChanged(f64),
    Search,
    SearchFinished(SearchOutcome),
    SearchFailed(SearchFailure),
    Toggle(PlaceId, bool),
    Spin,
    SpinFinished,
    CloseResult,
    DismissAlert,
    OpenSettings,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::SearchFinished(outcome) => AppMsg::SearchFinished(outcome),
            AppEvent::SearchFailed(failure) => AppMsg::SearchFailed(failure),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    /// Full re-render of list and wheel after any change to the selection.
    fn refresh(&self, redraw: Redraw, sender: &ComponentSender<Self>) {
        if redraw == Redraw::Skip {
            return;
        }
        self.wheel
            .borrow_mut()
            .set_labels(self.state.wheel_labels());
        list::render(&self.list_box, &self.state.selection, sender);
        self.drawing_area.queue_draw();
    }

    fn start_search(&mut self, sender: &ComponentSender<Self>) {
        let Some(request) = self.state.begin_search() else {
            return;
        };

        if let Err(e) = self.commands.try_send(WorkerCommand::Search(request)) {
            let redraw = self.state.fail_search(SearchFailure::service(e));
            self.refresh(redraw, sender);
        }
    }

    fn spin(&mut self, sender: &ComponentSender<Self>) {
        let plan = match self.state.begin_spin(self.config.spin.turns, &mut rand::rng()) {
            Ok(Some(plan)) => plan,
            Ok(None) => return,
            Err(e) => {
                log::warn!("Cannot spin: {}", e);
                return;
            }
        };

        log::debug!(
            "Spinning to sector {} of {} ({:.1}°)",
            plan.winner,
            plan.count,
            plan.target_rotation
        );

        self.wheel
            .borrow_mut()
            .start_spin(plan, self.config.spin.duration);

        let wheel = self.wheel.clone();
        let sender = sender.clone();
        self.drawing_area.add_tick_callback(move |area, clock| {
            let frame = wheel.borrow_mut().advance(clock.frame_time());
            area.queue_draw();
            if frame.finished {
                sender.input(AppMsg::SpinFinished);
                glib::ControlFlow::Break
            } else {
                glib::ControlFlow::Continue
            }
        });
    }

    fn finish_spin(&mut self) {
        let winner = self.wheel.borrow_mut().finish_spin();
        self.state.finish_spin(winner);
        self.drawing_area.queue_draw();
    }

    fn open_settings(&mut self) {
        match config::write_default_config() {
            Ok(path) => {
                if let Err(e) = std::process::Command::new("xdg-open").arg(&path).spawn() {
                    log::error!("Failed to open {}: {}", path.display(), e);
                    self.state.alert = Some(Alert::error(format!(
                        "Settings live in {}",
                        path.display()
                    )));
                }
            }
            Err(e) => {
                log::error!("Failed to write default config: {}", e);
                self.state.alert = Some(Alert::error(format!(
                    "Could not create settings file: {e}"
                )));
            }
        }
    }

    fn reload_config(&mut self) {
        match config::load_config() {
            Ok(new_config) => {
                if let Err(e) = self
                    .commands
                    .try_send(WorkerCommand::Reconfigure(Box::new(new_config.clone())))
                {
                    log::error!("Failed to forward configuration: {}", e);
                }
                self.config = new_config;
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Failed to reload config: {}", e),
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        Config,
        async_channel::Sender<WorkerCommand>,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Lunchwheel"),
            set_default_size: (1000, 640),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gdk4::Key::Escape {
                        sender.input(AppMsg::CloseResult);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Overlay {
                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 8,
                    set_margin_all: 12,

                    gtk::Revealer {
                        #[watch]
                        set_reveal_child: model.state.alert.is_some(),

                        #[wrap(Some)]
                        set_child = &gtk::Box {
                            set_spacing: 8,
                            #[watch]
                            set_css_classes: &model.state.alert_classes(),

                            gtk::Label {
                                set_hexpand: true,
                                set_wrap: true,
                                set_xalign: 0.0,
                                #[watch]
                                set_label: model.state.alert_text(),
                            },

                            gtk::Button {
                                set_icon_name: "window-close-symbolic",
                                add_css_class: "flat",
                                connect_clicked => AppMsg::DismissAlert,
                            },
                        },
                    },

                    gtk::Box {
                        set_spacing: 8,

                        gtk::Entry {
                            set_hexpand: true,
                            set_placeholder_text: Some("Keyword (e.g. sushi, italian) or leave blank"),
                            set_text: &model.state.keyword,
                            connect_changed[sender] => move |entry| {
                                sender.input(AppMsg::KeywordChanged(entry.text().to_string()));
                            },
                            connect_activate => AppMsg::Search,
                        },

                        gtk::Label {
                            set_label: "Radius",
                        },

                        gtk::Scale::with_range(
                            gtk::Orientation::Horizontal,
                            MIN_RADIUS as f64,
                            MAX_RADIUS as f64,
                            RADIUS_STEP,
                        ) {
                            set_width_request: 220,
                            set_draw_value: false,
                            set_value: model.state.radius as f64,
                            connect_value_changed[sender] => move |scale| {
                                sender.input(AppMsg::RadiusChanged(scale.value()));
                            },
                        },

                        gtk::Label {
                            set_width_chars: 7,
                            set_xalign: 1.0,
                            #[watch]
                            set_label: &format!("{} m", model.state.radius),
                        },

                        gtk::Button {
                            #[watch]
                            set_label: if model.state.searching { "Searching…" } else { "Search" },
                            add_css_class: "suggested-action",
                            #[watch]
                            set_sensitive: model.state.can_search(),
                            connect_clicked => AppMsg::Search,
                        },

                        gtk::Button {
                            set_icon_name: "emblem-system-symbolic",
                            set_tooltip_text: Some("Edit settings"),
                            connect_clicked => AppMsg::OpenSettings,
                        },
                    },

                    gtk::Paned {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_vexpand: true,
                        set_position: 440,

                        #[wrap(Some)]
                        set_start_child = &gtk::ScrolledWindow {
                            set_min_content_width: 320,
                            set_hscrollbar_policy: gtk::PolicyType::Never,

                            #[local_ref]
                            list_box -> gtk::ListBox {
                                set_selection_mode: gtk::SelectionMode::None,
                                #[watch]
                                set_sensitive: !model.state.spinning,
                            },
                        },

                        #[wrap(Some)]
                        set_end_child = &gtk::Box {
                            set_orientation: gtk::Orientation::Vertical,
                            set_spacing: 12,

                            #[local_ref]
                            drawing_area -> gtk::DrawingArea {
                                set_content_width: WHEEL_SIZE,
                                set_content_height: WHEEL_SIZE,
                                set_hexpand: true,
                                set_vexpand: true,
                            },

                            gtk::Button {
                                set_label: "Spin",
                                set_halign: gtk::Align::Center,
                                add_css_class: "pill",
                                add_css_class: "suggested-action",
                                #[watch]
                                set_sensitive: model.state.can_spin(),
                                connect_clicked => AppMsg::Spin,
                            },
                        },
                    },
                },

                add_overlay = &gtk::Box {
                    add_css_class: "result-backdrop",
                    set_hexpand: true,
                    set_vexpand: true,
                    #[watch]
                    set_visible: model.state.result.is_some(),

                    add_controller = gtk::GestureClick {
                        connect_released[sender] => move |gesture, _, x, y| {
                            let Some(backdrop) = gesture.widget() else {
                                return;
                            };
                            let on_backdrop = backdrop
                                .pick(x, y, gtk::PickFlags::DEFAULT)
                                .is_some_and(|hit| hit == backdrop);
                            if on_backdrop {
                                sender.input(AppMsg::CloseResult);
                            }
                        }
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_spacing: 12,
                        set_hexpand: true,
                        set_halign: gtk::Align::Center,
                        set_valign: gtk::Align::Center,
                        add_css_class: "result-card",

                        gtk::Button {
                            set_icon_name: "window-close-symbolic",
                            set_halign: gtk::Align::End,
                            add_css_class: "flat",
                            connect_clicked => AppMsg::CloseResult,
                        },

                        gtk::Label {
                            add_css_class: "title-2",
                            set_wrap: true,
                            #[watch]
                            set_label: &model.state.result_text(),
                        },

                        gtk::LinkButton {
                            set_label: "Get directions",
                            #[watch]
                            set_visible: model.state.result.as_ref().is_some_and(|r| r.directions.is_some()),
                            #[watch]
                            set_uri: model.state.directions_uri(),
                        },
                    },
                },
            },
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, commands, rx) = init;

        theme::load_css();

        let list_box = gtk::ListBox::new();
        list_box.set_placeholder(Some(&gtk::Label::new(Some(list::PLACEHOLDER))));
        let drawing_area = gtk::DrawingArea::new();

        let model = AppModel {
            state: AppState::new(
                config.search.default_keyword.clone(),
                config.search.default_radius,
            ),
            wheel: Rc::new(RefCell::new(WheelState::default())),
            config,
            commands,
            list_box: list_box.clone(),
            drawing_area: drawing_area.clone(),
        };

        let list_box = &model.list_box;
        let drawing_area = &model.drawing_area;
        let widgets = view_output!();

        let wheel_draw = model.wheel.clone();
        model
            .drawing_area
            .set_draw_func(move |area, cr, width, height| {
                let colors = ThemeColors::from_context(&area.style_context());
                if let Err(e) = wheel::draw(
                    cr,
                    &wheel_draw.borrow(),
                    &colors,
                    width as f64,
                    height as f64,
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::KeywordChanged(keyword) => self.state.keyword = keyword,
            AppMsg::RadiusChanged(value) => self.state.set_radius(value),
            AppMsg::Search => self.start_search(&sender),
            AppMsg::SearchFinished(outcome) => {
                let redraw = self.state.finish_search(outcome);
                self.refresh(redraw, &sender);
            }
            AppMsg::SearchFailed(failure) => {
                let redraw = self.state.fail_search(failure);
                self.refresh(redraw, &sender);
            }
            AppMsg::Toggle(id, checked) => {
                let redraw = self.state.toggle(id, checked);
                self.refresh(redraw, &sender);
            }
            AppMsg::Spin => self.spin(&sender),
            AppMsg::SpinFinished => self.finish_spin(),
            AppMsg::CloseResult => self.state.result = None,
            AppMsg::DismissAlert => self.state.alert = None,
            AppMsg::OpenSettings => self.open_settings(),
            AppMsg::ConfigReload => self.reload_config(),
        }
    }
}
