mod api;
mod components;

use api::GlooTransport;
use components::handlers;
use components::header::render_header;
use components::notification::render_notification;
use components::results::render_results;
use components::upload_section::render_upload_section;
use facemap_shared::{ApiConfig, PreviewSlot, ResultTab, Ticket, UploadController};
use gloo_file::{File as GlooFile, ObjectUrl};
use gloo_timers::callback::Timeout;
use js_sys::Date;
use web_sys::DragEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
struct AppProps {
    config: ApiConfig,
}

// Yew msg components
enum Msg {
    // File operations
    FilesChosen(Vec<GlooFile>),
    ClearFile,

    // Analysis operations
    AnalysisSettled,
    DismissNotification(Ticket),

    // UI states
    SetRejection(Option<String>),
    SetDragging(bool),
    SelectTab(ResultTab),

    // Input events
    HandleDrop(DragEvent),
}

// Main component
struct Model {
    controller: UploadController<GlooTransport>,
    preview: PreviewSlot<ObjectUrl>,
    file_name: Option<String>,
    rejection: Option<String>,
    is_dragging: bool,
    active_tab: ResultTab,
    notification_timeout: Option<(Ticket, Timeout)>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            controller: UploadController::new(GlooTransport, ctx.props().config.clone()),
            preview: PreviewSlot::new(),
            file_name: None,
            rejection: None,
            is_dragging: false,
            active_tab: ResultTab::default(),
            notification_timeout: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // File operations
            Msg::FilesChosen(files) => handlers::handle_files_chosen(self, ctx, files),
            Msg::ClearFile => handlers::handle_clear_file(self),

            // Analysis operations
            Msg::AnalysisSettled => handlers::handle_analysis_settled(self, ctx),
            Msg::DismissNotification(ticket) => handlers::handle_dismiss_notification(self, ticket),

            // UI states
            Msg::SetRejection(rejection) => {
                self.rejection = rejection;
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::SelectTab(tab) => {
                let changed = self.active_tab != tab;
                self.active_tab = tab;
                changed
            }

            // Input events
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }

                <main class="main-content">
                { render_upload_section(self, ctx) }
                { render_results(self, ctx) }
                </main>

                { render_notification(self, ctx) }

                <footer class="app-footer">
                    <p>{ format!("Facial Mapping © {}", Date::new_0().get_full_year()) }</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");

    let config = api::load_config();
    yew::Renderer::<Model>::with_props(AppProps { config }).render();
}
