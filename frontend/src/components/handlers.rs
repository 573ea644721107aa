use super::super::Msg;
use super::super::Model;
use super::utils::collect_files;
use crate::api::BrowserImage;
use facemap_shared::session::NOTIFICATION_DURATION_MS;
use facemap_shared::upload::select_single;
use facemap_shared::{ResultTab, Ticket};
use gloo_file::{File as GlooFile, ObjectUrl};
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::DragEvent;
use yew::prelude::*;

pub fn handle_files_chosen(model: &mut Model, ctx: &Context<Model>, files: Vec<GlooFile>) -> bool {
    let file = match select_single(files) {
        Ok(file) => file,
        Err(e) => {
            model.rejection = Some(e.to_string());
            return true;
        }
    };

    let pending = match model.controller.submit(BrowserImage::from(file.clone())) {
        Ok(pending) => pending,
        Err(e) => {
            model.rejection = Some(e.to_string());
            return true;
        }
    };

    model.rejection = None;
    model.file_name = Some(file.name());
    model.preview.replace(ObjectUrl::from(file));
    model.active_tab = ResultTab::default();
    model.notification_timeout = None;

    let link = ctx.link().clone();
    spawn_local(async move {
        pending.await;
        link.send_message(Msg::AnalysisSettled);
    });

    true
}

pub fn handle_analysis_settled(model: &mut Model, ctx: &Context<Model>) -> bool {
    let Some(notification) = model.controller.notification() else {
        return true;
    };

    let already_scheduled = matches!(
        &model.notification_timeout,
        Some((ticket, _)) if *ticket == notification.ticket
    );
    if !already_scheduled {
        let link = ctx.link().clone();
        let ticket = notification.ticket;
        let timeout = Timeout::new(NOTIFICATION_DURATION_MS, move || {
            link.send_message(Msg::DismissNotification(ticket));
        });
        model.notification_timeout = Some((ticket, timeout));
    }

    true
}

pub fn handle_dismiss_notification(model: &mut Model, ticket: Ticket) -> bool {
    if matches!(&model.notification_timeout, Some((scheduled, _)) if *scheduled == ticket) {
        model.notification_timeout = None;
    }
    model.controller.dismiss_notification(ticket)
}

pub fn handle_clear_file(model: &mut Model) -> bool {
    model.controller.reset();
    model.preview.clear();
    model.file_name = None;
    model.rejection = None;
    model.notification_timeout = None;
    model.active_tab = ResultTab::default();
    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            return handle_files_chosen(model, ctx, collect_files(&file_list));
        }
    }

    true
}
