use super::super::{Model, Msg};
use yew::prelude::*;

/// Transient toast for the outcome of the latest upload. Auto-hidden by the
/// timer scheduled in `handle_analysis_settled`.
pub fn render_notification(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(notification) = model.controller.notification() else {
        return html! {};
    };

    let ticket = notification.ticket;
    html! {
        <div
            class={classes!("notification", format!("notification-{}", notification.kind.as_ref()))}
            role="status"
        >
            <div class="notification-body">
                <strong>{ notification.title }</strong>
                <p>{ notification.message }</p>
            </div>
            <button
                class="close-btn"
                title="Close"
                onclick={ctx.link().callback(move |_| Msg::DismissNotification(ticket))}
            >
                <i class="fa-solid fa-times"></i>
            </button>
        </div>
    }
}
