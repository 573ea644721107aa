use super::super::{Model, Msg};
use super::utils::{debounce, render_error_message};
use facemap_shared::RequestState;
use yew::prelude::*;

pub fn render_preview_area(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(url) = model.preview.get() else {
        return html! {};
    };

    let state = model.controller.state();
    let uploading = state.is_uploading();
    let failure = match &*state {
        RequestState::Failed(message) => Some(message.clone()),
        _ => None,
    };
    let file_name = model
        .file_name
        .clone()
        .unwrap_or_else(|| "Selected Image".to_string());

    let link = ctx.link().clone();

    html! {
        <div id="preview-container">
            <div class="preview-frame" title={file_name.clone()}>
                <img id="actual-image-preview" src={url.to_string()} alt={file_name} />
                <button
                    class="remove-btn"
                    title="Remove this image"
                    disabled={uploading}
                    onclick={debounce(300, move || link.send_message(Msg::ClearFile))}
                >
                    <i class="fa-solid fa-trash"></i>
                </button>
                if uploading {
                    <div class="loading-preview">
                        <i class="fa-solid fa-spinner fa-spin fa-2x"></i>
                        <p>{"Analyzing image..."}</p>
                    </div>
                }
            </div>
            if let Some(message) = failure {
                { render_error_message(&message, None) }
            }
        </div>
    }
}
