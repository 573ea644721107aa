use super::super::Model;
use super::super::Msg;
use super::preview_area::render_preview_area;
use super::utils::{collect_files, debounce, render_error_message};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    let rejection = model.rejection.as_deref().map(|message| {
        render_error_message(
            message,
            Some(ctx.link().callback(|_| Msg::SetRejection(None))),
        )
    });

    html! {
        <div class="upload-section">
            if model.preview.is_empty() {
                { render_file_input_area(model, ctx) }
            } else {
                { render_preview_area(model, ctx) }
            }
            { for rejection }
        </div>
    }
}

fn render_file_input_area(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let handle_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let files = input.files().as_ref().map(collect_files).unwrap_or_default();

        input.set_value("");

        Msg::FilesChosen(files)
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);
    let trigger_file_input = Callback::from(|_| {
        let input = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("file-input"));
        if let Some(input) = input {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    html! {
        <>
            <input
                type="file"
                id="file-input"
                accept="image/jpeg,image/png"
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>
                        { if model.is_dragging { "Drop the image here" } else { "Drag & drop an image here" } }
                    </p>
                    <p class="upload-or">{"or"}</p>
                    <button
                        id="upload-button"
                        class="analyze-btn"
                        onclick={debounce(300, {
                            let trigger_file_input = trigger_file_input.clone();
                            move || trigger_file_input.emit(())
                        })}
                    >
                        <i class="fa-solid fa-camera"></i> {" Select Image"}
                    </button>
                    <p class="file-types">{"Supported formats: JPG, JPEG, PNG (max 5MB)"}</p>
                </div>
            </div>
        </>
    }
}
