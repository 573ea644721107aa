use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-face-smile"></i> {" Facial Mapping"}</h1>
            <p class="subtitle">
                {"Upload an image to detect facial expressions and analyze the face's landmarks"}
            </p>
        </header>
    }
}
