use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::FileList;
use yew::prelude::*;

// Debounce function to limit button events
pub fn debounce<F>(duration: u32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));

    Callback::from(move |_| {
        let mut timeout_ref = timeout.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        *timeout_ref = Some(Timeout::new(duration, move || inner_callback()));
    })
}

/// Every file in the list. Type and size checks happen on submit so that a
/// rejected file gets a message instead of being silently skipped.
pub fn collect_files(file_list: &FileList) -> Vec<GlooFile> {
    (0..file_list.length())
        .filter_map(|i| file_list.item(i))
        .map(GlooFile::from)
        .collect()
}

pub fn render_error_message(message: &str, on_close: Option<Callback<MouseEvent>>) -> Html {
    html! {
        <div class="error-message" role="alert">
            <i class="fa-solid fa-circle-exclamation"></i>
            <p>{ message }</p>
            if let Some(on_close) = on_close {
                <button class="close-btn" title="Dismiss" onclick={on_close}>
                    <i class="fa-solid fa-times"></i>
                </button>
            }
        </div>
    }
}
