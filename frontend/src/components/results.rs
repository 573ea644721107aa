use super::super::{Model, Msg};
use facemap_shared::render::{
    AttributeRow, ExpressionBar, ExpressionSummary, LandmarkSummary, Measurement, Mood, Report,
    Section,
};
use facemap_shared::{render, Presentation, RequestState, ResultTab};
use strum::IntoEnumIterator;
use yew::prelude::*;

pub fn render_results(model: &Model, ctx: &Context<Model>) -> Html {
    let state = model.controller.state();
    let RequestState::Succeeded(result) = &*state else {
        return html! {};
    };

    match render(result) {
        Presentation::ErrorPanel { title, message } => html! {
            <div class="results-container error-panel">
                <h2>{ title }</h2>
                <p>{ message }</p>
            </div>
        },
        Presentation::Report(report) => render_report(&report, model.active_tab, ctx),
    }
}

fn render_report(report: &Report, active_tab: ResultTab, ctx: &Context<Model>) -> Html {
    let content = match active_tab {
        ResultTab::Expressions => render_expressions(&report.summary, &report.expressions),
        ResultTab::Landmarks => render_landmarks(&report.landmarks),
        ResultTab::Measurements => render_measurements(&report.distances),
        ResultTab::Attributes => render_attributes(&report.attributes),
    };

    html! {
        <div class="results-container">
            <div class="result-header">
                <h2><i class="fa-solid fa-chart-line"></i>{" Analysis Results"}</h2>
            </div>
            <div class="result-tabs" role="tablist">
                { for ResultTab::iter().map(|tab| {
                    let selected = tab == active_tab;
                    html! {
                        <button
                            role="tab"
                            class={classes!("result-tab", selected.then_some("active"))}
                            aria-selected={selected.to_string()}
                            onclick={ctx.link().callback(move |_| Msg::SelectTab(tab))}
                        >
                            { tab.label() }
                        </button>
                    }
                })}
            </div>
            <div class="detailed-results">
                { content }
            </div>
        </div>
    }
}

fn render_no_data(text: &str) -> Html {
    html! { <p class="no-results-message">{ text }</p> }
}

fn render_expressions(summary: &ExpressionSummary, section: &Section<Vec<ExpressionBar>>) -> Html {
    let mood_icon = match summary.mood {
        Mood::Happy => "fa-face-smile",
        Mood::Sad => "fa-face-frown",
        Mood::Neutral => "fa-face-meh",
    };

    html! {
        <div class="expressions-tab">
            <div class="dominant-expression">
                <div class="face-avatar">
                    <i class="fa-solid fa-face-grin-wide"></i>
                    <span class="mood-badge" style={format!("color: {};", summary.mood.color())}>
                        <i class={classes!("fa-solid", mood_icon)}></i>
                    </span>
                </div>
                <h3>{ &summary.dominant }</h3>
                <p class="caption">{"Dominant expression"}</p>
            </div>
            <div class="expression-bars">
                <h3>{"Expression Intensity"}</h3>
                { match section {
                    Section::Data(bars) => html! {
                        <div class="result-bars">
                            { for bars.iter().map(render_expression_bar) }
                        </div>
                    },
                    Section::NoData(text) => render_no_data(text),
                }}
            </div>
        </div>
    }
}

fn render_expression_bar(bar: &ExpressionBar) -> Html {
    let width = bar.percent.clamp(0, 100);
    html! {
        <div class="result-item">
            <div class="result-label">{ &bar.label }</div>
            <div class="result-bar-container">
                <div
                    class="result-bar"
                    style={format!("width: {}%; background-color: {};", width, bar.color)}
                ></div>
            </div>
            <div class="result-value">{ format!("{}%", bar.percent) }</div>
        </div>
    }
}

fn render_landmarks(section: &Section<LandmarkSummary>) -> Html {
    match section {
        Section::Data(summary) => html! {
            <div class="landmarks-tab">
                <h3>{ format!("{} facial landmarks detected", summary.count) }</h3>
                <p class="caption">
                    {"Facial landmarks are three-dimensional (x, y, z) coordinates that map specific features of the face."}
                </p>
            </div>
        },
        Section::NoData(text) => render_no_data(text),
    }
}

fn render_measurements(section: &Section<Vec<Measurement>>) -> Html {
    match section {
        Section::Data(measurements) => html! {
            <div class="measurement-grid">
                { for measurements.iter().map(|m| html! {
                    <div class="measurement-card">
                        <p class="caption">{ &m.label }</p>
                        <p class="measurement-value">{ &m.value }</p>
                    </div>
                })}
            </div>
        },
        Section::NoData(text) => render_no_data(text),
    }
}

fn render_attributes(section: &Section<Vec<AttributeRow>>) -> Html {
    match section {
        Section::Data(rows) => html! {
            <ul class="attribute-list">
                { for rows.iter().map(|row| html! {
                    <li class="attribute-item">
                        <span
                            class="attribute-avatar"
                            style={format!("background-color: hsl({}, 70%, 60%);", row.hue)}
                        >
                            <i class="fa-solid fa-brain"></i>
                        </span>
                        <div>
                            <p class="attribute-label">{ &row.label }</p>
                            <p class="caption">{ &row.value }</p>
                        </div>
                    </li>
                })}
            </ul>
        },
        Section::NoData(text) => render_no_data(text),
    }
}
