mod api;
mod components;
mod config;
mod export;

use components::chat_screen::ChatScreen;
use components::header::{render_footer, render_navbar};
use components::upload_screen::UploadScreen;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Upload,
    #[at("/chat")]
    Chat,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Upload => html! { <UploadScreen /> },
        Route::Chat => html! { <ChatScreen /> },
        Route::NotFound => render_not_found(),
    }
}

fn render_not_found() -> Html {
    html! {
        <div class="d-flex flex-column min-vh-100">
            { render_navbar() }
            <main class="container mt-5 flex-grow-1 text-center">
                <h2>{"Page not found"}</h2>
                <Link<Route> classes={classes!("btn", "btn-success", "mt-3")} to={Route::Upload}>
                    {"Back to Home"}
                </Link<Route>>
            </main>
            { render_footer() }
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::new(config::log_level()));
    log::info!("App starting...");
    log::info!("Classifier at {}, chat at {}", config::predict_url(), config::chat_url());
    yew::Renderer::<App>::new().render();
}
