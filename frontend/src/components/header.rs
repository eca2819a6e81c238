use crate::Route;
use yew::prelude::*;
use yew_router::prelude::*;

/// Renders the navigation bar shared by both screens
pub fn render_navbar() -> Html {
    html! {
        <nav class="navbar navbar-expand-lg navbar-dark bg-success shadow-sm">
            <div class="container-fluid">
                <Link<Route> classes={classes!("navbar-brand")} to={Route::Upload}>
                    {"🍃 Potato Leaf Disease Detector"}
                </Link<Route>>
                <ul class="navbar-nav ms-auto">
                    <li class="nav-item">
                        <Link<Route> classes={classes!("nav-link")} to={Route::Upload}>{"Home"}</Link<Route>>
                    </li>
                    <li class="nav-item">
                        <Link<Route> classes={classes!("nav-link")} to={Route::Chat}>{"Chat"}</Link<Route>>
                    </li>
                </ul>
            </div>
        </nav>
    }
}

pub fn render_footer() -> Html {
    html! {
        <footer class="app-footer bg-success text-white text-center py-3 mt-auto">
            <p class="mb-0 fw-semibold">{"© 2025 Potato Leaf Disease Detection. All Rights Reserved."}</p>
        </footer>
    }
}
