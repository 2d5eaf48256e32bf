//! Leptos application shell: session wiring, guard, menu and routing.

use std::collections::BTreeMap;

use ::tracing::warn;
use leptos::*;
use leptos_router::*;

use protrack_auth::{GuardDecision, RouteRequirement, SessionState, build_menu, guard};

use crate::context::AppContext;
use crate::frontend::views::{
    DashboardPage, FinancePage, LoginPage, NewProjectPage, ProjectDetailPage, ProjectsPage,
    UsersPage,
};
use crate::pages::Page;

/// Reactive mirror of the session provider's state.
#[derive(Clone, Copy)]
pub struct SessionSignal(pub RwSignal<SessionState>);

/// Main application component.
#[component]
pub fn App(ctx: AppContext) -> impl IntoView {
    let state = create_rw_signal(ctx.session.state());
    provide_context(ctx.clone());
    provide_context(SessionSignal(state));

    // Mirror every provider transition into the signal.
    let mut rx = ctx.session.subscribe();
    spawn_local(async move {
        while rx.changed().await.is_ok() {
            let next = rx.borrow_and_update().clone();
            state.set(next);
        }
    });

    let session = ctx.session.clone();
    spawn_local(async move {
        if let Err(e) = session.restore().await {
            warn!(error = %e, "initial session check failed");
        }
    });

    view! {
        <Router>
            <div class="app">
                <Header/>
                <main>
                    <Routes>
                        <Route path="/*any" view=Shell/>
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

#[component]
fn Header() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let SessionSignal(state) = expect_context::<SessionSignal>();

    let logout = move |_| {
        let session = ctx.session.clone();
        spawn_local(async move {
            // Local state is already cleared when this fails; the guard redirects.
            if let Err(e) = session.logout().await {
                warn!(error = %e, "logout did not reach the backend");
            }
        });
    };

    view! {
        <header>
            <h1>"ProTrack"</h1>
            <Show when=move || state.with(SessionState::is_authenticated)>
                <NavMenu/>
                <div class="user">
                    <span class="user-name">
                        {move || state.with(|s| s.current_user().map(|u| u.display_name().to_string()))}
                    </span>
                    <span class="user-role">
                        {move || state.with(|s| s.current_user().map(|u| u.role.to_string()))}
                    </span>
                    <button class="logout" on:click=logout.clone()>"Log out"</button>
                </div>
            </Show>
        </header>
    }
}

/// Navigation menu filtered by the current session.
#[component]
pub fn NavMenu() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let SessionSignal(state) = expect_context::<SessionSignal>();
    let entries = ctx.menu.clone();

    view! {
        <nav class="menu">
            <ul>
                {move || state.with(|s| {
                    build_menu(&entries, s)
                        .into_iter()
                        .map(|entry| {
                            let icon = format!("icon icon-{}", entry.icon);
                            view! {
                                <li>
                                    <A href=entry.path.clone()>
                                        <span class=icon></span>
                                        {entry.label.clone()}
                                    </A>
                                </li>
                            }
                        })
                        .collect_view()
                })}
            </ul>
        </nav>
    }
}

/// Route guard around a routable view.
#[component]
pub fn Guarded(requirement: RouteRequirement, children: ChildrenFn) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let SessionSignal(state) = expect_context::<SessionSignal>();
    let login_path = ctx.routes.login_path().to_string();

    move || {
        let explanation = state.with(|s| guard::explain(s, &requirement));
        match explanation.decision {
            GuardDecision::Loading => view! { <LoadingView/> }.into_view(),
            GuardDecision::RedirectToLogin => view! { <Redirect path=login_path.clone()/> }.into_view(),
            GuardDecision::AccessDenied => {
                view! { <AccessDeniedView reason=explanation.reason/> }.into_view()
            }
            GuardDecision::Render => children().into_view(),
        }
    }
}

/// Matches the current location against the route table.
#[component]
fn Shell() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let location = use_location();
    let routes = ctx.routes.clone();

    move || {
        let path = location.pathname.get();
        let Some(matched) = routes.match_path(&path) else {
            return view! { <NotFoundView/> }.into_view();
        };

        let page = matched.route.page;
        let params = matched.params.clone();
        if !matched.route.guarded {
            return render_page(page, &params);
        }

        view! {
            <Guarded requirement=matched.route.requirement.clone()>
                {render_page(page, &params)}
            </Guarded>
        }
        .into_view()
    }
}

fn render_page(page: Page, params: &BTreeMap<String, String>) -> View {
    match page {
        Page::Login => view! { <LoginPage/> }.into_view(),
        Page::Dashboard => view! { <DashboardPage/> }.into_view(),
        Page::Projects => view! { <ProjectsPage/> }.into_view(),
        Page::NewProject => view! { <NewProjectPage/> }.into_view(),
        Page::ProjectDetail => {
            let id = params.get("id").cloned().unwrap_or_default();
            view! { <ProjectDetailPage id=id/> }.into_view()
        }
        Page::Users => view! { <UsersPage/> }.into_view(),
        Page::Finance => view! { <FinancePage/> }.into_view(),
    }
}

#[component]
fn LoadingView() -> impl IntoView {
    view! { <div class="loading">"Loading…"</div> }
}

#[component]
fn AccessDeniedView(reason: String) -> impl IntoView {
    view! {
        <div class="access-denied">
            <h2>"Access denied"</h2>
            <p>"You do not have permission to view this page."</p>
            <p class="detail">{reason}</p>
            <A href="/">"Back to dashboard"</A>
        </div>
    }
}

#[component]
fn NotFoundView() -> impl IntoView {
    view! {
        <div class="not-found">
            <h2>"Page not found"</h2>
            <A href="/">"Back to dashboard"</A>
        </div>
    }
}
