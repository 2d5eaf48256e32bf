//! Page components. Each page talks to the backend through the context's
//! API handles and renders errors with their user-facing message.

use leptos::*;
use leptos_router::*;

use protrack_auth::{Capability, Credentials, SessionState, User};
use protrack_client::{ApiError, AuthError};
use protrack_core::{NewProject, Project, ProjectId, ProjectStage};

use crate::context::AppContext;
use crate::frontend::app::SessionSignal;

fn can(state: RwSignal<SessionState>, capability: Capability) -> impl Fn() -> bool + Copy {
    move || state.with(|s| s.has_any_role(&capability.roles()))
}

fn error_banner(message: RwSignal<Option<String>>) -> impl IntoView {
    move || message.get().map(|m| view! { <p class="error">{m}</p> })
}

// ─────────────────────────────────────────────────────────────────────────────
// Login
// ─────────────────────────────────────────────────────────────────────────────

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let SessionSignal(state) = expect_context::<SessionSignal>();
    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let message = create_rw_signal(None::<String>);
    let in_flight = create_rw_signal(false);

    // Leaving the page abandons a login that has not answered yet.
    let session = ctx.session.clone();
    on_cleanup(move || session.cancel_pending());

    let navigate = use_navigate();
    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if in_flight.get_untracked() {
            return;
        }
        in_flight.set(true);
        message.set(None);

        let session = ctx.session.clone();
        let navigate = navigate.clone();
        let credentials = Credentials::new(username.get_untracked(), password.get_untracked());
        spawn_local(async move {
            match session.login(credentials).await {
                Ok(_) => navigate("/", Default::default()),
                Err(AuthError::Superseded) => {}
                Err(e) => message.set(Some(e.user_message())),
            }
            in_flight.set(false);
        });
    };

    view! {
        <Show
            when=move || !state.with(SessionState::is_authenticated)
            fallback=|| view! { <Redirect path="/"/> }
        >
            <div class="login">
                <h2>"Sign in"</h2>
                <form on:submit=submit.clone()>
                    <div class="form-group">
                        <label for="username">"Username"</label>
                        <input
                            id="username"
                            type="text"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            id="password"
                            type="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </div>
                    {error_banner(message)}
                    <button type="submit" disabled=move || in_flight.get()>
                        {move || if in_flight.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </Show>
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dashboard
// ─────────────────────────────────────────────────────────────────────────────

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let SessionSignal(state) = expect_context::<SessionSignal>();
    let projects = ctx.projects.clone();
    let list = create_local_resource(|| (), move |_| {
        let projects = projects.clone();
        async move { projects.list().await }
    });

    view! {
        <div class="dashboard">
            <h2>
                "Welcome, "
                {move || state.with(|s| s.current_user().map(|u| u.display_name().to_string()))}
            </h2>
            {move || list.get().map(|result| match result {
                Ok(items) => view! {
                    <table class="stage-summary">
                        <thead>
                            <tr><th>"Stage"</th><th>"Projects"</th></tr>
                        </thead>
                        <tbody>
                            {ProjectStage::ALL.into_iter().map(|stage| {
                                let count = items.iter().filter(|p| p.stage == stage).count();
                                view! { <tr><td>{stage.as_str()}</td><td>{count}</td></tr> }
                            }).collect_view()}
                        </tbody>
                    </table>
                }.into_view(),
                Err(e) => view! { <p class="error">{e.user_message()}</p> }.into_view(),
            })}
        </div>
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Projects
// ─────────────────────────────────────────────────────────────────────────────

fn project_rows(items: &[Project]) -> View {
    if items.is_empty() {
        return view! { <p>"No projects yet."</p> }.into_view();
    }
    view! {
        <table>
            <thead>
                <tr>
                    <th>"Name"</th>
                    <th>"Client"</th>
                    <th>"Stage"</th>
                    <th>"Owner"</th>
                </tr>
            </thead>
            <tbody>
                {items.iter().map(|p| view! {
                    <tr>
                        <td><A href=format!("/projects/{}", p.id)>{p.name.clone()}</A></td>
                        <td>{p.client.clone()}</td>
                        <td>{p.stage.as_str()}</td>
                        <td>{p.owner.clone().unwrap_or_default()}</td>
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
    }
    .into_view()
}

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let SessionSignal(state) = expect_context::<SessionSignal>();
    let projects = ctx.projects.clone();
    let list = create_local_resource(|| (), move |_| {
        let projects = projects.clone();
        async move { projects.list().await }
    });

    view! {
        <div class="projects">
            <h2>"Projects"</h2>
            <Show when=can(state, Capability::Sales)>
                <A href="/projects/new">"New project"</A>
            </Show>
            {move || list.get().map(|result| match result {
                Ok(items) => project_rows(&items),
                Err(e) => view! { <p class="error">{e.user_message()}</p> }.into_view(),
            })}
        </div>
    }
}

#[component]
pub fn NewProjectPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let name = create_rw_signal(String::new());
    let client = create_rw_signal(String::new());
    let owner = create_rw_signal(String::new());
    let message = create_rw_signal(None::<String>);
    let in_flight = create_rw_signal(false);
    let navigate = use_navigate();

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if in_flight.get_untracked() {
            return;
        }
        in_flight.set(true);
        message.set(None);

        let form = NewProject {
            name: name.get_untracked(),
            client: client.get_untracked(),
            owner: Some(owner.get_untracked()),
        };
        let projects = ctx.projects.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match projects.create(form).await {
                Ok(project) => navigate(&format!("/projects/{}", project.id), Default::default()),
                Err(e) => message.set(Some(e.user_message())),
            }
            in_flight.set(false);
        });
    };

    view! {
        <div class="new-project">
            <h2>"New project"</h2>
            <form on:submit=submit>
                <div class="form-group">
                    <label for="name">"Name"</label>
                    <input id="name" type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))/>
                </div>
                <div class="form-group">
                    <label for="client">"Client"</label>
                    <input id="client" type="text"
                        prop:value=move || client.get()
                        on:input=move |ev| client.set(event_target_value(&ev))/>
                </div>
                <div class="form-group">
                    <label for="owner">"Owner (optional)"</label>
                    <input id="owner" type="text"
                        prop:value=move || owner.get()
                        on:input=move |ev| owner.set(event_target_value(&ev))/>
                </div>
                {error_banner(message)}
                <div class="form-actions">
                    <button type="submit" disabled=move || in_flight.get()>
                        {move || if in_flight.get() { "Saving..." } else { "Create" }}
                    </button>
                    <A href="/projects">"Cancel"</A>
                </div>
            </form>
        </div>
    }
}

#[component]
pub fn ProjectDetailPage(id: String) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let SessionSignal(state) = expect_context::<SessionSignal>();
    let current = create_rw_signal(None::<Result<Project, ApiError>>);
    let selected = create_rw_signal(None::<ProjectStage>);
    let message = create_rw_signal(None::<String>);
    let in_flight = create_rw_signal(false);

    match id.parse::<ProjectId>() {
        Ok(project_id) => {
            let projects = ctx.projects.clone();
            spawn_local(async move {
                let result = projects.get(project_id).await;
                current.set(Some(result));
            });
        }
        Err(e) => current.set(Some(Err(ApiError::Domain(e)))),
    }

    let projects = ctx.projects.clone();
    let advance = move |_: ev::MouseEvent| {
        let Some(Ok(project)) = current.get_untracked() else {
            return;
        };
        let Some(target) = selected.get_untracked().or_else(|| project.stage.next()) else {
            return;
        };
        if in_flight.get_untracked() {
            return;
        }
        in_flight.set(true);
        message.set(None);

        let projects = projects.clone();
        spawn_local(async move {
            match projects.advance_stage(&project, target).await {
                Ok(updated) => {
                    selected.set(None);
                    current.set(Some(Ok(updated)));
                }
                Err(e) => message.set(Some(e.user_message())),
            }
            in_flight.set(false);
        });
    };

    let picker = move |project: &Project| {
        let options = project.stage.advance_options();
        if options.is_empty() {
            return view! { <p class="stage-final">"This project is closed."</p> }.into_view();
        }
        let advance = advance.clone();
        view! {
            <Show when=can(state, Capability::StageAdvancement)>
                <div class="stage-picker">
                    <select on:change=move |ev| {
                        let value = event_target_value(&ev);
                        selected.set(ProjectStage::ALL.into_iter().find(|s| s.as_str() == value));
                    }>
                        {options.iter().map(|s| view! {
                            <option value=s.as_str()>{s.as_str()}</option>
                        }).collect_view()}
                    </select>
                    <button on:click=advance.clone() disabled=move || in_flight.get()>
                        {move || if in_flight.get() { "Saving..." } else { "Advance" }}
                    </button>
                </div>
            </Show>
        }
        .into_view()
    };

    view! {
        <div class="project-detail">
            {move || match current.get() {
                None => view! { <div class="loading">"Loading…"</div> }.into_view(),
                Some(Err(e)) => view! { <p class="error">{e.user_message()}</p> }.into_view(),
                Some(Ok(project)) => view! {
                    <h2>{project.name.clone()}</h2>
                    <dl>
                        <dt>"Client"</dt><dd>{project.client.clone()}</dd>
                        <dt>"Owner"</dt><dd>{project.owner.clone().unwrap_or_default()}</dd>
                        <dt>"Created"</dt><dd>{project.created_at.format("%Y-%m-%d").to_string()}</dd>
                    </dl>
                    <ol class="stages">
                        {ProjectStage::ALL.into_iter().map(|s| {
                            let class = if s < project.stage {
                                "done"
                            } else if s == project.stage {
                                "current"
                            } else {
                                "pending"
                            };
                            view! { <li class=class>{s.as_str()}</li> }
                        }).collect_view()}
                    </ol>
                    {picker(&project)}
                }.into_view(),
            }}
            {error_banner(message)}
            <A href="/projects">"Back to projects"</A>
        </div>
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Administration / finance
// ─────────────────────────────────────────────────────────────────────────────

#[component]
pub fn UsersPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let api = ctx.api.clone();
    let users = create_local_resource(|| (), move |_| {
        let api = api.clone();
        async move { api.get::<Vec<User>>("/users").await }
    });

    view! {
        <div class="users">
            <h2>"Users"</h2>
            {move || users.get().map(|result| match result {
                Ok(items) => view! {
                    <table>
                        <thead>
                            <tr><th>"Username"</th><th>"Name"</th><th>"Role"</th><th>"Email"</th></tr>
                        </thead>
                        <tbody>
                            {items.into_iter().map(|u| view! {
                                <tr>
                                    <td>{u.username.clone()}</td>
                                    <td>{u.display_name().to_string()}</td>
                                    <td>{u.role.to_string()}</td>
                                    <td>{u.email.clone().unwrap_or_default()}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                }.into_view(),
                Err(e) => view! { <p class="error">{e.user_message()}</p> }.into_view(),
            })}
        </div>
    }
}

#[component]
pub fn FinancePage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let projects = ctx.projects.clone();
    let list = create_local_resource(|| (), move |_| {
        let projects = projects.clone();
        async move { projects.list().await }
    });

    view! {
        <div class="finance">
            <h2>"Invoiced projects"</h2>
            {move || list.get().map(|result| match result {
                Ok(items) => {
                    let billed: Vec<Project> = items
                        .into_iter()
                        .filter(|p| p.stage >= ProjectStage::Invoiced)
                        .collect();
                    project_rows(&billed)
                }
                Err(e) => view! { <p class="error">{e.user_message()}</p> }.into_view(),
            })}
        </div>
    }
}
