//! Login Page

use leptos::*;

use hbnb::controller::PageElements;

use crate::state::{page_controller, GlobalState, PageView};

#[component]
pub fn LoginPage() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let page = PageView::new();
    let controller = page_controller();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let ctl = controller.clone();
    create_effect(move |_| {
        let ctl = ctl.clone();
        let elements = PageElements {
            error_region: state.notice_region.get_untracked(),
            ..PageElements::login()
        };
        spawn_local(async move {
            let paints = ctl.load(elements, None).await;
            page.apply(&state, paints);
        });
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        state.clear_notices();
        set_submitting.set(true);

        let ctl = controller.clone();
        let email = email.get_untracked();
        let password = password.get_untracked();
        spawn_local(async move {
            let paints = ctl.login(&email, &password).await;
            page.apply(&state, paints);
            set_submitting.set(false);
        });
    };

    view! {
        <main>
            <form id="login-form" class="login-form" on:submit=on_submit>
                <label for="email">"Email"</label>
                <input
                    type="email"
                    id="email"
                    name="email"
                    required
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />

                <label for="password">"Password"</label>
                <input
                    type="password"
                    id="password"
                    name="password"
                    required
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />

                <button type="submit" class="login-button" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Logging in..." } else { "Login" }}
                </button>
            </form>
        </main>
    }
}
