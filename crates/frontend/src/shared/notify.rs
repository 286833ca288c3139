use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const AUTO_DISMISS_MS: u32 = 6_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
}

/// Toast queue provided through context. API-client errors land here:
/// errors surface inline and as toasts, nothing is ever fatal in the
/// browser.
#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    pub fn toasts(&self) -> ReadSignal<Vec<Toast>> {
        self.toasts.read_only()
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(ToastKind::Error, text.into());
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(ToastKind::Info, text.into());
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    fn push(&self, kind: ToastKind, text: String) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.toasts.update(|toasts| toasts.push(Toast { id, kind, text }));

        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(AUTO_DISMISS_MS).await;
            this.dismiss(id);
        });
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toasts() -> ToastService {
    use_context::<ToastService>().expect("ToastService context not found")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let service = use_toasts();
    let toasts = service.toasts();

    view! {
        <div class="toast-host">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    let kind_class = match toast.kind {
                        ToastKind::Error => "toast toast--error",
                        ToastKind::Info => "toast toast--info",
                    };
                    view! {
                        <div class=kind_class on:click=move |_| service.dismiss(id)>
                            {toast.text.clone()}
                        </div>
                    }
                }
            />
        </div>
    }
}
