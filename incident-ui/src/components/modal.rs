use leptos::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Outcome notification shown after an action, dismissible by the user.
#[derive(Clone, Debug)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

#[component]
pub fn Modal(
    #[prop(into)] title: String,
    #[prop(into)] on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    view! {
      <div class="modal-backdrop">
        <div class="modal">
          <header class="modal-head">
            <h3>{title}</h3>
            <button class="modal-close" on:click=move |_| on_close.call(())>"×"</button>
          </header>
          <div class="modal-body">{children()}</div>
        </div>
      </div>
    }
}

#[component]
pub fn ConfirmDialog(
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
      <div class="modal-backdrop">
        <div class="modal modal-compact">
          <h3>{title}</h3>
          <p>{message}</p>
          <div class="modal-actions">
            <button class="button-secondary" on:click=move |_| on_cancel.call(())>"Cancelar"</button>
            <button class="button-primary" on:click=move |_| on_confirm.call(())>"Confirmar"</button>
          </div>
        </div>
      </div>
    }
}

#[component]
pub fn NoticeModal(notice: Notice, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let kind_class = match notice.kind {
        NoticeKind::Success => "modal modal-compact notice-success",
        NoticeKind::Error => "modal modal-compact notice-error",
    };
    view! {
      <div class="modal-backdrop">
        <div class=kind_class>
          <h3>{notice.title}</h3>
          <p>{notice.message}</p>
          <div class="modal-actions">
            <button class="button-primary" on:click=move |_| on_close.call(())>"Entendido"</button>
          </div>
        </div>
      </div>
    }
}
