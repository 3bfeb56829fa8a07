//! One row of the integrations table.

#[cfg(test)]
#[path = "integration_row_test.rs"]
mod integration_row_test;

use leptos::prelude::*;

use crate::net::types::{Integration, IntegrationStatus};
use crate::util::time::format_date;

pub(crate) fn status_badge_class(status: IntegrationStatus) -> &'static str {
    match status {
        IntegrationStatus::Connected => "badge badge--connected",
        IntegrationStatus::Pending => "badge badge--pending",
        IntegrationStatus::Error => "badge badge--error",
    }
}

pub(crate) fn last_sync_label(last_sync: Option<i64>) -> String {
    last_sync.map_or_else(|| "Never synced".to_owned(), |ms| format!("Last sync {}", format_date(ms)))
}

/// One integration with its status and the sync/disconnect actions.
#[component]
pub fn IntegrationRow(
    integration: Integration,
    on_sync: Callback<()>,
    on_disconnect: Callback<()>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    let status = integration.status;
    view! {
        <li class="integration-row">
            <span class="integration-row__provider">{integration.provider.label()}</span>
            <span class=status_badge_class(status)>{status.as_str()}</span>
            <span class="integration-row__sync">{last_sync_label(integration.last_sync)}</span>
            <span class="integration-row__actions">
                <button class="btn" disabled=move || disabled.get() on:click=move |_| on_sync.run(())>
                    "Sync now"
                </button>
                <button class="btn btn--danger" disabled=move || disabled.get() on:click=move |_| on_disconnect.run(())>
                    "Disconnect"
                </button>
            </span>
        </li>
    }
}
