//! Logs every distinct button view published by the controller

use tokio::sync::watch;
use tracing::{debug, info};

use crate::button::ButtonView;

/// Background task that follows the published button view until the
/// controller goes away
pub async fn button_view_logger_task(mut view_rx: watch::Receiver<ButtonView>) {
    let mut last_text = String::new();

    while view_rx.changed().await.is_ok() {
        let view = view_rx.borrow_and_update().clone();
        if view.text == last_text {
            continue;
        }

        info!("Button: {} [{:?}]", view.text, view.category);
        if let Some(tooltip) = &view.tooltip {
            debug!("Button tooltip override: {}", tooltip);
        }
        last_text = view.text;
    }

    debug!("Button view channel closed, stopping logger");
}
