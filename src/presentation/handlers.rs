// Page handlers - Run the store actions a page needs, then render it
use crate::domain::filter::{InsightQuery, PageQuery, SortOrder};
use crate::domain::upload::CsvUpload;
use crate::presentation::app_state::AppState;
use crate::presentation::router::{Page, Route};
use crate::presentation::views::{render_dashboard, render_home, render_sensor};
use std::path::Path;

/// Landing page
pub async fn home(state: &AppState) -> String {
    render_home(state.router.routes())
}

/// Upload a CSV when one is given (the store refetches afterwards),
/// otherwise load the filtered reading list.
pub async fn sensor(state: &AppState, upload: Option<&Path>) -> anyhow::Result<String> {
    match upload {
        Some(path) => {
            let file = CsvUpload::from_path(path).await?;
            state.store.upload_csv(file).await;
        }
        None => state.store.fetch_visualized_data(None).await,
    }
    Ok(render_sensor(&state.store.state()))
}

/// Summary, insight buckets, 7-day comparison, chart markers and the newest readings, loaded concurrently
pub async fn sensor_dashboard(state: &AppState) -> String {
    let store = &state.store;
    let latest = PageQuery {
        limit: Some(state.settings.page_size),
        order: Some(SortOrder::Desc),
        ..PageQuery::default()
    };

    futures::join!(
        store.fetch_summary(None),
        store.fetch_aggregated_insight(InsightQuery::new(state.settings.insight_window.clone())),
        store.fetch_7day_comparison(),
        store.fetch_chart_data(None),
        store.fetch_all_visualized_data(latest),
    );

    render_dashboard(&store.state())
}

pub async fn dispatch(state: &AppState, route: &Route, upload: Option<&Path>) -> anyhow::Result<String> {
    tracing::info!("Opening {} ({})", route.path, route.name);
    match route.page {
        Page::Home => Ok(home(state).await),
        Page::Sensor => sensor(state, upload).await,
        Page::SensorDashboard => Ok(sensor_dashboard(state).await),
    }
}
