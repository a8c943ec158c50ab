// Application state shared by the page handlers
use crate::application::sensor_store::SensorStore;
use crate::infrastructure::config::DashboardSettings;
use crate::presentation::router::Router;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SensorStore>,
    pub router: Router,
    pub settings: DashboardSettings,
}
