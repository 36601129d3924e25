// Application state for HTTP handlers
use crate::application::augment_service::AugmentService;
use crate::domain::chart::ChartState;
use crate::domain::series::Series;
use tokio::sync::Mutex;

pub struct AppState {
    pub augment_service: AugmentService,
    /// Series the augmentations are computed from.
    pub base: Series<String>,
    /// Locked only while a fetched fragment is merged, never across a remote call.
    pub chart: Mutex<ChartState<String>>,
}

impl AppState {
    pub fn new(augment_service: AugmentService, base: Series<String>) -> Self {
        let chart = Mutex::new(ChartState::new(base.clone()));
        Self {
            augment_service,
            base,
            chart,
        }
    }
}
