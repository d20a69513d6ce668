pub mod dashboard_presenter;

pub use dashboard_presenter::{DashboardPresenter, DashboardPresenterImpl};
