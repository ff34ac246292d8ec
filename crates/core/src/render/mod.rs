pub mod chart;
pub mod format;
pub mod html;
pub mod resolve;
pub mod text;
pub mod view;

pub use chart::{build_chart, ChartStyle, LineChart, LineSeries};
pub use view::{render, DashboardSurface, DashboardView, Slot};
