// ── Analytics report slice ──
//
// Reports don't fit the generic collection shape: three independent
// sections (summary, popular services, top clients) load separately
// for a chosen year/month, so this slice carries its own state struct
// and watch channel instead of wrapping `Slice<T>`.

use std::sync::Arc;

use glowdesk_api::ApiClient;
use tokio::sync::watch;

use crate::model::{ClientReport, ServiceReport, SummaryReport};

/// Observable report state. Each section has its own loading flag; a
/// failure in one section leaves the others untouched.
#[derive(Debug, Clone, Default)]
pub struct ReportsState {
    pub summary: Option<SummaryReport>,
    pub popular_services: Vec<ServiceReport>,
    pub top_clients: Vec<ClientReport>,
    pub loading_summary: bool,
    pub loading_services: bool,
    pub loading_clients: bool,
    pub error: Option<String>,
}

pub struct ReportSlice {
    api: Arc<ApiClient>,
    state: watch::Sender<ReportsState>,
}

impl ReportSlice {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        let (state, _) = watch::channel(ReportsState::default());
        Self { api, state }
    }

    fn period_params(year: i32, month: u32) -> [(&'static str, String); 2] {
        [("year", year.to_string()), ("month", month.to_string())]
    }

    /// Load the headline numbers for the given period. `month` is
    /// 1-based (January = 1).
    pub async fn fetch_summary(&self, year: i32, month: u32) {
        self.state.send_modify(|s| {
            s.loading_summary = true;
            s.error = None;
        });
        let params = Self::period_params(year, month);
        match self
            .api
            .get_with_params::<SummaryReport>("admin/reports/summary", &params)
            .await
        {
            Ok(summary) => self.state.send_modify(|s| {
                s.summary = Some(summary);
                s.loading_summary = false;
            }),
            Err(e) => self.state.send_modify(|s| {
                s.loading_summary = false;
                s.error = Some(e.to_string());
            }),
        }
    }

    pub async fn fetch_popular_services(&self, year: i32, month: u32) {
        self.state.send_modify(|s| {
            s.loading_services = true;
            s.error = None;
        });
        let params = Self::period_params(year, month);
        match self
            .api
            .get_with_params::<Vec<ServiceReport>>("admin/reports/popular-services", &params)
            .await
        {
            Ok(services) => self.state.send_modify(|s| {
                s.popular_services = services;
                s.loading_services = false;
            }),
            Err(e) => self.state.send_modify(|s| {
                s.loading_services = false;
                s.error = Some(e.to_string());
            }),
        }
    }

    pub async fn fetch_top_clients(&self, year: i32, month: u32) {
        self.state.send_modify(|s| {
            s.loading_clients = true;
            s.error = None;
        });
        let params = Self::period_params(year, month);
        match self
            .api
            .get_with_params::<Vec<ClientReport>>("admin/reports/top-clients", &params)
            .await
        {
            Ok(clients) => self.state.send_modify(|s| {
                s.top_clients = clients;
                s.loading_clients = false;
            }),
            Err(e) => self.state.send_modify(|s| {
                s.loading_clients = false;
                s.error = Some(e.to_string());
            }),
        }
    }

    /// Drop all loaded sections (period picker changed, nothing fetched yet).
    pub fn reset(&self) {
        self.state.send_modify(|s| *s = ReportsState::default());
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }

    pub fn snapshot(&self) -> ReportsState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ReportsState> {
        self.state.subscribe()
    }
}
