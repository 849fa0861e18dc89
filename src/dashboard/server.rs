use super::page;
use super::state::UiState;
use super::table::DashboardTable;
use crate::utils::error::{EtlError, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::{Filter, Rejection, Reply};

#[derive(Debug, Deserialize)]
pub struct FigureQuery {
    pub chart: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TableQuery {
    pub n_clicks: Option<u64>,
}

fn with_table(
    table: Arc<DashboardTable>,
) -> impl Filter<Extract = (Arc<DashboardTable>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || table.clone())
}

/// All dashboard routes over one shared, read-only table.
pub fn routes(
    table: Arc<DashboardTable>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let html = Arc::new(page::render(&table));

    let index = warp::path::end()
        .and(warp::get())
        .map(move || warp::reply::html(html.as_str().to_owned()));

    let figure = warp::path!("api" / "figure")
        .and(warp::get())
        .and(warp::query::<FigureQuery>())
        .and(with_table(table.clone()))
        .map(|query: FigureQuery, table: Arc<DashboardTable>| {
            let state = UiState::default().select(query.chart.as_deref().unwrap_or_default());
            tracing::debug!("Building chart {:?}", state.chart);
            warp::reply::json(&state.chart.build(&table))
        });

    let table_style = warp::path!("api" / "table-style")
        .and(warp::get())
        .and(warp::query::<TableQuery>())
        .map(|query: TableQuery| {
            let state = UiState {
                table_clicks: query.n_clicks.unwrap_or(0),
                ..UiState::default()
            };
            warp::reply::json(&state.table_style())
        });

    let rows = warp::path!("api" / "rows")
        .and(warp::get())
        .and(with_table(table))
        .map(|table: Arc<DashboardTable>| warp::reply::json(&table.rows()));

    index
        .or(figure)
        .or(table_style)
        .or(rows)
        .with(warp::trace::request())
}

/// Binds `addr` and serves until the process is stopped.
pub async fn serve(table: DashboardTable, addr: SocketAddr) -> Result<()> {
    let rows = table.len();
    let (bound, server) = warp::serve(routes(Arc::new(table)))
        .try_bind_ephemeral(addr)
        .map_err(|e| EtlError::ServerError {
            message: format!("cannot bind {}: {}", addr, e),
        })?;

    tracing::info!("📊 Dashboard with {} rows listening on http://{}", rows, bound);
    server.await;
    Ok(())
}
