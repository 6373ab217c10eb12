//! Dashboard counters. Totals come back as a bare number in `data`, the daily
//! histograms as `[{day, count}]`.

use axum::extract::State;
use common::SuccessRes;
use models::Statistic;

use super::requests::WindowQuery;
use super::AdminState;
use crate::errors::JsonApiError;
use crate::extract::ApiQuery;

type Total = Result<SuccessRes<u64>, JsonApiError>;
type Daily = Result<SuccessRes<Vec<Statistic>>, JsonApiError>;

#[utoipa::path(get, path = "/admin/statistic/users", tag = "statistic", responses((status = 200, description = "Total users")))]
pub async fn total_users(State(state): State<AdminState>) -> Total {
    Ok(SuccessRes::new(state.statistics.total_users().await?))
}

#[utoipa::path(get, path = "/admin/statistic/games", tag = "statistic", responses((status = 200, description = "Total games")))]
pub async fn total_games(State(state): State<AdminState>) -> Total {
    Ok(SuccessRes::new(state.statistics.total_games().await?))
}

#[utoipa::path(get, path = "/admin/statistic/enterprises", tag = "statistic", responses((status = 200, description = "Total enterprises")))]
pub async fn total_enterprises(State(state): State<AdminState>) -> Total {
    Ok(SuccessRes::new(state.statistics.total_enterprises().await?))
}

#[utoipa::path(get, path = "/admin/statistic/end-users", tag = "statistic", responses((status = 200, description = "Total end users")))]
pub async fn total_end_users(State(state): State<AdminState>) -> Total {
    Ok(SuccessRes::new(state.statistics.total_end_users().await?))
}

#[utoipa::path(get, path = "/admin/statistic/active-end-users", tag = "statistic", responses((status = 200, description = "Active end users")))]
pub async fn total_active_end_users(State(state): State<AdminState>) -> Total {
    Ok(SuccessRes::new(state.statistics.total_active_end_users().await?))
}

#[utoipa::path(get, path = "/admin/statistic/active-enterprises", tag = "statistic", responses((status = 200, description = "Active enterprises")))]
pub async fn total_active_enterprises(State(state): State<AdminState>) -> Total {
    Ok(SuccessRes::new(state.statistics.total_active_enterprises().await?))
}

#[utoipa::path(
    get, path = "/admin/statistic/new-enterprises", tag = "statistic",
    params(WindowQuery),
    responses((status = 200, description = "New enterprises per day"), (status = 400, description = "Bad window"))
)]
pub async fn new_enterprises(State(state): State<AdminState>, ApiQuery(q): ApiQuery<WindowQuery>) -> Daily {
    let window = q.required()?;
    Ok(SuccessRes::new(state.statistics.new_enterprises_in_window(window).await?))
}

#[utoipa::path(
    get, path = "/admin/statistic/new-end-users", tag = "statistic",
    params(WindowQuery),
    responses((status = 200, description = "New end users per day"), (status = 400, description = "Bad window"))
)]
pub async fn new_end_users(State(state): State<AdminState>, ApiQuery(q): ApiQuery<WindowQuery>) -> Daily {
    let window = q.required()?;
    Ok(SuccessRes::new(state.statistics.new_end_users_in_window(window).await?))
}
