use crate::shared::api::{ApiError, CubeClient};
use crate::shared::query::build_query;
use crate::shared::state::FilterState;
use contracts::analytics::{OrderDirection, QueryOrder, ResultSet};

pub const DIM_DATE: &str = "Income.date";
pub const DIM_WAREHOUSE: &str = "Income.warehouseName";
pub const DIM_SUBJECT: &str = "Income.subject";

const MEASURE_TOTAL: &str = "Income.totalPrice";
const MEASURE_QUANTITY: &str = "Income.quantity";

const ROW_LIMIT: u32 = 500;

/// Columns of the income table, in display order.
pub fn columns() -> Vec<String> {
    vec![
        DIM_WAREHOUSE.to_string(),
        DIM_SUBJECT.to_string(),
        MEASURE_QUANTITY.to_string(),
        MEASURE_TOTAL.to_string(),
    ]
}

/// Supplier income grouped by warehouse and subject, under the current
/// global filter selection.
pub async fn load_income(
    client: &CubeClient,
    state: &FilterState,
) -> Result<ResultSet, ApiError> {
    let mut query = build_query(state, &[]).into_query(
        vec![MEASURE_TOTAL.to_string(), MEASURE_QUANTITY.to_string()],
        vec![DIM_WAREHOUSE.to_string(), DIM_SUBJECT.to_string()],
    );
    query.order = vec![QueryOrder(MEASURE_TOTAL.to_string(), OrderDirection::Desc)];
    query.limit = Some(ROW_LIMIT);

    let response = client.load(&query).await?;
    Ok(ResultSet::new(response, columns()))
}
