use crate::shared::api::{ApiError, CubeClient};
use crate::shared::query::build_query;
use crate::shared::state::FilterState;
use contracts::analytics::{OrderDirection, QueryOrder, ResultSet};

pub const DIM_WAREHOUSE: &str = "Stocks.warehouseName";

const MEASURE_QUANTITY: &str = "Stocks.quantity";
const MEASURE_IN_WAY_TO: &str = "Stocks.inWayToClient";
const MEASURE_IN_WAY_FROM: &str = "Stocks.inWayFromClient";

/// One warehouse row of the stock table.
#[derive(Debug, Clone, PartialEq)]
pub struct StockRow {
    pub warehouse: String,
    pub quantity: f64,
    pub in_way_to_client: f64,
    pub in_way_from_client: f64,
}

impl StockRow {
    /// Everything currently tied up in the warehouse plus the road.
    pub fn total(&self) -> f64 {
        self.quantity + self.in_way_to_client + self.in_way_from_client
    }
}

/// Stock position per warehouse under the current filter selection.
pub async fn load_stock(
    client: &CubeClient,
    state: &FilterState,
) -> Result<Vec<StockRow>, ApiError> {
    let mut query = build_query(state, &[]).into_query(
        vec![
            MEASURE_QUANTITY.to_string(),
            MEASURE_IN_WAY_TO.to_string(),
            MEASURE_IN_WAY_FROM.to_string(),
        ],
        vec![DIM_WAREHOUSE.to_string()],
    );
    query.order = vec![QueryOrder(
        MEASURE_QUANTITY.to_string(),
        OrderDirection::Desc,
    )];

    let response = client.load(&query).await?;
    let rows = response
        .data
        .iter()
        .map(|row| StockRow {
            warehouse: ResultSet::string(row, DIM_WAREHOUSE).unwrap_or_default(),
            quantity: ResultSet::number(row, MEASURE_QUANTITY).unwrap_or(0.0),
            in_way_to_client: ResultSet::number(row, MEASURE_IN_WAY_TO).unwrap_or(0.0),
            in_way_from_client: ResultSet::number(row, MEASURE_IN_WAY_FROM).unwrap_or(0.0),
        })
        .collect();
    Ok(rows)
}

/// Totals row across all warehouses.
pub fn totals(rows: &[StockRow]) -> StockRow {
    StockRow {
        warehouse: "Итого".to_string(),
        quantity: rows.iter().map(|r| r.quantity).sum(),
        in_way_to_client: rows.iter().map(|r| r.in_way_to_client).sum(),
        in_way_from_client: rows.iter().map(|r| r.in_way_from_client).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_sums_every_column() {
        let rows = vec![
            StockRow {
                warehouse: "Коледино".to_string(),
                quantity: 100.0,
                in_way_to_client: 10.0,
                in_way_from_client: 1.0,
            },
            StockRow {
                warehouse: "Казань".to_string(),
                quantity: 50.0,
                in_way_to_client: 5.0,
                in_way_from_client: 2.0,
            },
        ];
        let total = totals(&rows);
        assert_eq!(total.quantity, 150.0);
        assert_eq!(total.in_way_to_client, 15.0);
        assert_eq!(total.in_way_from_client, 3.0);
        assert_eq!(total.total(), 168.0);
    }
}
