use serde::{Deserialize, Serialize};

/// Filter operator applied to a dimension.
///
/// The query layer only ever produces equality filters; the enum exists so
/// the wire format stays open for the other operators the API understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Contains,
    Set,
    NotSet,
}

/// A single dimension filter inside a query descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    /// Fully qualified member name, e.g. "Income.warehouseName"
    pub member: String,
    pub operator: FilterOperator,
    pub values: Vec<String>,
}

impl QueryFilter {
    pub fn equals(member: &str, values: Vec<String>) -> Self {
        Self {
            member: member.to_string(),
            operator: FilterOperator::Equals,
            values,
        }
    }
}

/// Time grain for a time dimension clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

/// Time dimension clause: member + granularity + inclusive ISO date pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeDimension {
    pub dimension: String,
    pub granularity: Granularity,
    /// ["YYYY-MM-DD", "YYYY-MM-DD"]
    pub date_range: [String; 2],
}

/// Sort direction for a query order clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// Order clause, serialized as a [member, direction] pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryOrder(pub String, pub OrderDirection);

/// Declarative query descriptor sent to the analytics API.
///
/// Field names follow the Cube wire format (camelCase); empty collections
/// are omitted so hand-written queries in devtools stay comparable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub measures: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<QueryFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_dimensions: Vec<TimeDimension>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<QueryOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_wire_format() {
        let query = Query {
            measures: vec!["Income.totalPrice".to_string()],
            dimensions: vec!["Income.warehouseName".to_string()],
            filters: vec![QueryFilter::equals(
                "Income.warehouseName",
                vec!["Коледино".to_string()],
            )],
            time_dimensions: vec![TimeDimension {
                dimension: "Income.date".to_string(),
                granularity: Granularity::Day,
                date_range: ["2024-01-01".to_string(), "2024-01-31".to_string()],
            }],
            order: vec![QueryOrder(
                "Income.totalPrice".to_string(),
                OrderDirection::Desc,
            )],
            limit: Some(500),
        };

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["timeDimensions"][0]["granularity"], "day");
        assert_eq!(json["timeDimensions"][0]["dateRange"][0], "2024-01-01");
        assert_eq!(json["filters"][0]["operator"], "equals");
        assert_eq!(json["order"][0][1], "desc");
        assert_eq!(json["limit"], 500);
    }

    #[test]
    fn test_empty_collections_are_skipped() {
        let json = serde_json::to_string(&Query::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_query_roundtrip() {
        let query = Query {
            measures: vec!["Stocks.quantity".to_string()],
            ..Default::default()
        };
        let json = serde_json::to_string(&query).unwrap();
        let back: Query = serde_json::from_str(&json).unwrap();
        assert_eq!(back, query);
    }
}
