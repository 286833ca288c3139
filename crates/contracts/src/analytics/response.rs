use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One result row: member name -> cell value.
pub type Row = HashMap<String, Value>;

/// Display metadata attached to a result set member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAnnotation {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub short_title: String,
    #[serde(default, rename = "type")]
    pub member_type: Option<String>,
}

/// Annotation block of a load response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    #[serde(default)]
    pub measures: HashMap<String, MemberAnnotation>,
    #[serde(default)]
    pub dimensions: HashMap<String, MemberAnnotation>,
    #[serde(default)]
    pub time_dimensions: HashMap<String, MemberAnnotation>,
}

/// Body of a successful `/load` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadResponse {
    #[serde(default)]
    pub data: Vec<Row>,
    #[serde(default)]
    pub annotation: Annotation,
}

/// Tabular view over a load response, in the column order the caller asked
/// for. This is the client-side pivot: raw rows keyed by member name become
/// positional display rows.
#[derive(Debug, Clone)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl ResultSet {
    pub fn new(response: LoadResponse, columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: response.data,
        }
    }

    /// Pivot into positional rows following `self.columns`. Missing cells
    /// become empty strings.
    pub fn table_pivot(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|col| match row.get(col) {
                        Some(Value::String(s)) => s.clone(),
                        Some(Value::Null) | None => String::new(),
                        Some(other) => other.to_string(),
                    })
                    .collect()
            })
            .collect()
    }

    /// Numeric cell accessor. The API returns numbers both as JSON numbers
    /// and as decimal strings, depending on the measure type.
    pub fn number(row: &Row, member: &str) -> Option<f64> {
        match row.get(member)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn string(row: &Row, member: &str) -> Option<String> {
        match row.get(member)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// One member (measure or dimension) from the `/meta` catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberMeta {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "type")]
    pub member_type: Option<String>,
}

/// One cube from the `/meta` catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CubeMeta {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub measures: Vec<MemberMeta>,
    #[serde(default)]
    pub dimensions: Vec<MemberMeta>,
}

/// Body of the `/meta` introspection call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaResponse {
    #[serde(default)]
    pub cubes: Vec<CubeMeta>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_response() -> LoadResponse {
        serde_json::from_value(json!({
            "data": [
                {"Income.warehouseName": "Коледино", "Income.totalPrice": "1250.50"},
                {"Income.warehouseName": "Казань", "Income.totalPrice": 730}
            ],
            "annotation": {"measures": {}, "dimensions": {}}
        }))
        .unwrap()
    }

    #[test]
    fn test_table_pivot_follows_column_order() {
        let rs = ResultSet::new(
            sample_response(),
            vec![
                "Income.totalPrice".to_string(),
                "Income.warehouseName".to_string(),
            ],
        );
        let rows = rs.table_pivot();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["1250.50", "Коледино"]);
        assert_eq!(rows[1], vec!["730", "Казань"]);
    }

    #[test]
    fn test_number_parses_both_encodings() {
        let rs = sample_response();
        assert_eq!(
            ResultSet::number(&rs.data[0], "Income.totalPrice"),
            Some(1250.50)
        );
        assert_eq!(
            ResultSet::number(&rs.data[1], "Income.totalPrice"),
            Some(730.0)
        );
        assert_eq!(ResultSet::number(&rs.data[0], "missing"), None);
    }

    #[test]
    fn test_annotation_member_type_decodes_from_type_field() {
        let annotation: Annotation = serde_json::from_value(json!({
            "measures": {
                "Income.totalPrice": {
                    "title": "Сумма поставки",
                    "shortTitle": "Сумма",
                    "type": "number"
                }
            }
        }))
        .unwrap();
        let member = &annotation.measures["Income.totalPrice"];
        assert_eq!(member.member_type.as_deref(), Some("number"));
        assert_eq!(member.short_title, "Сумма");
    }

    #[test]
    fn test_missing_cell_pivots_to_empty() {
        let rs = ResultSet::new(sample_response(), vec!["Income.unknown".to_string()]);
        assert_eq!(rs.table_pivot()[0], vec![""]);
    }
}
