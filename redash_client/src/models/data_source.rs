use serde_json::Value;

json_entity!(DataSource);

impl DataSource {
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// Backend kind, e.g. `pg`, `mysql`, `bigquery`.
    pub fn kind(&self) -> Option<&str> {
        self.str_field("type")
    }
}

json_entity!(
    /// Tables and columns Redash discovered for a data source.
    DataSourceSchema
);

impl DataSourceSchema {
    /// The discovered tables. Each carries a `name` and its `columns`,
    /// given as names or, on newer Redash versions, column objects.
    pub fn tables(&self) -> &[Value] {
        self.get("schema")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
