//! Flattening of configuration trees into dot-joined keys.

use toml::{Table, Value};

/// Flattens `table` into a single-level table keyed by the dot-joined path
/// of each leaf.
///
/// Nested tables are recursed into; empty ones contribute nothing. Sequences
/// are kept whole, encoded as compact JSON text. When two leaves produce the
/// same flat key, the first one wins.
pub fn flatten(table: &Table) -> Table {
    let mut out = Table::new();
    flatten_into(&mut out, table, None);
    out
}

fn flatten_into(out: &mut Table, table: &Table, parent: Option<&str>) {
    for (key, value) in table {
        let flat_key = match parent {
            Some(parent) => format!("{parent}.{key}"),
            None => key.clone(),
        };

        match value {
            Value::Table(nested) => flatten_into(out, nested, Some(&flat_key)),
            Value::Array(_) => {
                let encoded = to_json(value).to_string();
                out.entry(flat_key).or_insert(Value::String(encoded));
            }
            scalar => {
                out.entry(flat_key).or_insert_with(|| scalar.clone());
            }
        }
    }
}

/// Converts a toml value into plain JSON. Datetimes become their TOML text
/// and non-finite floats become `null`, so rendering cannot fail.
fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Integer(i) => serde_json::Value::from(*i),
        Value::Float(f) => serde_json::Value::from(*f),
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Table(table) => serde_json::Value::Object(
            table
                .iter()
                .map(|(key, value)| (key.clone(), to_json(value)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(toml_str: &str) -> Table {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_flatten_nested() {
        let table = make_table(
            r#"
            [test]
            alfa = 5
            omega = "009"

            [info]
            password = "non"
            "#,
        );
        let flat = flatten(&table);

        assert_eq!(flat["test.alfa"].as_integer(), Some(5));
        assert_eq!(flat["test.omega"].as_str(), Some("009"));
        assert_eq!(flat["info.password"].as_str(), Some("non"));
        assert_eq!(flat.len(), 3);
    }

    #[test]
    fn test_flatten_keeps_order() {
        let table = make_table(
            r#"
            bla = "fin"
            [test]
            omega = "009"
            alfa = 5
            "#,
        );
        let keys: Vec<String> = flatten(&table).keys().cloned().collect();
        assert_eq!(keys, ["bla", "test.omega", "test.alfa"]);
    }

    #[test]
    fn test_flatten_encodes_sequences() {
        let table = make_table(
            r#"
            [net]
            hosts = ["a", "b"]
            ports = [80, 443]
            "#,
        );
        let flat = flatten(&table);

        assert_eq!(flat["net.hosts"].as_str(), Some(r#"["a","b"]"#));
        assert_eq!(flat["net.ports"].as_str(), Some("[80,443]"));
    }

    #[test]
    fn test_flatten_encodes_datetimes_as_text() {
        let table = make_table(
            r#"
            dates = [1979-05-27, 1979-05-27T07:32:00Z]
            mixed = [{ name = "a", at = 07:32:00 }, 1.5, true]
            "#,
        );
        let flat = flatten(&table);

        assert_eq!(
            flat["dates"].as_str(),
            Some(r#"["1979-05-27","1979-05-27T07:32:00Z"]"#)
        );
        assert_eq!(
            flat["mixed"].as_str(),
            Some(r#"[{"name":"a","at":"07:32:00"},1.5,true]"#)
        );
    }

    #[test]
    fn test_flatten_skips_empty_tables() {
        let table = make_table("[empty]\n[full]\nx = 1");
        let flat = flatten(&table);

        assert!(!flat.contains_key("empty"));
        assert_eq!(flat["full.x"].as_integer(), Some(1));
    }

    #[test]
    fn test_flatten_first_wins_on_collision() {
        let table = make_table(
            r#"
            "a.b" = "literal"
            [a]
            b = "nested"
            "#,
        );
        let flat = flatten(&table);

        assert_eq!(flat["a.b"].as_str(), Some("literal"));
        assert_eq!(flat.len(), 1);
    }
}
