#[cfg(test)]
pub mod test {
    use serde::{Deserialize, Serialize};
    use toml::{Table, Value};

    use crate::error::ListfigError;
    use crate::list::LayeredList;

    pub const DEFAULT: &str = r#"array = ["1", "2", "3"]"#;
    pub const APPEND_FRONT: &str = r#"array = [{append = true}, "4", "5", "6"]"#;
    pub const APPEND_MID: &str = r#"array = ["7", {append = true}, "8"]"#;
    pub const APPEND_BACK: &str = r#"array = ["9", {append = true}]"#;
    pub const APPEND_FALSE: &str = r#"array = ["10", {append = false}]"#;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    pub struct TestConfig {
        pub array: LayeredList,
    }

    pub fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Parse a one-line layer and return the raw `array` value.
    pub fn field_value(layer: &str) -> Value {
        let mut table = layer.parse::<Table>().unwrap();
        table.remove("array").unwrap()
    }

    /// Decode layers in order into a fresh list, stopping at the first error.
    pub fn load_layers(layers: &[&str]) -> Result<LayeredList, ListfigError> {
        let mut list = LayeredList::default();
        for layer in layers {
            list.decode(&field_value(layer))?;
        }
        Ok(list)
    }

    #[test]
    fn fixtures_parse() {
        for layer in [DEFAULT, APPEND_FRONT, APPEND_MID, APPEND_BACK, APPEND_FALSE] {
            assert!(field_value(layer).is_array());
        }
    }
}
