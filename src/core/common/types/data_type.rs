use std::fmt;

/// The closed set of tags a column may be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DataType {
    Integer,
    Float,
    Text,
    Boolean,
    Blob,
    Null,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Integer => "Integer",
            DataType::Float => "Float",
            DataType::Text => "Text",
            DataType::Boolean => "Boolean",
            DataType::Blob => "Blob",
            DataType::Null => "Null",
        };
        write!(f, "{}", name)
    }
}
